//! The tick loop: spawn comets, move everything, cull what left.
//!
//! Bodies live in one positional list chosen at runtime through the
//! factory, and the loop drives it through the contract alone. The
//! contract hands back shared references, so bodies sit in [`Cell`]s
//! and a tick updates them in place.

use std::cell::Cell;

use motion_collections::{List, ListKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::body::Body;
use crate::config::Config;

/// Comets seeded on each canvas edge at startup.
const INITIAL_COMETS_PER_EDGE: usize = 5;

/// One running simulation: a list of bodies plus the rules that churn it.
pub struct Simulation {
    config: Config,
    bodies: Box<dyn List<Cell<Body>>>,
    rng: StdRng,
}

impl Simulation {
    /// Builds a simulation from `config` with an OS-seeded generator.
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Builds a simulation with a caller-supplied generator, so runs
    /// can be reproduced exactly.
    pub fn with_rng(config: Config, rng: StdRng) -> Self {
        let kind = ListKind::from_token(Some(&config.list));
        info!(?kind, token = %config.list, "selected list variant");

        let mut sim = Self {
            bodies: kind.new_list(),
            rng,
            config,
        };

        let star = Body {
            x: sim.config.star_position_x,
            y: sim.config.star_position_y,
            size: sim.config.star_size,
            mass: sim.config.star_mass,
            vx: sim.config.star_velocity_x,
            vy: sim.config.star_velocity_y,
            star: true,
        };
        sim.bodies.push(Cell::new(star));
        debug!(x = star.x, y = star.y, mass = star.mass, "star added");
        sim.seed_initial_comets();
        info!(bodies = sim.body_count(), "initial population seeded");
        sim
    }

    /// Number of bodies currently alive, star included.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Advances the simulation one tick: maybe spawn, then move and
    /// cull in a single backward pass.
    pub fn tick(&mut self) {
        if self.rng.gen::<f64>() < self.config.gen_x {
            self.spawn_edge_comet(true);
        }
        if self.rng.gen::<f64>() < self.config.gen_y {
            self.spawn_edge_comet(false);
        }

        let width = self.config.window_size_x;
        let height = self.config.window_size_y;

        // Backward walk: removal shifts only elements this pass has
        // already visited, so no index is skipped.
        let mut index = self.bodies.len();
        while index > 0 {
            index -= 1;
            let slot = self.bodies.get(index).expect("index within bounds");
            let mut body = slot.get();
            body.step();
            slot.set(body);

            if !body.star && body.is_off_screen(width, height) {
                self.bodies.remove(index).expect("index within bounds");
                debug!(index, x = body.x, y = body.y, "culled off-screen comet");
            }
        }
    }

    /// Spawns one comet on a random point of a horizontal edge
    /// (`horizontal`) or a vertical edge, moving in a random direction.
    fn spawn_edge_comet(&mut self, horizontal: bool) {
        let width = self.config.window_size_x;
        let height = self.config.window_size_y;

        let (x, y) = if horizontal {
            let x = self.rng.gen_range(0..width);
            let y = if self.rng.gen_bool(0.5) { 0 } else { height };
            (x, y)
        } else {
            let x = if self.rng.gen_bool(0.5) { 0 } else { width };
            let y = self.rng.gen_range(0..height);
            (x, y)
        };
        let vx = self.random_velocity();
        let vy = self.random_velocity();
        self.spawn_comet(x, y, vx, vy);
    }

    /// Seeds [`INITIAL_COMETS_PER_EDGE`] comets per edge, each moving
    /// into the canvas from its edge.
    fn seed_initial_comets(&mut self) {
        let width = self.config.window_size_x;
        let height = self.config.window_size_y;
        let bound = self.config.body_velocity;

        for _ in 0..INITIAL_COMETS_PER_EDGE {
            // Top edge, moving down.
            let x = self.rng.gen_range(0..width);
            let vx = self.random_velocity();
            let vy = self.rng.gen_range(1..=bound);
            self.spawn_comet(x, 0, vx, vy);

            // Bottom edge, moving up.
            let x = self.rng.gen_range(0..width);
            let vx = self.random_velocity();
            let vy = -self.rng.gen_range(1..=bound);
            self.spawn_comet(x, height, vx, vy);

            // Left edge, moving right.
            let y = self.rng.gen_range(0..height);
            let vx = self.rng.gen_range(1..=bound);
            let vy = self.random_velocity();
            self.spawn_comet(0, y, vx, vy);

            // Right edge, moving left.
            let y = self.rng.gen_range(0..height);
            let vx = -self.rng.gen_range(1..=bound);
            let vy = self.random_velocity();
            self.spawn_comet(width, y, vx, vy);
        }
    }

    fn spawn_comet(&mut self, x: i32, y: i32, vx: i32, vy: i32) {
        let comet = Body {
            x,
            y,
            size: self.config.body_size,
            mass: self.config.body_mass,
            vx,
            vy,
            star: false,
        };
        self.bodies.push(Cell::new(comet));
    }

    /// Random per-axis velocity in `[-bound, bound]`, with 0 bumped to
    /// 1 so no comet ever stalls on the canvas.
    fn random_velocity(&mut self) -> i32 {
        let bound = self.config.body_velocity;
        let velocity = self.rng.gen_range(-bound..=bound);
        if velocity == 0 {
            1
        } else {
            velocity
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Small canvas, no random spawns, fast comets: population drains
    /// to the star within a handful of ticks.
    fn draining_config(list: &str) -> Config {
        Config {
            list: String::from(list),
            window_size_x: 100,
            window_size_y: 100,
            gen_x: 0.0,
            gen_y: 0.0,
            body_size: 5,
            body_velocity: 60,
            star_position_x: 50,
            star_position_y: 50,
            star_velocity_x: 0,
            star_velocity_y: 0,
            ..Config::default()
        }
    }

    fn seeded(config: Config) -> Simulation {
        Simulation::with_rng(config, StdRng::seed_from_u64(42))
    }

    fn star_count(sim: &Simulation) -> usize {
        (0..sim.bodies.len())
            .filter(|&i| sim.bodies.get(i).unwrap().get().star)
            .count()
    }

    #[test]
    fn seeds_star_plus_twenty_comets() {
        let sim = seeded(draining_config("array"));
        assert_eq!(sim.body_count(), 21);
        assert_eq!(star_count(&sim), 1);
    }

    #[test]
    fn off_screen_comets_drain_until_only_the_star_remains() {
        let mut sim = seeded(draining_config("array"));
        for _ in 0..10 {
            sim.tick();
        }
        assert_eq!(sim.body_count(), 1);
        assert_eq!(star_count(&sim), 1);
    }

    #[test]
    fn star_survives_leaving_the_canvas() {
        let mut config = draining_config("single");
        config.star_velocity_x = 80;
        config.star_velocity_y = 80;

        let mut sim = seeded(config);
        for _ in 0..10 {
            sim.tick();
        }
        // Star is far off screen by now but must never be culled.
        assert_eq!(star_count(&sim), 1);
        assert_eq!(sim.body_count(), 1);
    }

    #[test]
    fn every_variant_token_runs_the_same_population_curve() {
        let mut curves = Vec::new();
        for token in ["array", "single", "double", "dummyhead"] {
            let mut sim = seeded(draining_config(token));
            let mut curve = vec![sim.body_count()];
            for _ in 0..10 {
                sim.tick();
                curve.push(sim.body_count());
            }
            curves.push(curve);
        }
        // Identical seed and rules: the list layout must not be
        // observable in the population history.
        assert!(curves.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn same_seed_reproduces_the_same_run() {
        let mut first = seeded(Config {
            gen_x: 0.8,
            gen_y: 0.8,
            ..draining_config("double")
        });
        let mut second = seeded(Config {
            gen_x: 0.8,
            gen_y: 0.8,
            ..draining_config("double")
        });

        for _ in 0..25 {
            first.tick();
            second.tick();
            assert_eq!(first.body_count(), second.body_count());
        }
    }

    #[test]
    fn spawned_comets_keep_moving_each_tick() {
        let mut sim = seeded(Config {
            window_size_x: 10_000,
            window_size_y: 10_000,
            ..draining_config("dummyhead")
        });
        let before: Vec<(i32, i32)> = (0..sim.body_count())
            .map(|i| {
                let b = sim.bodies.get(i).unwrap().get();
                (b.x, b.y)
            })
            .collect();

        sim.tick();

        let moved = (0..sim.body_count())
            .map(|i| {
                let b = sim.bodies.get(i).unwrap().get();
                (b.x, b.y)
            })
            .zip(before)
            .filter(|(after, before)| after != before)
            .count();
        // Every comet has non-zero velocity on both axes; the star sits
        // still in this config.
        assert_eq!(moved, sim.body_count() - 1);
    }
}
