//! Runtime configuration, read from a TOML file.
//!
//! Every field has a default, so a partial file, or no file at all,
//! yields a working demo setup.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// All knobs of the simulation. One field per setting of the demo.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pause between ticks, milliseconds. Zero runs flat out.
    pub timer_delay_ms: u64,
    /// Variant token for the list factory: `single`, `double`,
    /// `dummyhead`, or anything else for the array list.
    pub list: String,
    /// Canvas width, pixels.
    pub window_size_x: i32,
    /// Canvas height, pixels.
    pub window_size_y: i32,
    /// Per-tick probability of spawning a comet on a horizontal edge.
    pub gen_x: f64,
    /// Per-tick probability of spawning a comet on a vertical edge.
    pub gen_y: f64,
    /// Comet radius, pixels.
    pub body_size: i32,
    /// Comet mass, kg.
    pub body_mass: f64,
    /// Comet speed bound per axis, pixels per tick. Must be at least 1.
    pub body_velocity: i32,
    /// Star start position, x.
    pub star_position_x: i32,
    /// Star start position, y.
    pub star_position_y: i32,
    /// Star radius, pixels.
    pub star_size: i32,
    /// Star mass, kg.
    pub star_mass: f64,
    /// Star velocity along x, pixels per tick.
    pub star_velocity_x: i32,
    /// Star velocity along y, pixels per tick.
    pub star_velocity_y: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer_delay_ms: 30,
            list: String::from("array"),
            window_size_x: 1024,
            window_size_y: 768,
            gen_x: 0.3,
            gen_y: 0.3,
            body_size: 10,
            body_mass: 1.0e15,
            body_velocity: 5,
            star_position_x: 512,
            star_position_y: 384,
            star_size: 30,
            star_mass: 2.0e30,
            star_velocity_x: 1,
            star_velocity_y: 1,
        }
    }
}

/// Why a configuration file could not be turned into a [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("reading config {path}: {source}")]
    Io {
        /// Path as given on the command line.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file was read but is not valid TOML for [`Config`].
    #[error("parsing config {path}: {source}")]
    Parse {
        /// Path as given on the command line.
        path: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    /// Loads configuration from `path`.
    ///
    /// A missing file is not an error: the defaults are returned and a
    /// warning is logged, so the demo runs out of the box.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
