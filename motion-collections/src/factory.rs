//! Runtime selection of a list variant from a configuration token.

use crate::{ArrayList, DoublyLinkedList, DummyHeadLinkedList, List, SinglyLinkedList};

/// The four concrete layouts a consumer can ask for.
///
/// Obtained from a configuration token via [`ListKind::from_token`];
/// turned into a working list with [`ListKind::new_list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Contiguous growable buffer ([`ArrayList`]).
    Array,
    /// Head-tracked singly-linked chain ([`SinglyLinkedList`]).
    Singly,
    /// Slab-backed doubly-linked chain ([`DoublyLinkedList`]).
    Doubly,
    /// Sentinel-fronted singly-linked chain ([`DummyHeadLinkedList`]).
    DummyHead,
}

impl ListKind {
    /// Maps a configuration token to a variant, ignoring ASCII case.
    ///
    /// `"single"`, `"double"` and `"dummyhead"` select the linked
    /// variants; anything else (including no token at all) falls back
    /// to [`ListKind::Array`].
    ///
    /// # Example
    ///
    /// ```
    /// use motion_collections::ListKind;
    ///
    /// assert_eq!(ListKind::from_token(Some("DOUBLE")), ListKind::Doubly);
    /// assert_eq!(ListKind::from_token(Some("mystery")), ListKind::Array);
    /// assert_eq!(ListKind::from_token(None), ListKind::Array);
    /// ```
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some(t) if t.eq_ignore_ascii_case("single") => Self::Singly,
            Some(t) if t.eq_ignore_ascii_case("double") => Self::Doubly,
            Some(t) if t.eq_ignore_ascii_case("dummyhead") => Self::DummyHead,
            _ => Self::Array,
        }
    }

    /// Constructs an empty list of this kind behind the contract.
    pub fn new_list<T: 'static>(self) -> Box<dyn List<T>> {
        match self {
            Self::Array => Box::new(ArrayList::<T>::new()),
            Self::Singly => Box::new(SinglyLinkedList::<T>::new()),
            Self::Doubly => Box::new(DoublyLinkedList::<T>::new()),
            Self::DummyHead => Box::new(DummyHeadLinkedList::<T>::new()),
        }
    }
}
