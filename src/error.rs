//! Error kinds surfaced by the engines and their façades.
//!
//! Kept dependency-free (no `thiserror`) in the same spirit as the rest of
//! this crate: a foundational data-structure core has no business dragging
//! in a derive-macro crate for three variants.

use core::fmt;

/// Errors the core can return to a caller.
///
/// Element-already-present is *not* represented here: insert-style
/// operations signal that with `inserted: false` in their return value,
/// not with an `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
    /// `at`/`at_mut`-style lookup found no entry for the given key.
    KeyNotFound,
    /// A capacity computation overflowed `usize` (e.g. `reserve` requesting
    /// more elements than the table's index type can address).
    CapacityOverflow,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyNotFound => f.write_str("key not found"),
            Self::CapacityOverflow => f.write_str("capacity overflow"),
        }
    }
}

impl std::error::Error for TableError {}

/// Convenience alias used throughout the engines.
pub type Result<T> = core::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(TableError::KeyNotFound.to_string(), "key not found");
        assert_eq!(
            TableError::CapacityOverflow.to_string(),
            "capacity overflow"
        );
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<TableError>();
    }
}
