//! Common ID Types
//!
//! Type-safe wrappers around the integer primary keys SQLite assigns.

use std::fmt;
use std::marker::PhantomData;

/// Generic typed ID wrapper
///
/// The marker type keeps a `UserId` from being passed where a `CafeId`
/// is expected even though both are `i64` rowids underneath.
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type CafeId = Id<markers::Cafe>;
/// let id = CafeId::from_i64(7);
/// assert_eq!(id.as_i64(), 7);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Wrap a rowid read from the store
    pub const fn from_i64(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn as_i64(&self) -> i64 {
        self.value
    }
}

// Manual impls: derives would require `T: Clone` etc. on the marker.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    pub struct User;

    pub struct Cafe;
}

pub type UserId = Id<markers::User>;
pub type CafeId = Id<markers::Cafe>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip_through_i64() {
        let id = CafeId::from_i64(42);
        assert_eq!(id.as_i64(), 42);
        let raw: i64 = id.into();
        assert_eq!(raw, 42);
    }

    #[test]
    fn test_id_equality_is_by_value() {
        assert_eq!(UserId::from_i64(1), UserId::from(1));
        assert_ne!(UserId::from_i64(1), UserId::from_i64(2));
        assert_eq!(format!("{:?}", UserId::from_i64(3)), "Id(3)");
    }
}
