//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Id`] - Stable, process-wide-unique element identifier
//! - [`Fingerprint`] - Content hash of a document, for cheap snapshot comparison
//!
//! # Reserved identifiers
//!
//! Two identifier values are reserved and never handed out by
//! [`Id::generate`]: [`Id::EMPTY`] ("no element") and [`Id::GROUND`] (the
//! ground sentinel that every document contains).
//!
//! # Examples
//!
//! ```
//! use meshgraph::core::types::Id;
//!
//! let a = Id::generate();
//! let b = Id::generate();
//! assert_ne!(a, b);
//! assert!(a < b);
//!
//! assert_ne!(a, Id::GROUND);
//! assert_ne!(a, Id::EMPTY);
//!
//! let parsed: Id = "42".parse().unwrap();
//! assert_eq!(parsed.raw(), 42);
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid element id: {0}")]
    InvalidId(String),

    #[error("element id {0} is out of range and cannot be reserved")]
    OutOfRange(u64),
}

/// First value handed out by the generator; everything below is reserved.
const FIRST_GENERATED: u64 = 2;

static NEXT_ID: AtomicU64 = AtomicU64::new(FIRST_GENERATED);

/// A stable element identifier.
///
/// Identifiers are plain values (not pointers): they are `Copy`, hashable
/// and totally ordered. Generated identifiers increase monotonically, so
/// ordering by id is ordering by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(u64);

impl Id {
    /// "No element".
    pub const EMPTY: Id = Id(0);

    /// The ground sentinel present in every document.
    pub const GROUND: Id = Id(1);

    /// Generate a fresh, process-wide-unique identifier.
    ///
    /// # Panics
    ///
    /// If the identifier space is exhausted. The generator never wraps
    /// around into the reserved values.
    pub fn generate() -> Self {
        match NEXT_ID.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |next| {
            next.checked_add(1)
        }) {
            Ok(id) => Self(id),
            Err(_) => panic!("element id space exhausted"),
        }
    }

    /// Wrap a raw value, e.g. one read back from a scene file.
    ///
    /// This does not reserve the value; callers loading foreign ids should
    /// follow up with [`Id::reserve_through`].
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Make sure the generator never hands out `id` or anything below it.
    ///
    /// # Errors
    ///
    /// `OutOfRange` for `u64::MAX`, which has no successor to resume from.
    /// The generator is left untouched.
    pub fn reserve_through(id: Id) -> Result<(), TypeError> {
        let next = id.0.checked_add(1).ok_or(TypeError::OutOfRange(id.0))?;
        NEXT_ID.fetch_max(next, Ordering::Relaxed);
        Ok(())
    }

    /// Get the raw value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Whether this is [`Id::EMPTY`].
    pub const fn is_empty(self) -> bool {
        self.0 == Self::EMPTY.0
    }

    /// Whether this is [`Id::GROUND`].
    pub const fn is_ground(self) -> bool {
        self.0 == Self::GROUND.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Id {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Id)
            .map_err(|_| TypeError::InvalidId(s.to_string()))
    }
}

/// Content fingerprint of a document.
///
/// A hex-encoded SHA-256 over a canonical, id-ordered rendering of the
/// document. Two documents with the same elements and selection produce
/// the same fingerprint, regardless of how they were built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute a fingerprint from canonical lines.
    ///
    /// Callers are responsible for producing the lines in a deterministic
    /// order; each line is hashed followed by a newline separator.
    pub fn compute<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut hasher = Sha256::new();
        for line in lines {
            hasher.update(line.as_ref().as_bytes());
            hasher.update(b"\n");
        }

        let result = hasher.finalize();
        Self(hex::encode(result))
    }

    /// Get the fingerprint as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_and_increasing() {
        let a = Id::generate();
        let b = Id::generate();
        let c = Id::generate();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn generated_ids_skip_reserved_values() {
        for _ in 0..16 {
            let id = Id::generate();
            assert!(!id.is_empty());
            assert!(!id.is_ground());
        }
    }

    #[test]
    fn reserve_through_advances_generator() {
        let far = Id::from_raw(Id::generate().raw() + 1000);
        Id::reserve_through(far).unwrap();
        assert!(Id::generate() > far);
    }

    #[test]
    fn reserve_through_never_moves_backwards() {
        let current = Id::generate();
        Id::reserve_through(Id::GROUND).unwrap();
        assert!(Id::generate() > current);
    }

    #[test]
    fn reserve_through_rejects_last_value() {
        let current = Id::generate();
        assert_eq!(
            Id::reserve_through(Id::from_raw(u64::MAX)),
            Err(TypeError::OutOfRange(u64::MAX))
        );
        let next = Id::generate();
        assert!(next > current);
        assert!(next.raw() < u64::MAX);
    }

    #[test]
    fn parse_and_display() {
        let id: Id = "17".parse().unwrap();
        assert_eq!(id, Id::from_raw(17));
        assert_eq!(id.to_string(), "17");
        assert_eq!(" 3 ".parse::<Id>().unwrap(), Id::from_raw(3));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(
            "body".parse::<Id>(),
            Err(TypeError::InvalidId("body".to_string()))
        );
        assert!("-1".parse::<Id>().is_err());
        assert!("".parse::<Id>().is_err());
    }

    #[test]
    fn id_serializes_transparently() {
        let id = Id::from_raw(99);
        assert_eq!(serde_json::to_string(&id).unwrap(), "99");
        let back: Id = serde_json::from_str("99").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let a = Fingerprint::compute(["1 ground", "2 body"]);
        let b = Fingerprint::compute(vec!["1 ground".to_string(), "2 body".to_string()]);
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn fingerprint_depends_on_line_boundaries() {
        let a = Fingerprint::compute(["ab", "c"]);
        let b = Fingerprint::compute(["a", "bc"]);
        assert_ne!(a, b);
    }
}
