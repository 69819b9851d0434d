//! Strongly Typed External Keys
//!
//! `StudentKey` is the partner-supplied learner identifier. It is opaque to
//! us and never parsed beyond a non-empty check at the API boundary; its
//! ordering keys the batch outcome map so responses serialize
//! deterministically. Program, curriculum, and course identifiers stay as
//! plain `Uuid`/`String` values because they are bound straight into sqlx
//! queries and axum path extractors.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// External learner identifier supplied by the partner organization.
///
/// Batch-unique within one enrollment request; the outcome map is keyed by
/// this value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentKey(String);

impl StudentKey {
    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning the underlying string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns true if the key is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for StudentKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StudentKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for StudentKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for StudentKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for StudentKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_student_key_serde_transparent() {
        let key = StudentKey::from("learner-001");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"learner-001\"");
        let back: StudentKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_student_key_ordering() {
        let a = StudentKey::from("a");
        let b = StudentKey::from("b");
        assert!(a < b);
    }

    #[test]
    fn test_student_key_as_str() {
        let key = StudentKey::from("learner-0042");
        assert_eq!(key.as_str(), "learner-0042");
        assert!(!key.is_empty());
    }

    #[test]
    fn test_student_key_map_lookup_by_str() {
        let mut map: BTreeMap<StudentKey, u32> = BTreeMap::new();
        map.insert(StudentKey::from("a"), 1);
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), None);
    }
}
