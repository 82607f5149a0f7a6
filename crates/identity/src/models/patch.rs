//! Tri-state update field.

use serde::{Deserialize, Deserializer};

/// A field of a partial-update payload.
///
/// JSON distinguishes three cases that `Option` alone cannot represent:
/// the key being absent (`Missing`, keep the stored value), the key being
/// an explicit `null` (`Null`, rejected by the profile service), and the
/// key carrying a value (`Value`).
///
/// Use with `#[serde(default)]` so absent keys fall back to `Missing`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// The key was absent from the payload.
    #[default]
    Missing,
    /// The key was present as JSON `null`.
    Null,
    /// The key was present with a value.
    Value(T),
}

impl<T> Patch<T> {
    /// Returns true if the key was absent from the payload.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Only ever called when the key is present; absence is handled by
        // #[serde(default)] on the containing struct.
        Option::<T>::deserialize(deserializer).map(|opt| opt.map_or(Self::Null, Self::Value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default)]
        name: Patch<String>,
    }

    #[test]
    fn test_absent_key_is_missing() {
        let p: Payload = serde_json::from_str("{}").unwrap();
        assert_eq!(p.name, Patch::Missing);
    }

    #[test]
    fn test_null_key_is_null() {
        let p: Payload = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(p.name, Patch::Null);
    }

    #[test]
    fn test_value_key_is_value() {
        let p: Payload = serde_json::from_str(r#"{"name": "Jo"}"#).unwrap();
        assert_eq!(p.name, Patch::Value("Jo".to_owned()));
    }
}
