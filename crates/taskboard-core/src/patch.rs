//! Serde helpers for partial-update payloads.
//!
//! A nullable field in a PATCH body has three states: absent (leave the
//! column alone), `null` (clear it), or a value (set it). These map onto
//! `Option<Option<T>>` as `None`, `Some(None)` and `Some(Some(v))`.

use serde::{Deserialize, Deserializer};

/// Deserializes a present field into `Some(..)`, keeping an explicit `null`
/// distinguishable from an absent field.
///
/// Use together with `#[serde(default)]` so that absent fields become `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        description: Option<Option<String>>,
    }

    #[test]
    fn test_absent_field_is_none() {
        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.description, None);
    }

    #[test]
    fn test_null_field_is_some_none() {
        let patch: Patch = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(patch.description, Some(None));
    }

    #[test]
    fn test_value_field_is_some_some() {
        let patch: Patch = serde_json::from_str(r#"{"description":"text"}"#).unwrap();
        assert_eq!(patch.description, Some(Some("text".to_string())));
    }
}
