//! Field-granular fault tolerance for decoding.
//!
//! The API adds fields and values faster than clients are released, so an
//! optional attribute that fails to decode is dropped (and logged) instead of
//! failing the entity that carries it. Core attributes are not routed
//! through here: a missing `id` still fails the entity.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// `deserialize_with` adapter for optional attributes.
pub(crate) fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decode_optional(value))
}

/// `deserialize_with` adapter for lists whose items decode independently.
pub(crate) fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decode_items(value).unwrap_or_default())
}

pub(crate) fn decode_optional<T: DeserializeOwned>(value: Value) -> Option<T> {
    if value.is_null() {
        return None;
    }
    match T::deserialize(&value) {
        Ok(decoded) => Some(decoded),
        Err(error) => {
            warn!(
                target_type = std::any::type_name::<T>(),
                %error,
                %value,
                "dropping undecodable attribute"
            );
            None
        }
    }
}

/// Decodes every item of a JSON array, dropping the ones that fail.
///
/// Returns `None` when `value` is not an array at all.
pub(crate) fn decode_items<T: DeserializeOwned>(value: Value) -> Option<Vec<T>> {
    let raw = match value {
        Value::Array(raw) => raw,
        Value::Null => return None,
        other => {
            warn!(
                target_type = std::any::type_name::<T>(),
                value = %other,
                "expected a list, dropping attribute"
            );
            return None;
        }
    };
    let decoded = raw
        .into_iter()
        .filter_map(|item| match T::deserialize(&item) {
            Ok(decoded) => Some(decoded),
            Err(error) => {
                warn!(
                    target_type = std::any::type_name::<T>(),
                    %error,
                    "dropping undecodable list item"
                );
                None
            }
        })
        .collect();
    Some(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Counted {
        #[serde(default, deserialize_with = "optional")]
        count: Option<u64>,
        #[serde(default, deserialize_with = "items")]
        tags: Vec<String>,
    }

    #[test]
    fn negative_count_is_dropped() {
        let c: Counted = serde_json::from_value(json!({ "count": -3 })).unwrap();
        assert_eq!(c.count, None);
    }

    #[test]
    fn non_numeric_count_is_dropped() {
        let c: Counted = serde_json::from_value(json!({ "count": "many" })).unwrap();
        assert_eq!(c.count, None);
    }

    #[test]
    fn valid_count_is_kept() {
        let c: Counted = serde_json::from_value(json!({ "count": 7 })).unwrap();
        assert_eq!(c.count, Some(7));
    }

    #[test]
    fn bad_items_are_skipped() {
        let c: Counted = serde_json::from_value(json!({ "tags": ["a", 1, "b"] })).unwrap();
        assert_eq!(c.tags, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn non_list_yields_none() {
        assert_eq!(decode_items::<String>(json!({ "a": 1 })), None);
        assert_eq!(decode_items::<String>(Value::Null), None);
    }
}
