//! Lenient deserializers for backend fields.
//!
//! Numeric fields arrive as JSON numbers most of the time, but form-created
//! records can carry them as strings. `null` is treated as absent.
//!
//! Records may carry the Mongo `_id` next to a virtual `id`, and `name` next
//! to `title`. Each key is read on its own and resolved afterwards, so a
//! record holding both never fails.

use serde::{Deserialize, Deserializer};

use crate::error::CommerceError;

/// Pick the `_id` key, falling back to the virtual `id`.
pub(crate) fn record_id<I>(
    mongo_id: Option<I>,
    id: Option<I>,
    entity: &'static str,
) -> Result<I, CommerceError> {
    mongo_id.or(id).ok_or(CommerceError::MissingId(entity))
}

/// The first label that is present and non-empty.
pub(crate) fn first_label(labels: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    labels.into_iter().flatten().find(|l| !l.is_empty())
}

/// Wire shape of the small catalog records (references, materials, size
/// charts, specifications).
#[derive(Deserialize)]
#[serde(bound(deserialize = "I: Deserialize<'de>"))]
pub(crate) struct NamedRecord<I> {
    #[serde(rename = "_id", default)]
    pub mongo_id: Option<I>,
    #[serde(default)]
    pub id: Option<I>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Deserialize a float from a number, a numeric string, or `null` (as 0).
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(NumberOrString::Number(n)) => Ok(n),
        Some(NumberOrString::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            trimmed.parse::<f64>().map_err(serde::de::Error::custom)
        }
    }
}

/// Deserialize a stock count as whole units on hand.
///
/// Older rows were saved without the whole-number check, so fractional
/// counts are floored and negative or unreadable ones read as zero.
pub(crate) fn lenient_stock<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<NumberOrString>::deserialize(deserializer)? {
        None => 0.0,
        Some(NumberOrString::Number(n)) => n,
        Some(NumberOrString::Text(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
    };
    if value.is_nan() || value < 1.0 {
        return Ok(0);
    }
    Ok(value.min(u32::MAX as f64).floor() as u32)
}

/// Deserialize a bool, treating `null` as false.
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Deserialize a string, treating `null` as empty.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "lenient_stock")]
        stock: u32,
    }

    fn stock(json: &str) -> u32 {
        serde_json::from_str::<Row>(json).unwrap().stock
    }

    #[test]
    fn test_stock_reads_legacy_values() {
        assert_eq!(stock(r#"{"stock": 4}"#), 4);
        assert_eq!(stock(r#"{"stock": "7"}"#), 7);
        assert_eq!(stock(r#"{"stock": 2.5}"#), 2);
        assert_eq!(stock(r#"{"stock": -3}"#), 0);
        assert_eq!(stock(r#"{"stock": "lots"}"#), 0);
        assert_eq!(stock(r#"{"stock": null}"#), 0);
        assert_eq!(stock(r#"{}"#), 0);
    }

    #[test]
    fn test_record_id_prefers_mongo_key() {
        assert_eq!(record_id(Some("a"), Some("b"), "product"), Ok("a"));
        assert_eq!(record_id(None, Some("b"), "product"), Ok("b"));
        assert_eq!(
            record_id::<&str>(None, None, "product"),
            Err(CommerceError::MissingId("product"))
        );
    }

    #[test]
    fn test_record_with_both_keys() {
        let record: NamedRecord<String> = serde_json::from_str(
            r#"{"_id": "m1", "id": "m1", "name": "", "title": "Cotton", "type": "material"}"#,
        )
        .unwrap();
        assert_eq!(record.mongo_id.as_deref(), Some("m1"));
        assert_eq!(first_label([record.name, record.title]).as_deref(), Some("Cotton"));
        assert_eq!(record.kind.as_deref(), Some("material"));
    }
}
