//! Category and subcategory references embedded in product payloads.
//!
//! The backend is inconsistent about these: a product's `category` may be a
//! single populated object, an array of them, a bare id string, or `null`.
//! All of those collapse into `Vec<Reference<_>>` at deserialization time.

use serde::{Deserialize, Deserializer, Serialize};

use super::wire::{first_label, record_id, NamedRecord};
use crate::ids::{CategoryId, SubcategoryId};

/// A reference to a catalog entity, optionally carrying its display label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Reference<I> {
    /// Referenced entity id.
    #[serde(rename = "_id")]
    pub id: I,
    /// Display label (category `name` or subcategory `title`), when populated.
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Reference to a category.
pub type CategoryRef = Reference<CategoryId>;

/// Reference to a subcategory.
pub type SubcategoryRef = Reference<SubcategoryId>;

impl<I> Reference<I> {
    /// Create a reference without a label.
    pub fn new(id: impl Into<I>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }

    /// Attach a display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Display label, or an empty string.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReference {
    Id(String),
    Object(NamedRecord<String>),
}

impl<'de, I> Deserialize<'de> for Reference<I>
where
    I: From<String>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawReference::deserialize(deserializer)? {
            RawReference::Id(id) => Reference {
                id: I::from(id),
                label: None,
            },
            RawReference::Object(record) => Reference {
                id: I::from(
                    record_id(record.mongo_id, record.id, "reference")
                        .map_err(<D::Error as serde::de::Error>::custom)?,
                ),
                label: first_label([record.name, record.title]),
            },
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// Deserialize a single value, an array, or `null` into a list.
pub(crate) fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
    })
}

/// Deserialize an optional single reference that might also arrive as an array
/// (first element wins).
pub(crate) fn first_of<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(one_or_many(deserializer)?.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "one_or_many")]
        category: Vec<CategoryRef>,
    }

    fn parse(json: &str) -> Vec<CategoryRef> {
        serde_json::from_str::<Holder>(json).unwrap().category
    }

    #[test]
    fn test_single_object_becomes_list() {
        let refs = parse(r#"{"category": {"_id": "c1", "name": "Shirts"}}"#);
        assert_eq!(refs, vec![CategoryRef::new("c1").with_label("Shirts")]);
    }

    #[test]
    fn test_array_of_objects() {
        let refs = parse(r#"{"category": [{"_id": "c1"}, {"id": "c2", "title": "Kurtas"}]}"#);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[1].id.as_str(), "c2");
        assert_eq!(refs[1].label(), "Kurtas");
    }

    #[test]
    fn test_object_with_both_id_keys() {
        let refs = parse(r#"{"category": [{"_id": "c1", "id": "c1", "name": "Men"}]}"#);
        assert_eq!(refs, vec![CategoryRef::new("c1").with_label("Men")]);
    }

    #[test]
    fn test_object_without_id_fails() {
        assert!(serde_json::from_str::<Holder>(r#"{"category": {"name": "Men"}}"#).is_err());
    }

    #[test]
    fn test_bare_id_and_null() {
        assert_eq!(parse(r#"{"category": "c9"}"#), vec![CategoryRef::new("c9")]);
        assert!(parse(r#"{"category": null}"#).is_empty());
        assert!(parse(r#"{}"#).is_empty());
    }
}
