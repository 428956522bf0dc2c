//! Category and subcategory types.

use serde::{Deserialize, Serialize};

use super::reference::{first_of, CategoryRef};
use super::wire::{first_label, lenient_string, record_id};
use crate::error::CommerceError;
use crate::ids::{CategoryId, SubcategoryId};

/// A top-level product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "CategoryRecord")]
pub struct Category {
    /// Backend category identifier.
    #[serde(rename = "_id")]
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Category image URL.
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
struct CategoryRecord {
    #[serde(rename = "_id", default)]
    mongo_id: Option<CategoryId>,
    #[serde(default)]
    id: Option<CategoryId>,
    #[serde(default, deserialize_with = "lenient_string")]
    name: String,
    #[serde(rename = "imageUrl", default)]
    image_url: Option<String>,
    #[serde(rename = "ImageUrl", default)]
    legacy_image_url: Option<String>,
    #[serde(default)]
    image: Option<String>,
}

impl TryFrom<CategoryRecord> for Category {
    type Error = CommerceError;

    fn try_from(record: CategoryRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record_id(record.mongo_id, record.id, "category")?,
            name: record.name,
            image_url: first_label([record.image_url, record.legacy_image_url, record.image]),
        })
    }
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: None,
        }
    }
}

/// A subcategory hanging off one parent category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "SubcategoryRecord")]
pub struct Subcategory {
    /// Backend subcategory identifier.
    #[serde(rename = "_id")]
    pub id: SubcategoryId,
    /// Subcategory title.
    pub title: String,
    /// Parent category.
    #[serde(rename = "category")]
    pub parent: Option<CategoryRef>,
    /// Subcategory image URL.
    #[serde(rename = "SubImageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// The admin and user endpoints name the parent and the label differently,
/// and some responses carry both spellings.
#[derive(Deserialize)]
struct SubcategoryRecord {
    #[serde(rename = "_id", default)]
    mongo_id: Option<SubcategoryId>,
    #[serde(default)]
    id: Option<SubcategoryId>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, deserialize_with = "first_of")]
    category: Option<CategoryRef>,
    #[serde(rename = "MainCategory", default, deserialize_with = "first_of")]
    main_category: Option<CategoryRef>,
    #[serde(rename = "SubImageUrl", default)]
    sub_image_url: Option<String>,
    #[serde(rename = "imageUrl", default)]
    image_url: Option<String>,
}

impl TryFrom<SubcategoryRecord> for Subcategory {
    type Error = CommerceError;

    fn try_from(record: SubcategoryRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record_id(record.mongo_id, record.id, "subcategory")?,
            title: first_label([record.title, record.name]).unwrap_or_default(),
            parent: record.category.or(record.main_category),
            image_url: first_label([record.sub_image_url, record.image_url]),
        })
    }
}

impl Subcategory {
    pub fn new(
        id: impl Into<SubcategoryId>,
        title: impl Into<String>,
        parent: impl Into<CategoryId>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            parent: Some(CategoryRef::new(parent.into())),
            image_url: None,
        }
    }

    /// Parent category id, if the subcategory has one.
    pub fn parent_id(&self) -> Option<&CategoryId> {
        self.parent.as_ref().map(|p| &p.id)
    }

    /// Check whether the parent category is one of `categories`.
    pub fn belongs_to_any(&self, categories: &[CategoryId]) -> bool {
        self.parent_id()
            .map(|parent| categories.contains(parent))
            .unwrap_or(false)
    }
}

/// Subcategories offered for a set of selected categories.
///
/// An empty selection offers nothing; selection is by parent membership,
/// so several categories may contribute candidates.
pub fn subcategory_candidates<'a>(
    subcategories: &'a [Subcategory],
    selected: &[CategoryId],
) -> Vec<&'a Subcategory> {
    if selected.is_empty() {
        return Vec::new();
    }
    subcategories
        .iter()
        .filter(|s| s.belongs_to_any(selected))
        .collect()
}
