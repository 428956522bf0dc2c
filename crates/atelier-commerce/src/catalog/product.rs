//! Product and colour variant types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::reference::{one_or_many, CategoryRef, SubcategoryRef};
use super::wire::{lenient_bool, lenient_f64, lenient_stock, lenient_string, record_id};
use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId, SubcategoryId};

/// A product as returned by the storefront API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    /// Backend product identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Image URLs, first one is the cover.
    pub images: Vec<String>,
    /// Price before discount.
    #[serde(rename = "actualPrice")]
    pub actual_price: f64,
    /// Discount percentage (0-100).
    pub discount: f64,
    /// Price shown to buyers.
    #[serde(rename = "offerPrice")]
    pub offer_price: f64,
    /// Categories this product belongs to.
    #[serde(rename = "category")]
    pub categories: Vec<CategoryRef>,
    /// Subcategories this product belongs to.
    #[serde(rename = "subcategory")]
    pub subcategories: Vec<SubcategoryRef>,
    /// Colour variants with their size/stock rows.
    pub colors: Vec<ColorVariant>,
    /// Specification values (material, fit, ...).
    pub features: Features,
    #[serde(rename = "isLatestProduct")]
    pub is_latest: bool,
    #[serde(rename = "isOfferProduct")]
    pub is_offer: bool,
    #[serde(rename = "isFeaturedProduct")]
    pub is_featured: bool,
    #[serde(rename = "freeDelivery")]
    pub free_delivery: bool,
    /// Average review rating (0-5).
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
    /// Present when the listing was fetched with a user id.
    #[serde(rename = "isInWishlist")]
    pub is_in_wishlist: bool,
}

/// Wire shape of a product. Virtual-enabled responses repeat `_id` as `id`.
#[derive(Deserialize)]
struct ProductRecord {
    #[serde(rename = "_id", default)]
    mongo_id: Option<ProductId>,
    #[serde(default)]
    id: Option<ProductId>,
    #[serde(default, deserialize_with = "lenient_string")]
    title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    description: String,
    #[serde(default)]
    images: Vec<String>,
    #[serde(rename = "actualPrice", default, deserialize_with = "lenient_f64")]
    actual_price: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    discount: f64,
    #[serde(rename = "offerPrice", default, deserialize_with = "lenient_f64")]
    offer_price: f64,
    #[serde(rename = "category", default, deserialize_with = "one_or_many")]
    categories: Vec<CategoryRef>,
    #[serde(rename = "subcategory", default, deserialize_with = "one_or_many")]
    subcategories: Vec<SubcategoryRef>,
    #[serde(default)]
    colors: Vec<ColorVariant>,
    #[serde(default)]
    features: Features,
    #[serde(rename = "isLatestProduct", default, deserialize_with = "lenient_bool")]
    is_latest: bool,
    #[serde(rename = "isOfferProduct", default, deserialize_with = "lenient_bool")]
    is_offer: bool,
    #[serde(rename = "isFeaturedProduct", default, deserialize_with = "lenient_bool")]
    is_featured: bool,
    #[serde(rename = "freeDelivery", default, deserialize_with = "lenient_bool")]
    free_delivery: bool,
    #[serde(rename = "averageRating", default, deserialize_with = "lenient_f64")]
    average_rating: f64,
    #[serde(rename = "isInWishlist", default, deserialize_with = "lenient_bool")]
    is_in_wishlist: bool,
}

impl TryFrom<ProductRecord> for Product {
    type Error = CommerceError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record_id(record.mongo_id, record.id, "product")?,
            title: record.title,
            description: record.description,
            images: record.images,
            actual_price: record.actual_price,
            discount: record.discount,
            offer_price: record.offer_price,
            categories: record.categories,
            subcategories: record.subcategories,
            colors: record.colors,
            features: record.features,
            is_latest: record.is_latest,
            is_offer: record.is_offer,
            is_featured: record.is_featured,
            free_delivery: record.free_delivery,
            average_rating: record.average_rating,
            is_in_wishlist: record.is_in_wishlist,
        })
    }
}

impl Product {
    /// Create a bare product, mostly useful for fixtures.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            images: Vec::new(),
            actual_price: 0.0,
            discount: 0.0,
            offer_price: 0.0,
            categories: Vec::new(),
            subcategories: Vec::new(),
            colors: Vec::new(),
            features: Features::default(),
            is_latest: false,
            is_offer: false,
            is_featured: false,
            free_delivery: false,
            average_rating: 0.0,
            is_in_wishlist: false,
        }
    }

    /// Check whether any of the product's categories is `category_id`.
    pub fn in_category(&self, category_id: &CategoryId) -> bool {
        self.categories.iter().any(|c| &c.id == category_id)
    }

    /// Check whether any of the product's subcategories is `subcategory_id`.
    pub fn in_subcategory(&self, subcategory_id: &SubcategoryId) -> bool {
        self.subcategories.iter().any(|s| &s.id == subcategory_id)
    }

    /// Check whether any colour variant offers `size`.
    pub fn has_size(&self, size: &str) -> bool {
        self.colors.iter().any(|c| c.has_size(size))
    }

    /// The single material specification, if set.
    pub fn material(&self) -> Option<&str> {
        self.features.get("material")
    }

    /// Label of the first category, used by the home page category chips.
    pub fn primary_category_name(&self) -> Option<&str> {
        self.categories.first().and_then(|c| c.label.as_deref())
    }

    /// Comma-joined category names for display.
    pub fn category_names(&self) -> String {
        join_labels(self.categories.iter().map(|c| c.label()))
    }

    /// Comma-joined subcategory titles for display.
    pub fn subcategory_titles(&self) -> String {
        join_labels(self.subcategories.iter().map(|s| s.label()))
    }

    /// Stock summed over every colour and size.
    pub fn total_stock(&self) -> u64 {
        self.colors.iter().map(|c| c.total_stock()).sum()
    }

    /// Distinct size tokens across all colours, in first-seen order.
    pub fn available_sizes(&self) -> Vec<&str> {
        let mut sizes: Vec<&str> = Vec::new();
        for row in self.colors.iter().flat_map(|c| c.sizes.iter()) {
            if !sizes.contains(&row.size.as_str()) {
                sizes.push(&row.size);
            }
        }
        sizes
    }
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One colour of a product with its size/stock rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorVariant {
    /// Hex string (`#1e3a8a`) or colour name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub color: String,
    /// Sizes available in this colour.
    #[serde(default)]
    pub sizes: Vec<SizeStock>,
}

impl ColorVariant {
    pub fn new(color: impl Into<String>, sizes: Vec<SizeStock>) -> Self {
        Self {
            color: color.into(),
            sizes,
        }
    }

    /// Check whether this colour offers `size`.
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s.size == size)
    }

    /// Stock summed over all sizes of this colour.
    pub fn total_stock(&self) -> u64 {
        self.sizes.iter().map(|s| s.stock as u64).sum()
    }
}

/// A size token and its stock count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SizeStock {
    /// Size token (`S`, `M`, `XL`, `32`...).
    #[serde(default, deserialize_with = "lenient_string")]
    pub size: String,
    /// Units in stock.
    #[serde(default, deserialize_with = "lenient_stock")]
    pub stock: u32,
}

impl SizeStock {
    pub fn new(size: impl Into<String>, stock: u32) -> Self {
        Self {
            size: size.into(),
            stock,
        }
    }
}

/// Specification values of a product, keyed by specification name.
///
/// Values the admin left empty come back as `null` and read as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Features(BTreeMap<String, serde_json::Value>);

impl Features {
    /// Create an empty feature map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a feature value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0
            .insert(key.into(), serde_json::Value::String(value.into()));
    }

    /// Builder-style variant of [`Features::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a non-empty string feature.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
    }

    /// Iterate over the string-valued features.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.as_str(), s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT_JSON: &str = r##"{
        "_id": "p1",
        "title": "Linen Shirt",
        "description": "Breathable linen",
        "images": ["https://cdn.example.com/p1.jpg"],
        "actualPrice": 1000,
        "discount": "20",
        "offerPrice": 800,
        "category": {"_id": "c1", "name": "Shirts"},
        "subcategory": [{"_id": "s1", "title": "Casual"}, {"_id": "s2", "title": "Summer"}],
        "colors": [
            {"color": "#ffffff", "sizes": [{"size": "M", "stock": 4}, {"size": "L", "stock": "2"}]},
            {"color": "navy", "sizes": [{"size": "M", "stock": 1}]}
        ],
        "features": {"material": "Linen", "fit": null},
        "isLatestProduct": true,
        "isOfferProduct": false,
        "isFeaturedProduct": null,
        "freeDelivery": true,
        "averageRating": 4.5,
        "isInWishlist": true
    }"##;

    #[test]
    fn test_product_deserialization_normalises_shapes() {
        let product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.discount, 20.0);
        assert_eq!(product.categories.len(), 1);
        assert_eq!(product.subcategories.len(), 2);
        assert!(product.is_latest);
        assert!(!product.is_featured);
        assert!(product.is_in_wishlist);
        assert_eq!(product.colors[0].sizes[1].stock, 2);
    }

    #[test]
    fn test_product_lookups() {
        let product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();
        assert!(product.in_category(&CategoryId::new("c1")));
        assert!(!product.in_category(&CategoryId::new("c2")));
        assert!(product.in_subcategory(&SubcategoryId::new("s2")));
        assert!(product.has_size("L"));
        assert!(!product.has_size("XL"));
        assert_eq!(product.material(), Some("Linen"));
        assert_eq!(product.features.get("fit"), None);
        assert_eq!(product.primary_category_name(), Some("Shirts"));
        assert_eq!(product.subcategory_titles(), "Casual, Summer");
        assert_eq!(product.total_stock(), 7);
        assert_eq!(product.available_sizes(), vec!["M", "L"]);
    }

    #[test]
    fn test_legacy_stock_row_keeps_the_list() {
        let products: Vec<Product> = serde_json::from_str(
            r#"[
                {"_id": "p1", "colors": [{"color": "red", "sizes": [{"size": "M", "stock": 2.5}, {"size": "L", "stock": -3}]}]},
                {"_id": "p2", "colors": [{"color": "blue", "sizes": [{"size": "S", "stock": 5}]}]}
            ]"#,
        )
        .unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].colors[0].sizes[0].stock, 2);
        assert_eq!(products[0].colors[0].sizes[1].stock, 0);
        assert_eq!(products[1].total_stock(), 5);
    }

    #[test]
    fn test_product_with_virtual_ids() {
        let product: Product = serde_json::from_str(
            r#"{
                "_id": "p1", "id": "p1", "title": "Kurta",
                "category": {"_id": "men", "id": "men", "name": "Men"},
                "subcategory": [{"_id": "s1", "id": "s1", "title": "Casual"}]
            }"#,
        )
        .unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert!(product.in_category(&CategoryId::new("men")));
        assert_eq!(product.primary_category_name(), Some("Men"));
        assert!(product.in_subcategory(&SubcategoryId::new("s1")));
    }

    #[test]
    fn test_product_without_id_fails() {
        assert!(serde_json::from_str::<Product>(r#"{"title": "Kurta"}"#).is_err());
    }

    #[test]
    fn test_minimal_product() {
        let product: Product = serde_json::from_str(r#"{"id": "p2"}"#).unwrap();
        assert_eq!(product.id.as_str(), "p2");
        assert!(product.categories.is_empty());
        assert_eq!(product.offer_price, 0.0);
        assert_eq!(product.material(), None);
    }
}
