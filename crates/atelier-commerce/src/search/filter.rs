//! Product filters.

use serde::Serialize;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{CategoryId, SubcategoryId};

/// Inclusive offer price bounds. The default range accepts any
/// non-negative price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Create a range, rejecting `min > max` and NaN bounds.
    pub fn new(min: f64, max: f64) -> Result<Self, CommerceError> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(CommerceError::InvalidPriceRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Range with no upper bound.
    pub fn at_least(min: f64) -> Self {
        Self {
            min,
            max: f64::INFINITY,
        }
    }

    /// Check whether `price` falls inside the range.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }

    /// Check whether this is the unfiltered default.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::at_least(0.0)
    }
}

/// A single product filter.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum Filter {
    /// Product lists this category.
    Category(CategoryId),
    /// Product lists this subcategory. Independent of the category filter.
    Subcategory(SubcategoryId),
    /// Some colour offers this size.
    Size(String),
    /// `features.material` equals this value.
    Material(String),
    /// Offer price within bounds.
    PriceRange(PriceRange),
}

impl Filter {
    /// Create a category filter.
    pub fn category(id: impl Into<CategoryId>) -> Self {
        Filter::Category(id.into())
    }

    /// Create a subcategory filter.
    pub fn subcategory(id: impl Into<SubcategoryId>) -> Self {
        Filter::Subcategory(id.into())
    }

    /// Create a size filter.
    pub fn size(size: impl Into<String>) -> Self {
        Filter::Size(size.into())
    }

    /// Create a material filter.
    pub fn material(material: impl Into<String>) -> Self {
        Filter::Material(material.into())
    }

    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(id) => product.in_category(id),
            Filter::Subcategory(id) => product.in_subcategory(id),
            Filter::Size(size) => product.has_size(size),
            Filter::Material(material) => product.material() == Some(material.as_str()),
            Filter::PriceRange(range) => range.contains(product.offer_price),
        }
    }
}

/// Filter choices on the category page.
///
/// Transient: reset whenever the page's category context changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSelection {
    pub category: Option<CategoryId>,
    pub subcategory: Option<SubcategoryId>,
    pub size: Option<String>,
    pub material: Option<String>,
    pub price_range: PriceRange,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a category; any subcategory choice is dropped.
    pub fn select_category(&mut self, category: Option<CategoryId>) {
        self.category = category;
        self.subcategory = None;
    }

    pub fn select_subcategory(&mut self, subcategory: Option<SubcategoryId>) {
        self.subcategory = subcategory;
    }

    pub fn select_size(&mut self, size: Option<String>) {
        self.size = size;
    }

    pub fn select_material(&mut self, material: Option<String>) {
        self.material = material;
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.price_range = range;
    }

    /// Back to defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.attribute_filters().is_empty() && self.price_range.is_default()
    }

    /// The filters this selection turns on.
    ///
    /// The price range is always applied, even at its default, so a
    /// product with a negative offer price never shows.
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = self.attribute_filters();
        filters.push(Filter::PriceRange(self.price_range));
        filters
    }

    fn attribute_filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        if let Some(id) = &self.category {
            filters.push(Filter::Category(id.clone()));
        }
        if let Some(id) = &self.subcategory {
            filters.push(Filter::Subcategory(id.clone()));
        }
        if let Some(size) = &self.size {
            filters.push(Filter::Size(size.clone()));
        }
        if let Some(material) = &self.material {
            filters.push(Filter::Material(material.clone()));
        }
        filters
    }
}

/// Client-side filter over an already fetched product list.
#[derive(Debug, Clone, Default)]
pub struct ProductFilterEngine {
    products: Vec<Product>,
}

impl ProductFilterEngine {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Every product, unfiltered.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Replace the product list (after a re-fetch).
    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    /// Products passing every filter in `selection`, in original order.
    pub fn filter(&self, selection: &FilterSelection) -> Vec<&Product> {
        let visible = self.filter_with(&selection.filters());
        tracing::debug!(
            total = self.products.len(),
            visible = visible.len(),
            "applied product filters"
        );
        visible
    }

    /// Products passing every filter in `filters`, in original order.
    pub fn filter_with(&self, filters: &[Filter]) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| filters.iter().all(|f| f.matches(p)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategoryRef, ColorVariant, Features, SizeStock, SubcategoryRef};

    fn product(id: &str, category: &str, size: &str) -> Product {
        let mut p = Product::new(id, id);
        p.categories = vec![CategoryRef::new(category)];
        p.colors = vec![ColorVariant::new("#000000", vec![SizeStock::new(size, 3)])];
        p.offer_price = 500.0;
        p
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    fn sample() -> ProductFilterEngine {
        ProductFilterEngine::new(vec![
            product("1", "A", "M"),
            product("2", "B", "M"),
            product("3", "A", "L"),
        ])
    }

    #[test]
    fn test_category_filter() {
        let engine = sample();
        let mut selection = FilterSelection::new();
        selection.select_category(Some("A".into()));
        assert_eq!(ids(&engine.filter(&selection)), vec!["1", "3"]);
    }

    #[test]
    fn test_category_and_size_filter() {
        let engine = sample();
        let mut selection = FilterSelection::new();
        selection.select_category(Some("A".into()));
        selection.select_size(Some("M".into()));
        assert_eq!(ids(&engine.filter(&selection)), vec!["1"]);
    }

    #[test]
    fn test_filter_order_does_not_matter() {
        let engine = sample();
        let category = Filter::category("A");
        let size = Filter::size("M");

        let forward = engine.filter_with(&[category.clone(), size.clone()]);
        let backward = engine.filter_with(&[size, category]);
        assert_eq!(ids(&forward), ids(&backward));

        // Sequential application gives the same set too.
        let by_size: Vec<Product> = engine
            .filter_with(&[Filter::size("M")])
            .into_iter()
            .cloned()
            .collect();
        let then_category = ProductFilterEngine::new(by_size);
        assert_eq!(
            ids(&then_category.filter_with(&[Filter::category("A")])),
            ids(&forward)
        );
    }

    #[test]
    fn test_empty_selection_shows_everything() {
        let engine = sample();
        let selection = FilterSelection::new();
        assert!(selection.is_empty());
        assert_eq!(engine.filter(&selection).len(), 3);
    }

    #[test]
    fn test_subcategory_is_independent_of_category() {
        let mut p = product("4", "B", "S");
        p.subcategories = vec![SubcategoryRef::new("sub-a")];
        let engine = ProductFilterEngine::new(vec![p, product("5", "A", "S")]);

        let mut selection = FilterSelection::new();
        selection.select_subcategory(Some("sub-a".into()));
        assert_eq!(ids(&engine.filter(&selection)), vec!["4"]);
    }

    #[test]
    fn test_selecting_category_clears_subcategory() {
        let mut selection = FilterSelection::new();
        selection.select_subcategory(Some("sub-a".into()));
        selection.select_category(Some("A".into()));
        assert_eq!(selection.subcategory, None);
    }

    #[test]
    fn test_material_filter_is_exact() {
        let mut linen = product("1", "A", "M");
        linen.features = Features::new().with("material", "Linen");
        let mut cotton = product("2", "A", "M");
        cotton.features = Features::new().with("material", "linen blend");
        let engine = ProductFilterEngine::new(vec![linen, cotton]);

        assert_eq!(ids(&engine.filter_with(&[Filter::material("Linen")])), vec!["1"]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let mut cheap = product("1", "A", "M");
        cheap.offer_price = 100.0;
        let mut pricey = product("2", "A", "M");
        pricey.offer_price = 900.0;
        let engine = ProductFilterEngine::new(vec![cheap, pricey]);

        let mut selection = FilterSelection::new();
        selection.set_price_range(PriceRange::new(100.0, 500.0).unwrap());
        assert_eq!(ids(&engine.filter(&selection)), vec!["1"]);

        selection.set_price_range(PriceRange::new(100.0, 900.0).unwrap());
        assert_eq!(engine.filter(&selection).len(), 2);
    }

    #[test]
    fn test_default_range_hides_negative_prices() {
        let mut broken = product("1", "A", "M");
        broken.offer_price = -1.0;
        let engine = ProductFilterEngine::new(vec![broken]);
        assert!(engine.filter(&FilterSelection::new()).is_empty());
    }

    #[test]
    fn test_invalid_price_range() {
        assert!(PriceRange::new(10.0, 5.0).is_err());
        assert!(PriceRange::new(f64::NAN, 5.0).is_err());
        assert!(PriceRange::default().contains(1_000_000.0));
    }

    #[test]
    fn test_reset() {
        let mut selection = FilterSelection::new();
        selection.select_size(Some("M".into()));
        selection.set_price_range(PriceRange::at_least(10.0));
        assert!(!selection.is_empty());
        selection.reset();
        assert_eq!(selection, FilterSelection::default());
    }
}
