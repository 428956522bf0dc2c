//! The admin "create product" form.
//!
//! Owns every field of the form, the option lists it picks from, and the
//! rules for turning it into a multipart submission.

use atelier_commerce::catalog::{
    group_specifications, subcategory_candidates, Category, Material, SizeChart,
    SpecificationKind, SpecificationOption, Subcategory,
};
use atelier_commerce::pricing::{PriceField, PriceReconciler};
use atelier_commerce::variants::AttributeMatrixEditor;
use atelier_commerce::{CategoryId, CommerceError, SizeChartId, SubcategoryId, ValidationError};
use atelier_data::{FilePart, FormData};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::api::StorefrontApi;
use crate::state::AppState;
use crate::task::{cancellable, ScreenScope};
use crate::StorefrontError;

pub const MISSING_AUTHORIZATION: &str = "Authorization is missing";
pub const IMAGE_REQUIRED: &str = "Please upload at least one product image";
pub const CATEGORY_REQUIRED: &str = "Please select at least one category";
pub const SUBCATEGORY_REQUIRED: &str = "Please select at least one subcategory";
pub const TITLE_REQUIRED: &str = "Product title is required";

/// Value sent for a specification left unselected.
const UNSET_FEATURE: &str = "null";

/// Listing flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFlags {
    pub latest: bool,
    pub offer: bool,
    pub featured: bool,
    pub free_delivery: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manufacturer {
    pub name: String,
    pub brand: String,
    pub address: String,
}

/// Everything the form offers for selection.
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
    pub categories: Vec<Category>,
    pub subcategories: Vec<Subcategory>,
    pub specifications: BTreeMap<SpecificationKind, Vec<SpecificationOption>>,
    pub materials: Vec<Material>,
    pub size_charts: Vec<SizeChart>,
}

/// Form state for creating one product.
#[derive(Debug)]
pub struct CreateProductForm {
    api: StorefrontApi,
    state: AppState,
    scope: ScreenScope,
    options: FormOptions,

    title: String,
    categories: Vec<CategoryId>,
    subcategories: Vec<SubcategoryId>,
    product_code: String,
    prices: PriceReconciler,
    flags: ProductFlags,
    description: String,
    specifications: BTreeMap<SpecificationKind, String>,
    images: Vec<FilePart>,
    matrix: AttributeMatrixEditor,
    manufacturer: Manufacturer,
    size_charts: Vec<SizeChartId>,
}

impl CreateProductForm {
    pub fn new(api: StorefrontApi, state: AppState) -> Self {
        Self {
            api,
            state,
            scope: ScreenScope::new(),
            options: FormOptions::default(),
            title: String::new(),
            categories: Vec::new(),
            subcategories: Vec::new(),
            product_code: String::new(),
            prices: PriceReconciler::new(),
            flags: ProductFlags::default(),
            description: String::new(),
            specifications: BTreeMap::new(),
            images: Vec::new(),
            matrix: AttributeMatrixEditor::new(),
            manufacturer: Manufacturer::default(),
            size_charts: Vec::new(),
        }
    }

    /// Fetch every option list concurrently.
    ///
    /// Each list loads independently; a failed one stays empty and its
    /// message is returned for display. Only cancellation is an error.
    pub async fn load_options(&mut self) -> Result<Vec<String>, StorefrontError> {
        let token = self.scope.child();
        let api = &self.api;
        let (categories, subcategories, specifications, materials, size_charts) =
            cancellable(&token, async {
                Ok(futures::join!(
                    api.admin_categories(),
                    api.admin_subcategories(),
                    api.specifications(),
                    api.materials(),
                    api.size_charts(),
                ))
            })
            .await?;

        let mut failures = Vec::new();
        let mut take = |what: &str, err: StorefrontError| {
            warn!(options = what, error = %err, "option list unavailable");
            failures.push(format!("Failed to load {}", what));
        };

        match categories {
            Ok(list) => self.options.categories = list,
            Err(err) => take("categories", err),
        }
        match subcategories {
            Ok(list) => self.options.subcategories = list,
            Err(err) => take("subcategories", err),
        }
        match specifications {
            Ok(records) => self.options.specifications = group_specifications(records),
            Err(err) => take("specifications", err),
        }
        match materials {
            Ok(list) => self.options.materials = list,
            Err(err) => take("materials", err),
        }
        match size_charts {
            Ok(list) => self.options.size_charts = list,
            Err(err) => take("size charts", err),
        }
        Ok(failures)
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn categories(&self) -> &[CategoryId] {
        &self.categories
    }

    /// Replace the selected categories. Subcategory choices are cleared.
    pub fn set_categories(&mut self, categories: Vec<CategoryId>) {
        self.categories = categories;
        self.subcategories.clear();
    }

    /// Subcategories belonging to any selected category.
    pub fn subcategory_options(&self) -> Vec<&Subcategory> {
        subcategory_candidates(&self.options.subcategories, &self.categories)
    }

    pub fn subcategories(&self) -> &[SubcategoryId] {
        &self.subcategories
    }

    pub fn set_subcategories(&mut self, subcategories: Vec<SubcategoryId>) {
        self.subcategories = subcategories;
    }

    pub fn set_product_code(&mut self, code: impl Into<String>) {
        self.product_code = code.into();
    }

    pub fn prices(&self) -> &PriceReconciler {
        &self.prices
    }

    /// Edit one price field; returns the field that was derived, if any.
    pub fn edit_price(&mut self, field: PriceField, value: impl Into<String>) -> Option<PriceField> {
        self.prices.edit(field, value)
    }

    pub fn flags(&self) -> ProductFlags {
        self.flags
    }

    pub fn flags_mut(&mut self) -> &mut ProductFlags {
        &mut self.flags
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Choices for one specification slot. Material comes from the
    /// material list when that loaded.
    pub fn specification_options(&self, kind: SpecificationKind) -> Vec<&str> {
        if kind == SpecificationKind::Material && !self.options.materials.is_empty() {
            return self.options.materials.iter().map(|m| m.name.as_str()).collect();
        }
        self.options
            .specifications
            .get(&kind)
            .map(|opts| opts.iter().map(|o| o.name.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn specification(&self, kind: SpecificationKind) -> Option<&str> {
        self.specifications.get(&kind).map(String::as_str)
    }

    /// Select a value for a slot; an empty value clears it.
    pub fn select_specification(&mut self, kind: SpecificationKind, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.specifications.remove(&kind);
        } else {
            self.specifications.insert(kind, value);
        }
    }

    pub fn images(&self) -> &[FilePart] {
        &self.images
    }

    /// Append images after those already chosen.
    pub fn add_images(&mut self, images: impl IntoIterator<Item = FilePart>) {
        self.images.extend(images);
    }

    pub fn remove_image(&mut self, index: usize) -> Result<FilePart, StorefrontError> {
        if index >= self.images.len() {
            return Err(CommerceError::ImageNotFound(index).into());
        }
        Ok(self.images.remove(index))
    }

    pub fn matrix(&self) -> &AttributeMatrixEditor {
        &self.matrix
    }

    pub fn matrix_mut(&mut self) -> &mut AttributeMatrixEditor {
        &mut self.matrix
    }

    pub fn manufacturer_mut(&mut self) -> &mut Manufacturer {
        &mut self.manufacturer
    }

    pub fn set_size_charts(&mut self, charts: Vec<SizeChartId>) {
        self.size_charts = charts;
    }

    /// Check the form in submission order.
    ///
    /// The first failing check wins, except the attribute matrix, which
    /// reports every offending field at once. A missing token is a
    /// blocking error; the rest are validation notices.
    pub fn validate(&self, token: Option<&str>) -> Result<(), StorefrontError> {
        if token.map_or(true, str::is_empty) {
            return Err(StorefrontError::unauthenticated(MISSING_AUTHORIZATION));
        }
        if self.images.is_empty() {
            return Err(ValidationError::single("images", IMAGE_REQUIRED).into());
        }
        if self.categories.is_empty() {
            return Err(ValidationError::single("category", CATEGORY_REQUIRED).into());
        }
        if self.subcategories.is_empty() {
            return Err(ValidationError::single("subcategory", SUBCATEGORY_REQUIRED).into());
        }
        self.matrix.validate()?;
        if self.title.trim().is_empty() {
            return Err(ValidationError::single("title", TITLE_REQUIRED).into());
        }
        Ok(())
    }

    /// The multipart body for submission.
    pub fn payload(&self) -> FormData {
        let mut form = FormData::new();
        form.text("folder", "Products")
            .text("title", self.title.as_str())
            .texts("category", self.categories.iter().map(|id| id.as_str()))
            .texts("subcategory", self.subcategories.iter().map(|id| id.as_str()))
            .text("product_Code", self.product_code.as_str())
            .text("actualPrice", self.prices.actual_price())
            .text("discount", self.prices.discount())
            .text("offerPrice", self.prices.submission_offer_price())
            .text("isLatestProduct", self.flags.latest.to_string())
            .text("isOfferProduct", self.flags.offer.to_string())
            .text("isFeaturedProduct", self.flags.featured.to_string())
            .text("freeDelivery", self.flags.free_delivery.to_string())
            .text("description", self.description.as_str());

        for kind in SpecificationKind::ALL {
            let value = self.specification(kind).unwrap_or(UNSET_FEATURE);
            form.text(format!("features[{}]", kind.feature_key()), value);
        }

        for image in &self.images {
            form.file("images", image.clone());
        }

        let colors = self.matrix.to_variants();
        if !colors.is_empty() {
            // Plain structs of strings and integers always serialise.
            if let Ok(json) = serde_json::to_string(&colors) {
                form.text("colors", json);
            }
        }

        form.text("manufacturerName", self.manufacturer.name.as_str())
            .text("manufacturerBrand", self.manufacturer.brand.as_str())
            .text("manufacturerAddress", self.manufacturer.address.as_str())
            .texts("sizeChartRefs", self.size_charts.iter().map(|id| id.as_str()));
        form
    }

    /// Validate, send, and reset the form on success.
    ///
    /// On failure every field is kept so the user can correct and resend.
    pub async fn submit(&mut self) -> Result<Value, StorefrontError> {
        let token = self.state.admin_token().await;
        if let Err(err) = self.validate(token.as_deref()) {
            warn!(error = %err, "product submission blocked");
            return Err(err);
        }
        let token = token.unwrap_or_default();

        let cancel = self.scope.child();
        let created = cancellable(&cancel, self.api.create_product(&token, self.payload())).await?;
        info!(title = %self.title, "product submitted");
        self.reset();
        Ok(created)
    }

    /// Back to a blank form. Loaded options are kept.
    pub fn reset(&mut self) {
        self.title.clear();
        self.categories.clear();
        self.subcategories.clear();
        self.product_code.clear();
        self.prices.reset();
        self.flags = ProductFlags::default();
        self.description.clear();
        self.specifications.clear();
        self.images.clear();
        self.matrix.reset();
        self.manufacturer = Manufacturer::default();
        self.size_charts.clear();
    }

    pub fn teardown(&self) {
        self.scope.teardown();
    }
}
