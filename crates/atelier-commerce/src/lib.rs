//! Storefront domain types and logic for Atelier.
//!
//! This crate holds everything that does not touch the network:
//!
//! - **Catalog**: products, colour/size variants, categories, subcategories,
//!   specification options
//! - **Pricing**: the actual price / discount / offer price reconciler used
//!   by the product entry form
//! - **Search**: filter selections and the client-side product filter,
//!   plus listing helpers for the home page rails
//! - **Variants**: the colour → size/stock matrix editor and colour naming
//!
//! # Example
//!
//! ```rust
//! use atelier_commerce::prelude::*;
//!
//! let mut prices = PriceReconciler::new();
//! prices.edit(PriceField::ActualPrice, "1000");
//! prices.edit(PriceField::Discount, "20");
//! assert_eq!(prices.offer_price(), "800.00");
//! ```

pub mod error;
pub mod ids;
pub mod validation;

pub mod catalog;
pub mod pricing;
pub mod search;
pub mod variants;

pub use error::CommerceError;
pub use ids::*;
pub use validation::{FieldIssue, ValidationError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::validation::{FieldIssue, ValidationError};

    // Catalog
    pub use crate::catalog::{
        Category, CategoryRef, ColorVariant, Features, Product, Reference, SizeStock,
        SpecificationKind, SpecificationOption, Subcategory, SubcategoryRef,
    };

    // Pricing
    pub use crate::pricing::{PriceField, PriceReconciler};

    // Search
    pub use crate::search::{
        CategoryChip, Filter, FilterSelection, ListingKind, ListingLimits, PriceRange,
        ProductFilterEngine,
    };

    // Variants
    pub use crate::variants::{AttributeMatrixEditor, ColorGroup, SizeRow, TextTone};
}
