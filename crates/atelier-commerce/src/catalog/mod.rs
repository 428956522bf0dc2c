//! Product catalog module.
//!
//! Contains types for products, colour variants, categories, subcategories
//! and admin-defined specification options. Backend payloads are normalised
//! here so nothing downstream has to care about their shape.

mod category;
mod product;
mod reference;
mod specification;
mod wire;

pub use category::{subcategory_candidates, Category, Subcategory};
pub use product::{ColorVariant, Features, Product, SizeStock};
pub use reference::{CategoryRef, Reference, SubcategoryRef};
pub use specification::{
    group_specifications, Material, SizeChart, SpecificationKind, SpecificationOption,
    SpecificationRecord,
};
