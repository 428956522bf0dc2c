//! Search module.
//!
//! Contains the filter selection of the category page, the conjunctive
//! product filter, and helpers for the home page product rails.

mod filter;
mod listing;

pub use filter::{Filter, FilterSelection, PriceRange, ProductFilterEngine};
pub use listing::{CategoryChip, ListingKind, ListingLimits};
