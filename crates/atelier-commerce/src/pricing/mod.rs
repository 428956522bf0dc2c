//! Price entry for the product form.
//!
//! Prices are typed by an admin as free text, so the reconciler keeps the
//! raw strings and only derives a dependent field when the inputs parse.

mod format;
mod reconciler;

pub use format::{coerce_number, fixed2};
pub use reconciler::{PriceField, PriceReconciler};
