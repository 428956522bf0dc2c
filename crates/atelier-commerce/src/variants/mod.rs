//! Variant entry for the product form.
//!
//! A product's purchasable variants are entered as colour groups, each with
//! one or more size/stock rows.

mod color;
mod matrix;

pub use color::{color_label, contrast_tone, parse_hex, Rgb, TextTone};
pub use matrix::{AttributeMatrixEditor, ColorGroup, SizeRow};
