//! Commerce error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Tried to remove the only colour group of the attribute matrix.
    #[error("At least one attribute field is required")]
    LastColorGroup,

    /// Tried to remove the only size row of a colour group.
    #[error("Sizes and Stock is required")]
    LastSizeRow,

    /// Colour group index out of range.
    #[error("Colour group {0} does not exist")]
    ColorGroupNotFound(usize),

    /// Size row index out of range.
    #[error("Size row {row} does not exist in colour group {group}")]
    SizeRowNotFound { group: usize, row: usize },

    /// Image index out of range.
    #[error("Image {0} does not exist")]
    ImageNotFound(usize),

    /// Unknown specification kind.
    #[error("Unknown specification kind: {0}")]
    UnknownSpecification(String),

    /// A backend record carried neither `_id` nor `id`.
    #[error("{0} record has no id")]
    MissingId(&'static str),

    /// Invalid price range (min above max).
    #[error("Invalid price range: {min} > {max}")]
    InvalidPriceRange { min: f64, max: f64 },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Client-side validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
