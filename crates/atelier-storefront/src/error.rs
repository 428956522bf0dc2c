//! Storefront errors and how loudly to report them.

use atelier_auth::AuthError;
use atelier_commerce::{CommerceError, ValidationError};
use atelier_data::{ApiError, FetchError, GENERIC_MESSAGE};
use thiserror::Error;

/// How an error should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Stops the user with an alert.
    Blocking,
    /// A passing notification; the screen stays usable.
    Notice,
}

/// Storefront error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorefrontError {
    /// The action needs a signed-in user (or admin token) and there is none.
    #[error("{0}")]
    Unauthenticated(String),

    /// Client-side validation failed; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server rejected the call or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The server answered 2xx with a body we could not read.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// The screen went away while the call was in flight.
    #[error("operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl StorefrontError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        StorefrontError::Unauthenticated(message.into())
    }

    pub fn severity(&self) -> Severity {
        match self {
            StorefrontError::Unauthenticated(_) => Severity::Blocking,
            _ => Severity::Notice,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, StorefrontError::Cancelled)
    }

    /// The messages to show, one notification each.
    pub fn user_messages(&self) -> Vec<String> {
        match self {
            StorefrontError::Validation(err) => {
                err.messages().into_iter().map(str::to_string).collect()
            }
            StorefrontError::Decode(_) => vec![GENERIC_MESSAGE.to_string()],
            StorefrontError::Cancelled => Vec::new(),
            other => vec![other.to_string()],
        }
    }
}

impl From<FetchError> for StorefrontError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::ParseError(msg) | FetchError::JsonError(msg) => StorefrontError::Decode(msg),
            other => StorefrontError::Api(ApiError::from_fetch(&other)),
        }
    }
}

impl From<serde_json::Error> for StorefrontError {
    fn from(err: serde_json::Error) -> Self {
        StorefrontError::Decode(err.to_string())
    }
}
