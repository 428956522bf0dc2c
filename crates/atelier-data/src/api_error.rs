//! User-facing classification of failed API calls.
//!
//! Every screen reports a failed request the same way: a payload-size
//! rejection gets a fixed message, a server-supplied message is shown
//! verbatim, and anything else collapses to a generic one.

use serde_json::Value;
use thiserror::Error;

use crate::FetchError;

/// Shown when the server rejects an upload with 413.
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "File size is too large. Please upload a smaller file.";
/// Shown when the server gives no usable message.
pub const GENERIC_MESSAGE: &str = "Something went wrong!";
/// Shown for transport failures that carry no text.
pub const NETWORK_MESSAGE: &str = "Network error. Please try again.";

/// A failed API call, classified for display.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{}", PAYLOAD_TOO_LARGE_MESSAGE)]
    PayloadTooLarge,

    /// The server explained itself; the message is shown as is.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{}", GENERIC_MESSAGE)]
    Generic { status: u16 },

    /// No response was received.
    #[error("{0}")]
    Network(String),
}

impl ApiError {
    /// Classify a non-success response from its status and raw body.
    pub fn classify(status: u16, body: &[u8]) -> Self {
        if status == 413 {
            return ApiError::PayloadTooLarge;
        }
        match server_message(body) {
            Some(message) => ApiError::Server { status, message },
            None => ApiError::Generic { status },
        }
    }

    /// Classify any fetch failure.
    pub fn from_fetch(err: &FetchError) -> Self {
        match err {
            FetchError::HttpError { status, message } => Self::classify(*status, message.as_bytes()),
            FetchError::Timeout => ApiError::Network(err.to_string()),
            FetchError::RequestError(text) | FetchError::InvalidUrl(text) => {
                if text.trim().is_empty() {
                    ApiError::Network(NETWORK_MESSAGE.to_string())
                } else {
                    ApiError::Network(text.clone())
                }
            }
            // The server answered 2xx but the body was not what we expected.
            FetchError::ParseError(_) | FetchError::JsonError(_) => ApiError::Generic { status: 200 },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::PayloadTooLarge => Some(413),
            ApiError::Server { status, .. } | ApiError::Generic { status } => Some(*status),
            ApiError::Network(_) => None,
        }
    }

    /// The text to show the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        ApiError::from_fetch(&err)
    }
}

/// First non-blank string among `message`, `msg` and `error`.
pub fn server_message(body: &[u8]) -> Option<String> {
    message_field(body, &["message", "msg", "error"])
}

/// First non-blank string field of a JSON object body, searched in order.
pub fn message_field(body: &[u8], keys: &[&str]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    keys.iter()
        .filter_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_payload_too_large() {
        let err = ApiError::classify(413, br#"{"message":"too big"}"#);
        assert_eq!(err, ApiError::PayloadTooLarge);
        assert_eq!(err.user_message(), PAYLOAD_TOO_LARGE_MESSAGE);
    }

    #[test]
    fn test_classify_server_message_verbatim() {
        let err = ApiError::classify(400, br#"{"message":"Product code already exists"}"#);
        assert_eq!(err.user_message(), "Product code already exists");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_classify_field_precedence() {
        let err = ApiError::classify(422, br#"{"error":"bad","msg":"Invalid OTP"}"#);
        assert_eq!(err.user_message(), "Invalid OTP");

        let err = ApiError::classify(500, br#"{"message":"  ","error":"boom"}"#);
        assert_eq!(err.user_message(), "boom");
    }

    #[test]
    fn test_classify_generic() {
        assert_eq!(ApiError::classify(500, b"<html>oops</html>"), ApiError::Generic { status: 500 });
        assert_eq!(ApiError::classify(404, br#"{"code":404}"#).user_message(), GENERIC_MESSAGE);
        assert_eq!(ApiError::classify(400, br#"{"message":42}"#).user_message(), GENERIC_MESSAGE);
    }

    #[test]
    fn test_from_fetch() {
        let http = FetchError::HttpError {
            status: 401,
            message: r#"{"msg":"Unauthorized"}"#.to_string(),
        };
        assert_eq!(ApiError::from_fetch(&http).user_message(), "Unauthorized");

        let net = FetchError::RequestError("connection refused".to_string());
        assert_eq!(ApiError::from_fetch(&net), ApiError::Network("connection refused".to_string()));

        let blank = FetchError::RequestError(String::new());
        assert_eq!(ApiError::from_fetch(&blank).user_message(), NETWORK_MESSAGE);

        assert_eq!(ApiError::from_fetch(&FetchError::Timeout).status(), None);
    }
}
