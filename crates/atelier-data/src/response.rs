//! HTTP response handling.

use crate::{ApiError, FetchError};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A JSON response with the given status.
    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self::new(status, headers, value.to_string().into_bytes())
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text. Invalid UTF-8 is replaced.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Get the raw response body.
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Get a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::HttpError {
                status: self.status,
                message: self.text_lossy(),
            })
        }
    }

    /// Classify this response for display. Only meaningful for failures.
    pub fn api_error(&self) -> ApiError {
        ApiError::classify(self.status, &self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(201, b"").is_success());
        assert!(!make_response(199, b"").is_success());
        assert!(!make_response(304, b"").is_success());
        assert!(!make_response(413, b"").is_success());
    }

    #[test]
    fn test_response_text_invalid_utf8() {
        let resp = make_response(200, &[0xff, 0xfe]);
        assert!(resp.text().is_err());
        assert_eq!(resp.text_lossy(), "\u{fffd}\u{fffd}");
    }

    #[test]
    fn test_response_json() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug, PartialEq)]
        struct Wishlist {
            #[serde(rename = "isInWishlist")]
            is_in_wishlist: bool,
        }

        let resp = make_response(200, br#"{"isInWishlist": true}"#);
        let data: Wishlist = resp.json().unwrap();
        assert!(data.is_in_wishlist);

        let bad = make_response(200, b"not json");
        assert!(matches!(bad.json::<Wishlist>(), Err(FetchError::ParseError(_))));
    }

    #[test]
    fn test_json_body_header() {
        let resp = Response::json_body(201, &serde_json::json!({"ok": true}));
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.status, 201);
    }

    #[test]
    fn test_error_for_status_keeps_body() {
        let resp = make_response(400, br#"{"message":"Title is required"}"#);
        let err = resp.error_for_status().unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(ApiError::from_fetch(&err).user_message(), "Title is required");
    }

    #[test]
    fn test_api_error() {
        assert_eq!(make_response(413, b"").api_error(), ApiError::PayloadTooLarge);
    }
}
