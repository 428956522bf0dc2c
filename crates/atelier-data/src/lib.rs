//! HTTP client utilities for the Atelier storefront.
//!
//! Provides a small builder API over a pluggable [`HttpTransport`], with
//! JSON and multipart bodies and user-facing classification of failures.
//!
//! # Example
//!
//! ```rust,ignore
//! use atelier_data::{FetchClient, FormData};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Category {
//!     #[serde(rename = "_id")]
//!     id: String,
//!     name: String,
//! }
//!
//! let client = FetchClient::reqwest(std::time::Duration::from_secs(30))?
//!     .with_base_url("https://api.example.com");
//!
//! let categories: Vec<Category> = client
//!     .get("/user/category/get")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//!
//! let mut form = FormData::new();
//! form.text("title", "Linen shirt");
//! client
//!     .post("/admin/products/create-product")
//!     .bearer_auth(token)
//!     .multipart(form)
//!     .send()
//!     .await?;
//! ```

mod api_error;
mod error;
mod form;
mod request;
mod response;
mod transport;

#[cfg(any(test, feature = "test-support"))]
pub mod mocks;

pub use api_error::{
    message_field, server_message, ApiError, GENERIC_MESSAGE, NETWORK_MESSAGE,
    PAYLOAD_TOO_LARGE_MESSAGE,
};
pub use error::FetchError;
pub use form::{FilePart, FormData, Part};
pub use request::{url_path, Body, Method, RequestBuilder};
pub use response::Response;
pub use transport::{HttpTransport, ReqwestTransport};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// HTTP client for making outbound requests.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a client over the given transport.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            transport,
        }
    }

    /// Create a client over `reqwest` with the given request timeout.
    pub fn reqwest(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self::new(Arc::new(ReqwestTransport::new(timeout)?)))
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!("{}{}", base.trim_end_matches('/'), url)
                }
            }
            None => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            builder,
            transport: Arc::clone(&self.transport),
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn HttpTransport>,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Set a multipart form body.
    pub fn multipart(mut self, form: FormData) -> Self {
        self.builder = self.builder.multipart(form);
        self
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// Send the request and return the response, whatever its status.
    pub async fn send(self) -> Result<Response, FetchError> {
        let method = self.builder.method;
        let url = self.builder.url.clone();
        debug!(%method, %url, "sending request");

        let response = self.transport.execute(self.builder).await?;
        debug!(%method, %url, status = response.status, "received response");
        Ok(response)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiError, FetchClient, FetchError, FormData, HttpTransport, Method, Response};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockReply, MockTransport};

    #[tokio::test]
    async fn test_base_url_and_default_headers() {
        let mock = MockTransport::new();
        mock.reply(Method::Get, "/user/category/get", MockReply::json(200, serde_json::json!([])))
            .await;
        let client = FetchClient::new(Arc::new(mock.clone()))
            .with_base_url("https://api.example.com/")
            .with_default_header("Accept", "application/json");

        let resp = client.get("/user/category/get").send().await.unwrap();
        assert!(resp.is_success());

        let sent = mock.requests().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "https://api.example.com/user/category/get");
        assert_eq!(sent[0].header_value("accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_absolute_url_bypasses_base() {
        let mock = MockTransport::new();
        let client = FetchClient::new(Arc::new(mock.clone())).with_base_url("https://api.example.com");

        let resp = client.get("https://cdn.example.com/x").send().await.unwrap();
        // Unscripted routes answer 404.
        assert_eq!(resp.status, 404);
        assert_eq!(mock.requests().await[0].url, "https://cdn.example.com/x");
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let mock = MockTransport::new();
        mock.reply(
            Method::Post,
            "/user/wishlist/add",
            MockReply::fail(FetchError::RequestError("connection reset".into())),
        )
        .await;
        let client = FetchClient::new(Arc::new(mock));

        let err = client.post("/user/wishlist/add").send().await.unwrap_err();
        assert_eq!(ApiError::from_fetch(&err).user_message(), "connection reset");
    }
}
