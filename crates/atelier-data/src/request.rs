//! HTTP request builder.

use crate::form::FormData;
use crate::FetchError;
use serde::Serialize;
use std::collections::HashMap;

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Bytes(Vec<u8>),
    Multipart(FormData),
}

impl Body {
    /// The body as JSON, when it is a byte body holding JSON.
    pub fn as_json(&self) -> Option<serde_json::Value> {
        match self {
            Body::Bytes(bytes) => serde_json::from_slice(bytes).ok(),
            Body::Multipart(_) => None,
        }
    }

    pub fn as_form(&self) -> Option<&FormData> {
        match self {
            Body::Multipart(form) => Some(form),
            Body::Bytes(_) => None,
        }
    }
}

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Body>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(Body::Bytes(body.into()));
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(Body::Bytes(json));
        Ok(self)
    }

    /// Set a multipart body. The transport supplies the boundary header.
    pub fn multipart(mut self, form: FormData) -> Self {
        self.body = Some(Body::Multipart(form));
        self
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    /// Case-insensitive header lookup.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// URL path without scheme, host or query string.
    pub fn path(&self) -> &str {
        url_path(&self.url)
    }
}

/// Path component of an absolute or relative URL.
pub fn url_path(url: &str) -> &str {
    let without_scheme = match url.find("://") {
        Some(idx) => {
            let rest = &url[idx + 3..];
            match rest.find('/') {
                Some(slash) => &rest[slash..],
                None => "/",
            }
        }
        None => url,
    };
    match without_scheme.find('?') {
        Some(q) => &without_scheme[..q],
        None => without_scheme,
    }
}
