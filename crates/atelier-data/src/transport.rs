//! Transports that actually move requests over the wire.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::form::Part;
use crate::request::{Body, RequestBuilder};
use crate::{FetchError, Response};

/// Something that can execute a fully built request.
///
/// `FetchClient` only talks to this trait, so tests can swap in a scripted
/// transport.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// Transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let method = match request.method {
            crate::Method::Get => reqwest::Method::GET,
            crate::Method::Post => reqwest::Method::POST,
        };

        let mut req = self.client.request(method, &request.url);
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }
        req = match request.body {
            Some(Body::Bytes(bytes)) => req.body(bytes),
            Some(Body::Multipart(form)) => req.multipart(to_multipart(form.into_parts())?),
            None => req,
        };

        let response = req.send().await?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(Response::new(status, headers, body))
    }
}

fn to_multipart(parts: Vec<(String, Part)>) -> Result<reqwest::multipart::Form, FetchError> {
    let mut form = reqwest::multipart::Form::new();
    for (name, part) in parts {
        form = match part {
            Part::Text(text) => form.text(name, text),
            Part::File(file) => {
                let part = reqwest::multipart::Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.mime_type)?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}
