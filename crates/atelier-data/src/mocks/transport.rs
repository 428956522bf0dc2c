//! Scripted HTTP transport for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{Notify, RwLock};

use crate::request::url_path;
use crate::{FetchError, HttpTransport, Method, RequestBuilder, Response};

/// What a scripted route answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    Response(Response),
    Fail(FetchError),
}

impl MockReply {
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockReply::Response(Response::json_body(status, &value))
    }

    pub fn text(status: u16, body: &str) -> Self {
        MockReply::Response(Response::new(
            status,
            Default::default(),
            body.as_bytes().to_vec(),
        ))
    }

    pub fn fail(err: FetchError) -> Self {
        MockReply::Fail(err)
    }
}

#[derive(Debug)]
struct Route {
    method: Method,
    path: String,
    replies: VecDeque<MockReply>,
    gate: Option<Arc<Notify>>,
}

#[derive(Debug, Default)]
struct MockTransportInner {
    routes: RwLock<Vec<Route>>,
    requests: RwLock<Vec<RequestBuilder>>,
    received: Notify,
}

/// A transport that answers from a script and records every request.
///
/// Replies are queued per `(method, path)`; the last queued reply keeps
/// answering once the queue is down to one. Unscripted routes answer 404.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    inner: Arc<MockTransportInner>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for a route.
    pub async fn reply(&self, method: Method, path: &str, reply: MockReply) {
        let mut routes = self.inner.routes.write().await;
        match routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
        {
            Some(route) => route.replies.push_back(reply),
            None => routes.push(Route {
                method,
                path: path.to_string(),
                replies: VecDeque::from([reply]),
                gate: None,
            }),
        }
    }

    /// Hold every answer on a route until the returned handle is notified,
    /// once per held request (`notify_one`).
    pub async fn gate(&self, method: Method, path: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        let mut routes = self.inner.routes.write().await;
        match routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
        {
            Some(route) => route.gate = Some(Arc::clone(&gate)),
            None => routes.push(Route {
                method,
                path: path.to_string(),
                replies: VecDeque::new(),
                gate: Some(Arc::clone(&gate)),
            }),
        }
        gate
    }

    /// Every request executed so far, in order.
    pub async fn requests(&self) -> Vec<RequestBuilder> {
        self.inner.requests.read().await.clone()
    }

    /// Requests sent to one route.
    pub async fn requests_to(&self, method: Method, path: &str) -> Vec<RequestBuilder> {
        self.inner
            .requests
            .read()
            .await
            .iter()
            .filter(|r| r.method == method && url_path(&r.url) == path)
            .cloned()
            .collect()
    }

    /// Wait until at least `count` requests have arrived.
    pub async fn wait_for_requests(&self, count: usize) {
        loop {
            let notified = self.inner.received.notified();
            if self.inner.requests.read().await.len() >= count {
                return;
            }
            notified.await;
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let method = request.method;
        let path = url_path(&request.url).to_string();

        self.inner.requests.write().await.push(request);
        self.inner.received.notify_waiters();

        let (reply, gate) = {
            let mut routes = self.inner.routes.write().await;
            match routes
                .iter_mut()
                .find(|r| r.method == method && r.path == path)
            {
                Some(route) => {
                    let reply = if route.replies.len() > 1 {
                        route.replies.pop_front()
                    } else {
                        route.replies.front().cloned()
                    };
                    (reply, route.gate.clone())
                }
                None => (None, None),
            }
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }

        match reply {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Fail(err)) => Err(err),
            None => Ok(Response::new(404, Default::default(), b"not found".to_vec())),
        }
    }
}
