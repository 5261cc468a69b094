// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

type Route = (String, String);

/// A request observed by the [`MockService`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

/// A mock HTTP service that returns scripted responses based on request method and path.
///
/// Each route holds a queue of responses. Responses are handed out in order and
/// the last one repeats, so a route can model an object whose status changes
/// between polls. Clones share state, so keep one clone to inspect requests.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<Route, VecDeque<(u16, String)>>>>,
    stalled: Arc<Mutex<HashSet<Route>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            stalled: Arc::new(Mutex::new(HashSet::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
        self
    }

    /// Queue a response for GET requests matching the path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Queue a response for POST requests matching the path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    /// Queue a response for PATCH requests matching the path
    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PATCH", path, status, body)
    }

    /// Never answer GET requests to exactly this path
    pub fn stall_get(self, path: &str) -> Self {
        self.stalled
            .lock()
            .unwrap()
            .insert(("GET".to_string(), path.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// All requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests received for a method and exact path
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    fn next_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let mut responses = self.responses.lock().unwrap();

        // Exact match first, then the longest registered prefix
        let key = (method.to_string(), path.to_string());
        let key = if responses.contains_key(&key) {
            key
        } else {
            responses
                .keys()
                .filter(|(m, p)| m == method && path.starts_with(p.as_str()))
                .max_by_key(|(_, p)| p.len())
                .cloned()?
        };

        let queue = responses.get_mut(&key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let stalled = self
            .stalled
            .lock()
            .unwrap()
            .contains(&(method.clone(), path.clone()));
        let response = self.next_response(&method, &path);
        let requests = self.requests.clone();

        Box::pin(async move {
            let bytes = req
                .into_body()
                .collect()
                .await
                .map_err(Into::<tower::BoxError>::into)?
                .to_bytes();
            requests.lock().unwrap().push(RecordedRequest {
                method,
                path,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
            if stalled {
                std::future::pending::<()>().await;
            }

            let (status, body) = response.unwrap_or_else(|| (404, not_found_json("resource", "unknown")));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// An API server that accepts every request and never answers
#[derive(Clone, Copy)]
pub struct StalledService;

impl StalledService {
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }
}

impl Service<Request<Body>> for StalledService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _req: Request<Body>) -> Self::Future {
        Box::pin(std::future::pending())
    }
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    status_json(404, "NotFound", &format!("{} \"{}\" not found", resource, name))
}

/// Create a 409 conflict response
pub fn conflict_json(resource: &str, name: &str) -> String {
    status_json(
        409,
        "Conflict",
        &format!(
            "Operation cannot be fulfilled on {} \"{}\": the object has been modified",
            resource, name
        ),
    )
}

fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Wrap items in a list response
pub fn list_json(api_version: &str, kind: &str, items: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "apiVersion": api_version,
        "kind": format!("{}List", kind),
        "metadata": {"resourceVersion": "1"},
        "items": items
    })
    .to_string()
}
