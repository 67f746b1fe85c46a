//! Shared helpers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use zendesk_bulk::adapters::zendesk::{
    ApiRequest, ApiResponse, Credentials, HttpMethod, HttpTransport, ZendeskClient,
};
use zendesk_bulk::config::secret_string;
use zendesk_bulk::core::retry::RetryPolicy;
use zendesk_bulk::core::sink::RecordSink;
use zendesk_bulk::domain::{ApiError, ApiResult, Record, Result};

pub const BASE_URL: &str = "https://acme.zendesk.com";

/// Absolute API URL for a path
pub fn url(path: &str) -> String {
    format!("{BASE_URL}/api/v2/{path}")
}

/// Transport that replays scripted responses per "METHOD url" and records requests
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, VecDeque<ApiResult<ApiResponse>>>>,
    log: Mutex<Vec<(Instant, ApiRequest)>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn key(method: HttpMethod, url: &str) -> String {
        format!("{method} {url}")
    }

    /// Queues responses for a route, served in order
    pub fn on(&self, method: HttpMethod, url: &str, responses: Vec<ApiResponse>) {
        let mut routes = self.routes.lock().unwrap();
        routes
            .entry(Self::key(method, url))
            .or_default()
            .extend(responses.into_iter().map(Ok));
    }

    /// Queues a transport failure for a route
    pub fn fail(&self, method: HttpMethod, url: &str, reason: &str) {
        let mut routes = self.routes.lock().unwrap();
        routes
            .entry(Self::key(method, url))
            .or_default()
            .push_back(Err(ApiError::Transport(reason.to_string())));
    }

    pub fn requests(&self) -> Vec<(Instant, ApiRequest)> {
        self.log.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    /// Times at which `url` was requested
    pub fn times_for(&self, url: &str) -> Vec<Instant> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, r)| r.url == url)
            .map(|(t, _)| *t)
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let key = Self::key(request.method, &request.url);
        self.log
            .lock()
            .unwrap()
            .push((Instant::now(), request));

        self.routes
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Ok(ApiResponse::new(500).with_body(format!("no scripted response for {key}")))
            })
    }
}

pub fn client(transport: Arc<ScriptedTransport>) -> ZendeskClient {
    let credentials = Credentials::new("agent@acme.test", secret_string("t0k3n".to_string()));
    ZendeskClient::with_transport(
        BASE_URL,
        &credentials,
        transport,
        RetryPolicy::new(Duration::from_secs(60)),
    )
}

pub fn json_response(status: u16, body: Value) -> ApiResponse {
    ApiResponse::new(status).with_json(&body)
}

pub fn rate_limited(seconds: &str) -> ApiResponse {
    ApiResponse::new(429).with_header("Retry-After", seconds)
}

/// `n` records with consecutive ids starting at `first`
pub fn records(first: u64, n: u64) -> Vec<Value> {
    (first..first + n).map(|id| json!({ "id": id })).collect()
}

/// Sink that keeps every delivery
#[derive(Default)]
pub struct MemorySink {
    pub deliveries: Vec<Vec<Record>>,
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn deliver(&mut self, records: Vec<Record>) -> Result<()> {
        self.deliveries.push(records);
        Ok(())
    }
}
