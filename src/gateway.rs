//! Data source gateway: the hospital data service behind three read
//! endpoints and one staff-notification endpoint.
//!
//! The gateway only moves JSON. It makes no attempt to interpret bodies;
//! that is the normalization layer's job, which is also where every
//! `GatewayError` ends up being absorbed into fallback data.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::config::AppConfig;

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// The three read requests the dashboard issues per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchKind {
    DashboardSummary,
    SurgePrediction,
    BedOccupancy,
}

impl FetchKind {
    pub const ALL: [FetchKind; 3] = [
        FetchKind::DashboardSummary,
        FetchKind::SurgePrediction,
        FetchKind::BedOccupancy,
    ];

    /// Endpoint path relative to the service base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::DashboardSummary => "/analytics/dashboard/",
            Self::SurgePrediction => "/surge/predict/?hours_ahead=24",
            Self::BedOccupancy => "/beds/occupancy/",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::DashboardSummary => 0,
            Self::SurgePrediction => 1,
            Self::BedOccupancy => 2,
        }
    }
}

impl std::fmt::Display for FetchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DashboardSummary => write!(f, "Dashboard summary"),
            Self::SurgePrediction => write!(f, "Surge prediction"),
            Self::BedOccupancy => write!(f, "Bed occupancy"),
        }
    }
}

pub const STAFF_NOTIFY_PATH: &str = "/staff/notify/";

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Data service is not reachable at {0}")]
    Connection(String),

    #[error("Request to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    #[error("Data service returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

/// Anything that can supply hospital data and dispatch staff alerts.
pub trait SurgeGateway: Send + Sync {
    /// Fetch the raw JSON body of one read endpoint.
    fn fetch(&self, kind: FetchKind) -> Result<Value, GatewayError>;

    /// Ask the service to notify on-call staff. No body either way.
    fn notify_staff(&self) -> Result<(), GatewayError>;
}

// ═══════════════════════════════════════════════════════════
// HttpGateway
// ═══════════════════════════════════════════════════════════

/// HTTP gateway to the hospital data service.
pub struct HttpGateway {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
    notify_timeout_secs: u64,
}

impl HttpGateway {
    /// Create a gateway. `timeout_secs` bounds reads, `notify_timeout_secs`
    /// bounds the notification POST.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        notify_timeout_secs: u64,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GatewayError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
            notify_timeout_secs,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, GatewayError> {
        Self::new(
            &config.api_base_url,
            config.http_timeout_secs,
            config.notify_timeout_secs,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send_error(&self, e: reqwest::Error, url: &str, secs: u64) -> GatewayError {
        if e.is_connect() {
            GatewayError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            GatewayError::Timeout {
                url: url.to_string(),
                secs,
            }
        } else {
            GatewayError::HttpClient(e.to_string())
        }
    }
}

impl SurgeGateway for HttpGateway {
    fn fetch(&self, kind: FetchKind) -> Result<Value, GatewayError> {
        let url = self.url(kind.path());

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.send_error(e, &url, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .map_err(|e| GatewayError::ResponseParsing(e.to_string()))
    }

    fn notify_staff(&self) -> Result<(), GatewayError> {
        let url = self.url(STAFF_NOTIFY_PATH);

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(self.notify_timeout_secs))
            .send()
            .map_err(|e| self.send_error(e, &url, self.notify_timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════
// MockGateway
// ═══════════════════════════════════════════════════════════

/// Canned answer for one endpoint of a [`MockGateway`].
#[derive(Debug, Clone)]
pub enum MockResponse {
    Body(Value),
    Status(u16),
    Unreachable,
}

impl MockResponse {
    fn to_result(&self) -> Result<Value, GatewayError> {
        match self {
            Self::Body(value) => Ok(value.clone()),
            Self::Status(status) => Err(GatewayError::Status {
                status: *status,
                body: String::new(),
            }),
            Self::Unreachable => Err(GatewayError::Connection("mock://offline".to_string())),
        }
    }
}

/// In-memory gateway for tests and offline runs. Unconfigured endpoints are
/// unreachable. Counts calls so cache behaviour can be asserted.
pub struct MockGateway {
    responses: Mutex<HashMap<FetchKind, MockResponse>>,
    notify: MockResponse,
    fetch_counts: [AtomicUsize; 3],
    notify_count: AtomicUsize,
}

impl MockGateway {
    /// A gateway where every endpoint is unreachable.
    pub fn offline() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            notify: MockResponse::Unreachable,
            fetch_counts: Default::default(),
            notify_count: AtomicUsize::new(0),
        }
    }

    pub fn with_response(self, kind: FetchKind, response: MockResponse) -> Self {
        self.set_response(kind, response);
        self
    }

    pub fn with_body(self, kind: FetchKind, body: Value) -> Self {
        self.with_response(kind, MockResponse::Body(body))
    }

    pub fn with_notify(mut self, response: MockResponse) -> Self {
        self.notify = response;
        self
    }

    /// Swap the canned answer for an endpoint after construction.
    pub fn set_response(&self, kind: FetchKind, response: MockResponse) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(kind, response);
        }
    }

    pub fn fetch_count(&self, kind: FetchKind) -> usize {
        self.fetch_counts[kind.index()].load(Ordering::SeqCst)
    }

    pub fn notify_count(&self) -> usize {
        self.notify_count.load(Ordering::SeqCst)
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::offline()
    }
}

impl SurgeGateway for MockGateway {
    fn fetch(&self, kind: FetchKind) -> Result<Value, GatewayError> {
        self.fetch_counts[kind.index()].fetch_add(1, Ordering::SeqCst);
        let response = self
            .responses
            .lock()
            .ok()
            .and_then(|responses| responses.get(&kind).cloned())
            .unwrap_or(MockResponse::Unreachable);
        response.to_result()
    }

    fn notify_staff(&self) -> Result<(), GatewayError> {
        self.notify_count.fetch_add(1, Ordering::SeqCst);
        self.notify.to_result().map(|_| ())
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
