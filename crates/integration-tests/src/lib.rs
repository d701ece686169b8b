//! Integration tests for Paw Haven.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p paw-haven-integration-tests
//! ```
//!
//! Each test starts an in-process stub of the backend REST API and an admin
//! server pointed at it, both on ephemeral ports. No external services are
//! needed.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::FixedOffset;
use secrecy::SecretString;
use serde_json::Value;
use url::Url;

use paw_haven_admin::config::{AdminConfig, SupabaseConfig};
use paw_haven_admin::routes::build_router;
use paw_haven_admin::state::AppState;

/// Service key the stub backend accepts.
pub const TEST_SERVICE_KEY: &str = "sb-test-Zq7vN2kLx9PwR4tY8mB3cF6hJ";

/// Most rows the stub returns per request, like PostgREST's `max-rows`.
pub const STUB_MAX_ROWS: usize = 100;

/// What the stub backend answers with.
#[derive(Debug, Clone)]
pub enum StubReply {
    /// 200 with these rows (honoring `offset`, `limit` and [`STUB_MAX_ROWS`]).
    Rows(Vec<Value>),
    /// An error status with a raw body.
    Error(StatusCode, String),
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

/// An in-process stand-in for the backend REST API.
pub struct StubBackend {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl StubBackend {
    /// Start the stub on an ephemeral port.
    pub async fn start(reply: StubReply) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            reply,
            requests: Arc::clone(&requests),
        };

        let app = Router::new()
            .route("/rest/v1/donations", get(stub_donations))
            .with_state(state);

        let addr = serve(app).await;
        Self { addr, requests }
    }

    /// Base URL to configure the admin with.
    #[must_use]
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}/", self.addr)).expect("stub URL")
    }

    /// Query parameters of every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().expect("stub lock").clone()
    }
}

async fn stub_donations(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state
        .requests
        .lock()
        .expect("stub lock")
        .push(params.clone());

    let expected_bearer = format!("Bearer {TEST_SERVICE_KEY}");
    let authorized = headers.get("apikey").is_some_and(|v| v == TEST_SERVICE_KEY)
        && headers
            .get("authorization")
            .is_some_and(|v| v == expected_bearer.as_str());
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "invalid api key").into_response();
    }

    match state.reply {
        StubReply::Rows(rows) => {
            let number = |key: &str| params.get(key).and_then(|v| v.parse::<usize>().ok());
            let offset = number("offset").unwrap_or(0);
            let limit = number("limit").unwrap_or(usize::MAX).min(STUB_MAX_ROWS);
            let rows: Vec<Value> = rows.into_iter().skip(offset).take(limit).collect();
            Json(rows).into_response()
        }
        StubReply::Error(status, body) => (status, body).into_response(),
    }
}

/// Admin configuration pointing at `backend`.
#[must_use]
pub fn admin_config(backend: Url, reporting_offset: FixedOffset) -> AdminConfig {
    AdminConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        supabase: SupabaseConfig {
            url: backend,
            service_role_key: SecretString::from(TEST_SERVICE_KEY),
        },
        reporting_offset,
        log_json: false,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// A stub backend plus an admin server wired to it.
pub struct TestContext {
    pub backend: StubBackend,
    pub admin_url: String,
    pub client: reqwest::Client,
}

impl TestContext {
    /// Start both servers, reporting in UTC.
    pub async fn new(reply: StubReply) -> Self {
        let utc = FixedOffset::east_opt(0).expect("UTC offset");
        Self::with_offset(reply, utc).await
    }

    /// Start both servers with a specific reporting offset.
    pub async fn with_offset(reply: StubReply, reporting_offset: FixedOffset) -> Self {
        let backend = StubBackend::start(reply).await;
        let state = AppState::new(admin_config(backend.url(), reporting_offset))
            .expect("Failed to create application state");
        let addr = serve(build_router(state)).await;

        Self {
            backend,
            admin_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
        }
    }

    /// GET a path on the admin server.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{path}", self.admin_url))
            .send()
            .await
            .expect("Failed to reach admin server")
    }
}

/// Serve `app` on an ephemeral loopback port and return its address.
async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server error");
    });

    addr
}
