//! Hosted backend (Supabase) REST client.
//!
//! Reads donation rows through the auto-generated REST API.
//!
//! # API Reference
//!
//! - Base URL: `{SUPABASE_URL}/rest/v1`
//! - Authentication: `apikey: <key>` plus `Authorization: Bearer <key>`
//! - Filters use query operators, e.g. `status=eq.completed`

mod types;

pub use types::*;

use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use paw_haven_core::DonationRecord;

use crate::config::SupabaseConfig;

/// REST path of the donations table, relative to the project URL.
const DONATIONS_PATH: &str = "rest/v1/donations";

/// Rows requested per page. Matches the hosted default for `max-rows`.
pub const PAGE_SIZE: usize = 1000;

/// Upper bound on pages read by one call.
const MAX_PAGES: usize = 10_000;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Unauthorized (invalid or revoked key).
    #[error("Unauthorized: invalid service role key")]
    Unauthorized,

    /// Failed to parse response or build a request.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Backend REST client.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl SupabaseClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &SupabaseConfig) -> Result<Self, SupabaseError> {
        let key = config.service_role_key.expose_secret();
        let mut headers = HeaderMap::new();

        headers.insert(
            "apikey",
            HeaderValue::from_str(key)
                .map_err(|e| SupabaseError::Parse(format!("Invalid key format: {e}")))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| SupabaseError::Parse(format!("Invalid key format: {e}")))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(SupabaseClientInner {
                client,
                base_url: config.url.clone(),
            }),
        })
    }

    /// Fetch completed donations, newest first.
    ///
    /// `limit` caps the number of rows; `None` fetches every completed row.
    /// Rows are read in pages until the backend returns an empty page, so a
    /// server-side `max-rows` cap below [`PAGE_SIZE`] does not truncate the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns error if a request fails or a response cannot be decoded.
    #[instrument(skip(self))]
    pub async fn completed_donations(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<DonationRecord>, SupabaseError> {
        let mut rows: Vec<DonationRow> = Vec::new();
        let mut pages = 0;

        loop {
            let wanted = limit.map_or(PAGE_SIZE, |limit| {
                limit.saturating_sub(rows.len()).min(PAGE_SIZE)
            });
            if wanted == 0 {
                break;
            }
            if pages == MAX_PAGES {
                tracing::warn!(
                    fetched = rows.len(),
                    pages,
                    "Stopped paging donations at the page limit"
                );
                break;
            }

            let url = self.donations_url(wanted, rows.len())?;
            let page: Vec<DonationRow> = self.get(url).await?;
            pages += 1;

            tracing::trace!(pages, count = page.len(), "Fetched donation page");
            if page.is_empty() {
                break;
            }
            rows.extend(page);
        }

        let fetched = rows.len();
        let records = completed_records(rows);
        if records.len() != fetched {
            tracing::warn!(
                fetched,
                kept = records.len(),
                "Backend returned donations that are not completed"
            );
        }

        tracing::debug!(count = records.len(), pages, "Fetched completed donations");
        Ok(records)
    }

    /// Build the query URL for one page of donations.
    fn donations_url(&self, limit: usize, offset: usize) -> Result<Url, SupabaseError> {
        let mut url = self
            .inner
            .base_url
            .join(DONATIONS_PATH)
            .map_err(|e| SupabaseError::Parse(format!("Invalid donations URL: {e}")))?;

        url.query_pairs_mut()
            .append_pair("select", DONATION_COLUMNS)
            .append_pair("status", "eq.completed")
            // `id` breaks ties so that pages never overlap
            .append_pair("order", "created_at.desc,id.desc")
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());

        Ok(url)
    }

    /// Execute a GET request and decode the JSON body.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, SupabaseError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| SupabaseError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(Self::parse_error(response).await)
    }

    /// Parse an error response from the REST API.
    async fn parse_error(response: reqwest::Response) -> SupabaseError {
        let status = response.status().as_u16();

        if status == 401 || status == 403 {
            return SupabaseError::Unauthorized;
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        // PostgREST errors are JSON objects with a `message` field
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or(body);

        SupabaseError::Api { status, message }
    }
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}
