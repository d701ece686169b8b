//! Donation analytics route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use paw_haven_core::{
    Amount, CampaignId, ChartPoint, CurrencyCode, DonationId, DonationRecord, DonationStats,
    Granularity, build_chart_series, compute_stats,
};

use crate::{error::AppError, state::AppState};

/// Rows returned by the listing when no limit is given.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Largest accepted listing limit.
pub const MAX_LIST_LIMIT: usize = 500;

// =============================================================================
// Query Parameters
// =============================================================================

/// Query parameters for the chart and overview endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    /// "day", "week", "month" or "year"
    pub granularity: Option<String>,
}

impl ChartQuery {
    /// Parsed granularity, defaulting to week when absent.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Analytics` for an unknown granularity.
    pub fn granularity(&self) -> Result<Granularity, AppError> {
        match self.granularity.as_deref() {
            None => Ok(Granularity::default()),
            Some(raw) => Ok(raw.parse()?),
        }
    }
}

/// Query parameters for the donation listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

impl ListQuery {
    /// Effective limit, clamped to `MAX_LIST_LIMIT`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for a zero limit.
    pub fn limit(&self) -> Result<usize, AppError> {
        match self.limit {
            None => Ok(DEFAULT_LIST_LIMIT),
            Some(0) => Err(AppError::BadRequest("limit must be positive".to_string())),
            Some(n) => Ok(n.min(MAX_LIST_LIMIT)),
        }
    }
}

// =============================================================================
// View Types
// =============================================================================

/// Donation row for the dashboard's recent-donations table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationView {
    pub id: DonationId,
    pub amount: Amount,
    pub formatted_amount: String,
    pub donor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<CampaignId>,
    pub created_at: DateTime<FixedOffset>,
}

impl DonationView {
    fn from_record(record: &DonationRecord, offset: &FixedOffset) -> Self {
        Self {
            id: record.id.clone(),
            amount: record.amount,
            formatted_amount: CurrencyCode::default().format(record.amount),
            donor: record.donor_display_name().to_string(),
            campaign_id: record.campaign_id.clone(),
            created_at: record.created_at.with_timezone(offset),
        }
    }
}

/// Everything the donations dashboard renders in one payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationOverview {
    pub stats: DonationStats,
    pub granularity: Granularity,
    pub series: Vec<ChartPoint>,
    pub generated_at: DateTime<FixedOffset>,
}

/// Compute the dashboard overview for `now`.
#[must_use]
pub fn build_overview(
    donations: &[DonationRecord],
    now: DateTime<FixedOffset>,
    granularity: Granularity,
) -> DonationOverview {
    DonationOverview {
        stats: compute_stats(donations, &now),
        granularity,
        series: build_chart_series(donations, &now, granularity),
        generated_at: now,
    }
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Most recent completed donations, newest first.
///
/// # Errors
///
/// Returns an error for a zero limit or when the backend request fails.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<DonationView>>, AppError> {
    let limit = query.limit()?;
    let donations = state.supabase().completed_donations(Some(limit)).await?;
    let offset = state.config().reporting_offset;

    tracing::debug!(count = donations.len(), limit, "Listing donations");

    Ok(Json(
        donations
            .iter()
            .map(|d| DonationView::from_record(d, &offset))
            .collect(),
    ))
}

/// Headline donation statistics.
///
/// # Errors
///
/// Returns an error when the backend request fails.
#[instrument(skip(state))]
pub async fn stats(State(state): State<AppState>) -> Result<Json<DonationStats>, AppError> {
    let donations = state.supabase().completed_donations(None).await?;
    let stats = compute_stats(&donations, &state.now());

    tracing::debug!(
        count = donations.len(),
        today_count = stats.today_count,
        "Computed donation stats"
    );

    Ok(Json(stats))
}

/// Donation chart series.
///
/// # Errors
///
/// Returns an error for an unknown granularity or when the backend request
/// fails.
#[instrument(skip(state))]
pub async fn chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<Vec<ChartPoint>>, AppError> {
    let granularity = query.granularity()?;
    let donations = state.supabase().completed_donations(None).await?;

    tracing::debug!(count = donations.len(), %granularity, "Building chart series");

    Ok(Json(build_chart_series(
        &donations,
        &state.now(),
        granularity,
    )))
}

/// Stats and chart series computed against the same `now`.
///
/// # Errors
///
/// Returns an error for an unknown granularity or when the backend request
/// fails.
#[instrument(skip(state))]
pub async fn overview(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<DonationOverview>, AppError> {
    let granularity = query.granularity()?;
    let donations = state.supabase().completed_donations(None).await?;

    Ok(Json(build_overview(&donations, state.now(), granularity)))
}
