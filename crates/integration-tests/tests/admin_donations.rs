//! Integration tests for the admin donation analytics API.
//!
//! Each test runs the admin router against an in-process backend stub.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use chrono::{Duration, FixedOffset, SecondsFormat, Utc};
use reqwest::StatusCode;
use serde_json::{Value, json};

use paw_haven_integration_tests::{StubReply, TestContext};

fn row(id: &str, amount: Value, status: &str, age: Duration) -> Value {
    json!({
        "id": id,
        "amount": amount,
        "status": status,
        "donor_first_name": null,
        "donor_email": format!("{id}@example.org"),
        "created_at": (Utc::now() - age).to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// Rows as the backend would return them, newest first.
fn sample_rows() -> Vec<Value> {
    vec![
        row("recent", json!(20), "completed", Duration::zero()),
        row("pending", json!(500), "pending", Duration::zero()),
        row("string-amount", json!("10.5"), "completed", Duration::days(40)),
        row("ancient", json!(70), "completed", Duration::days(3650)),
    ]
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new(StubReply::Rows(vec![])).await;

    let resp = ctx.get("/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

// ============================================================================
// Stats
// ============================================================================

#[tokio::test]
async fn test_stats_counts_completed_donations_only() {
    let ctx = TestContext::new(StubReply::Rows(sample_rows())).await;

    let resp = ctx.get("/api/admin/donations/stats").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let stats: Value = resp.json().await.unwrap();
    assert_eq!(stats["total"], json!(100.5));
    assert_eq!(stats["today"], json!(20.0));
    assert_eq!(stats["todayCount"], json!(1));
    assert_eq!(stats["thisWeekCount"], json!(1));
    assert_eq!(stats["average"], json!(33.5));
}

#[tokio::test]
async fn test_stats_empty_backend() {
    let ctx = TestContext::new(StubReply::Rows(vec![])).await;

    let stats: Value = ctx
        .get("/api/admin/donations/stats")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(
        stats,
        json!({
            "total": 0.0,
            "today": 0.0,
            "todayCount": 0,
            "thisWeek": 0.0,
            "thisWeekCount": 0,
            "average": 0.0
        })
    );
}

#[tokio::test]
async fn test_backend_query_filters_and_orders() {
    let ctx = TestContext::new(StubReply::Rows(vec![])).await;
    ctx.get("/api/admin/donations/stats").await;

    let requests = ctx.backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["status"], "eq.completed");
    assert_eq!(requests[0]["order"], "created_at.desc,id.desc");
    assert!(requests[0]["select"].contains("created_at"));
    assert_eq!(requests[0]["limit"], "1000");
    assert_eq!(requests[0]["offset"], "0");
}

#[tokio::test]
async fn test_stats_reads_past_backend_row_cap() {
    let rows: Vec<Value> = (0..250)
        .map(|i| row(&format!("d-{i}"), json!(1), "completed", Duration::zero()))
        .collect();
    let ctx = TestContext::new(StubReply::Rows(rows)).await;

    let stats: Value = ctx
        .get("/api/admin/donations/stats")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(stats["total"], json!(250.0));
    assert_eq!(stats["todayCount"], json!(250));

    // Pages of STUB_MAX_ROWS, then an empty page
    let offsets: Vec<String> = ctx
        .backend
        .requests()
        .iter()
        .map(|r| r["offset"].clone())
        .collect();
    assert_eq!(offsets, vec!["0", "100", "200", "250"]);
}

// ============================================================================
// Chart
// ============================================================================

#[tokio::test]
async fn test_chart_defaults_to_weekly() {
    let ctx = TestContext::new(StubReply::Rows(sample_rows())).await;

    let resp = ctx.get("/api/admin/donations/chart").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let points: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(points.len(), 8);
    assert_eq!(points[7]["amount"], json!(20.0));
}

#[tokio::test]
async fn test_chart_each_granularity_has_fixed_length() {
    let ctx = TestContext::new(StubReply::Rows(sample_rows())).await;

    for (granularity, expected) in [("day", 7), ("week", 8), ("month", 6), ("year", 5)] {
        let points: Vec<Value> = ctx
            .get(&format!("/api/admin/donations/chart?granularity={granularity}"))
            .await
            .json()
            .await
            .unwrap();

        assert_eq!(points.len(), expected, "granularity {granularity}");
        assert!(points.iter().all(|p| p["period"].is_string()));
    }
}

#[tokio::test]
async fn test_chart_year_excludes_old_donations() {
    let ctx = TestContext::new(StubReply::Rows(sample_rows())).await;

    let points: Vec<Value> = ctx
        .get("/api/admin/donations/chart?granularity=year")
        .await
        .json()
        .await
        .unwrap();

    let charted: f64 = points.iter().map(|p| p["amount"].as_f64().unwrap()).sum();
    assert!((charted - 30.5).abs() < f64::EPSILON);
    assert_eq!(
        points[4]["period"],
        json!(Utc::now().format("%Y").to_string())
    );
}

#[tokio::test]
async fn test_chart_rejects_unknown_granularity() {
    let ctx = TestContext::new(StubReply::Rows(sample_rows())).await;

    let resp = ctx
        .get("/api/admin/donations/chart?granularity=fortnight")
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.text().await.unwrap().contains("fortnight"));

    // Rejected before the backend is called
    assert!(ctx.backend.requests().is_empty());
}

// ============================================================================
// Overview
// ============================================================================

#[tokio::test]
async fn test_overview_uses_reporting_offset() {
    let offset = FixedOffset::east_opt(9 * 3600).unwrap();
    let ctx = TestContext::with_offset(StubReply::Rows(sample_rows()), offset).await;

    let overview: Value = ctx
        .get("/api/admin/donations/overview?granularity=month")
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(overview["granularity"], "month");
    assert_eq!(overview["series"].as_array().unwrap().len(), 6);
    assert_eq!(overview["stats"]["todayCount"], json!(1));
    assert!(
        overview["generatedAt"]
            .as_str()
            .unwrap()
            .ends_with("+09:00")
    );
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_list_returns_completed_donations_with_limit() {
    let ctx = TestContext::new(StubReply::Rows(sample_rows())).await;

    let resp = ctx.get("/api/admin/donations?limit=3").await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The stub ignores the status filter, so the pending row inside the
    // limit is dropped by the admin
    let donations: Vec<Value> = resp.json().await.unwrap();
    let ids: Vec<&str> = donations.iter().map(|d| d["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["recent", "string-amount"]);
    assert_eq!(donations[0]["donor"], "recent@example.org");
    assert_eq!(donations[1]["formattedAmount"], "€10.50");

    assert_eq!(ctx.backend.requests()[0]["limit"], "3");
}

#[tokio::test]
async fn test_list_default_and_zero_limit() {
    let ctx = TestContext::new(StubReply::Rows(vec![])).await;

    assert_eq!(
        ctx.get("/api/admin/donations").await.status(),
        StatusCode::OK
    );
    assert_eq!(ctx.backend.requests()[0]["limit"], "50");

    assert_eq!(
        ctx.get("/api/admin/donations?limit=0").await.status(),
        StatusCode::BAD_REQUEST
    );
}

// ============================================================================
// Backend failures
// ============================================================================

#[tokio::test]
async fn test_backend_error_maps_to_bad_gateway() {
    let ctx = TestContext::new(StubReply::Error(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"message": "relation \"donations\" does not exist"}"#.to_string(),
    ))
    .await;

    let resp = ctx.get("/api/admin/donations/stats").await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    // Upstream details stay server-side
    let body = resp.text().await.unwrap();
    assert_eq!(body, "External service error");
}

#[tokio::test]
async fn test_backend_malformed_body_maps_to_bad_gateway() {
    let ctx = TestContext::new(StubReply::Rows(vec![json!({"id": "no-date"})])).await;

    let resp = ctx.get("/api/admin/donations/chart").await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}
