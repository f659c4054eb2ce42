//! Tabular report routes.
//!
//! Aggregation happens in `clubdesk_core::reports`; these handlers fetch
//! the rows for the requested window and serve the numbers. Chart and
//! spreadsheet rendering is the dashboard's problem.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::AppState;
use clubdesk_core::reports::ReportService;
use clubdesk_db::repositories::report::ReportRepository;

/// Creates the report routes (auth middleware is applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/summary", get(summary))
        .route("/reports/by-category", get(by_category))
        .route("/reports/monthly", get(monthly))
}

/// Query parameters shared by all report endpoints.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Start of the reporting window (inclusive, YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// End of the reporting window (inclusive, YYYY-MM-DD).
    pub to: Option<NaiveDate>,
}

/// GET `/reports/summary` - Income/expense/net totals.
async fn summary(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    let repo = ReportRepository::new((*state.db).clone());

    match repo.fetch_rows(query.from, query.to).await {
        Ok(rows) => {
            let summary = ReportService::summarize(&rows);
            (StatusCode::OK, Json(json!({ "summary": summary }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to build summary report");
            internal_error()
        }
    }
}

/// GET `/reports/by-category` - Per-category totals, largest first.
async fn by_category(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    let repo = ReportRepository::new((*state.db).clone());

    match repo.fetch_rows(query.from, query.to).await {
        Ok(rows) => {
            let totals = ReportService::by_category(&rows);
            (StatusCode::OK, Json(json!({ "categories": totals }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to build category report");
            internal_error()
        }
    }
}

/// GET `/reports/monthly` - Calendar-month buckets, oldest first.
async fn monthly(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    let repo = ReportRepository::new((*state.db).clone());

    match repo.fetch_rows(query.from, query.to).await {
        Ok(rows) => {
            let months = ReportService::monthly(&rows);
            (StatusCode::OK, Json(json!({ "months": months }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to build monthly report");
            internal_error()
        }
    }
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}
