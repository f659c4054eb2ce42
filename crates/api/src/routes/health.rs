//! Health and readiness endpoints.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use sea_orm::{ConnectionTrait, Statement};
use serde_json::json;

use crate::AppState;

/// GET `/health` - Liveness: the process is up.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "clubdesk",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET `/health/ready` - Readiness: the database answers.
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let ping = state
        .db
        .execute(Statement::from_string(
            state.db.get_database_backend(),
            "SELECT 1",
        ))
        .await;

    match ping {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ready" }))).into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unavailable",
                "message": e.to_string(),
            })),
        )
            .into_response(),
    }
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
}
