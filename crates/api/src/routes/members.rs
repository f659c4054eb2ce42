//! Roster routes for player and staff records.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use clubdesk_core::member::{MemberRole, MemberStatus, NewMember};
use clubdesk_db::entities::members;
use clubdesk_db::repositories::member::{
    MemberError, MemberFilter, MemberRepository, UpdateMemberInput,
};
use clubdesk_shared::types::{PageRequest, PageResponse};

/// Creates the member routes (auth middleware is applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(list_members))
        .route("/members", post(create_member))
        .route("/members/{member_id}", get(get_member))
        .route("/members/{member_id}", put(update_member))
        .route("/members/{member_id}", delete(delete_member))
}

/// Query parameters for listing members.
#[derive(Debug, Deserialize)]
pub struct ListMembersQuery {
    /// Filter by role.
    pub role: Option<String>,
    /// Filter by status.
    pub status: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// Request body for creating a member.
#[derive(Debug, Deserialize)]
pub struct CreateMemberRequest {
    /// Full display name.
    pub full_name: String,
    /// Role: player, coach, manager, staff.
    pub role: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Country of origin.
    pub country: Option<String>,
    /// Date of birth (YYYY-MM-DD).
    pub date_of_birth: Option<NaiveDate>,
    /// Date the member joined (defaults to today).
    pub joined_on: Option<NaiveDate>,
    /// Monthly membership fee.
    pub monthly_fee: Option<Decimal>,
}

/// Request body for updating a member.
#[derive(Debug, Deserialize)]
pub struct UpdateMemberRequest {
    /// New full name.
    pub full_name: Option<String>,
    /// New role.
    pub role: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// New contact phone.
    pub phone: Option<String>,
    /// New country.
    pub country: Option<String>,
    /// New monthly fee.
    pub monthly_fee: Option<Decimal>,
    /// New status: active, inactive.
    pub status: Option<String>,
}

/// Response for a member record.
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    /// Member ID.
    pub id: Uuid,
    /// Full display name.
    pub full_name: String,
    /// Role in the club.
    pub role: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Country of origin.
    pub country: Option<String>,
    /// Date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Date the member joined.
    pub joined_on: NaiveDate,
    /// Active or inactive.
    pub status: String,
    /// Monthly membership fee.
    pub monthly_fee: Option<String>,
}

impl From<members::Model> for MemberResponse {
    fn from(model: members::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            role: MemberRole::from(model.role).as_str().to_string(),
            email: model.email,
            phone: model.phone,
            country: model.country,
            date_of_birth: model.date_of_birth,
            joined_on: model.joined_on,
            status: MemberStatus::from(model.status).as_str().to_string(),
            monthly_fee: model.monthly_fee.map(|fee| fee.to_string()),
        }
    }
}

/// GET `/members` - List members with optional role/status filters.
async fn list_members(
    State(state): State<AppState>,
    Query(query): Query<ListMembersQuery>,
) -> impl IntoResponse {
    let role = match query.role.as_deref().map(MemberRole::from_str).transpose() {
        Ok(role) => role,
        Err(e) => return invalid_input("invalid_role", &e.to_string()),
    };
    let status = match query
        .status
        .as_deref()
        .map(MemberStatus::from_str)
        .transpose()
    {
        Ok(status) => status,
        Err(e) => return invalid_input("invalid_status", &e.to_string()),
    };

    let page = PageRequest::clamped(query.page, query.per_page, 100);

    let repo = MemberRepository::new((*state.db).clone());
    match repo
        .list_members(MemberFilter { role, status }, &page)
        .await
    {
        Ok((members, total)) => {
            let data: Vec<MemberResponse> =
                members.into_iter().map(MemberResponse::from).collect();
            let response = PageResponse::new(data, page.page, page.per_page, total);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list members");
            internal_error()
        }
    }
}

/// POST `/members` - Create a member record.
async fn create_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateMemberRequest>,
) -> impl IntoResponse {
    let role = match MemberRole::from_str(&payload.role) {
        Ok(role) => role,
        Err(e) => return invalid_input("invalid_role", &e.to_string()),
    };

    let input = NewMember {
        full_name: payload.full_name,
        role,
        email: payload.email,
        phone: payload.phone,
        country: payload.country,
        date_of_birth: payload.date_of_birth,
        joined_on: payload
            .joined_on
            .unwrap_or_else(|| chrono::Utc::now().date_naive()),
        monthly_fee: payload.monthly_fee,
    };

    let repo = MemberRepository::new((*state.db).clone());
    match repo.create_member(input).await {
        Ok(member) => {
            info!(
                member_id = %member.id,
                created_by = %auth.user_id(),
                "Member created"
            );
            (
                StatusCode::CREATED,
                Json(json!({ "member": MemberResponse::from(member) })),
            )
                .into_response()
        }
        Err(MemberError::Invalid(e)) => invalid_input("invalid_member", &e.to_string()),
        Err(e) => {
            error!(error = %e, "Failed to create member");
            internal_error()
        }
    }
}

/// GET `/members/{member_id}` - Get a member record.
async fn get_member(
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = MemberRepository::new((*state.db).clone());

    match repo.get_member(member_id).await {
        Ok(member) => (
            StatusCode::OK,
            Json(json!({ "member": MemberResponse::from(member) })),
        )
            .into_response(),
        Err(MemberError::NotFound(_)) => member_not_found(member_id),
        Err(e) => {
            error!(error = %e, member_id = %member_id, "Failed to load member");
            internal_error()
        }
    }
}

/// PUT `/members/{member_id}` - Update a member record.
async fn update_member(
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
    Json(payload): Json<UpdateMemberRequest>,
) -> impl IntoResponse {
    let role = match payload.role.as_deref().map(MemberRole::from_str).transpose() {
        Ok(role) => role,
        Err(e) => return invalid_input("invalid_role", &e.to_string()),
    };
    let status = match payload
        .status
        .as_deref()
        .map(MemberStatus::from_str)
        .transpose()
    {
        Ok(status) => status,
        Err(e) => return invalid_input("invalid_status", &e.to_string()),
    };

    let input = UpdateMemberInput {
        full_name: payload.full_name,
        role,
        email: payload.email,
        phone: payload.phone,
        country: payload.country,
        monthly_fee: payload.monthly_fee,
        status,
    };

    let repo = MemberRepository::new((*state.db).clone());
    match repo.update_member(member_id, input).await {
        Ok(member) => (
            StatusCode::OK,
            Json(json!({ "member": MemberResponse::from(member) })),
        )
            .into_response(),
        Err(MemberError::NotFound(_)) => member_not_found(member_id),
        Err(MemberError::Invalid(e)) => invalid_input("invalid_member", &e.to_string()),
        Err(e) => {
            error!(error = %e, member_id = %member_id, "Failed to update member");
            internal_error()
        }
    }
}

/// DELETE `/members/{member_id}` - Delete a member record.
async fn delete_member(
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = MemberRepository::new((*state.db).clone());

    match repo.delete_member(member_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(MemberError::NotFound(_)) => member_not_found(member_id),
        Err(e) => {
            error!(error = %e, member_id = %member_id, "Failed to delete member");
            internal_error()
        }
    }
}

fn member_not_found(member_id: Uuid) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "member_not_found",
            "message": format!("Member not found: {member_id}")
        })),
    )
        .into_response()
}

fn invalid_input(code: &str, message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": code, "message": message })),
    )
        .into_response()
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
