//! Categorized income/expense transaction routes.

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
use clubdesk_core::category::CategoryKind;
use clubdesk_db::entities::transactions;
use clubdesk_db::repositories::transaction::{
    CreateTransactionInput, TransactionError, TransactionFilter, TransactionRepository,
    UpdateTransactionInput,
};
use clubdesk_shared::types::{PageRequest, PageResponse};

/// Creates the transaction routes (auth middleware is applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions", post(create_transaction))
        .route("/transactions/{transaction_id}", get(get_transaction))
        .route("/transactions/{transaction_id}", put(update_transaction))
        .route("/transactions/{transaction_id}", delete(delete_transaction))
}

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Filter by kind: income or expense.
    pub kind: Option<String>,
    /// Filter by category.
    pub category_id: Option<Uuid>,
    /// Filter by related member.
    pub member_id: Option<Uuid>,
    /// Start of date range (inclusive, YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// End of date range (inclusive, YYYY-MM-DD).
    pub to: Option<NaiveDate>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// Request body for recording a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Positive amount.
    pub amount: Decimal,
    /// Kind: income or expense; must match the category's kind.
    pub kind: String,
    /// Owning category.
    pub category_id: Uuid,
    /// Related member, if any.
    pub member_id: Option<Uuid>,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Date the transaction occurred (defaults to today).
    pub occurred_on: Option<NaiveDate>,
}

/// Request body for updating a transaction.
#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New description.
    pub description: Option<String>,
    /// New occurrence date.
    pub occurred_on: Option<NaiveDate>,
    /// New related member.
    pub member_id: Option<Uuid>,
}

/// Response for a transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Amount.
    pub amount: String,
    /// Income or expense.
    pub kind: String,
    /// Owning category.
    pub category_id: Uuid,
    /// Related member.
    pub member_id: Option<Uuid>,
    /// Description.
    pub description: String,
    /// Date the transaction occurred.
    pub occurred_on: NaiveDate,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(model: transactions::Model) -> Self {
        Self {
            id: model.id,
            amount: model.amount.to_string(),
            kind: CategoryKind::from(model.kind).as_str().to_string(),
            category_id: model.category_id,
            member_id: model.member_id,
            description: model.description,
            occurred_on: model.occurred_on,
        }
    }
}

/// GET `/transactions` - List transactions with filters, newest first.
async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<ListTransactionsQuery>,
) -> impl IntoResponse {
    let kind = match query.kind.as_deref().map(CategoryKind::from_str).transpose() {
        Ok(kind) => kind,
        Err(e) => return invalid_input("invalid_kind", &e.to_string()),
    };

    let filter = TransactionFilter {
        kind,
        category_id: query.category_id,
        member_id: query.member_id,
        date_from: query.from,
        date_to: query.to,
    };
    let page = PageRequest::clamped(query.page, query.per_page, 100);

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.list_transactions(filter, &page).await {
        Ok((transactions, total)) => {
            let data: Vec<TransactionResponse> = transactions
                .into_iter()
                .map(TransactionResponse::from)
                .collect();
            let response = PageResponse::new(data, page.page, page.per_page, total);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list transactions");
            internal_error()
        }
    }
}

/// POST `/transactions` - Record a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    let kind = match CategoryKind::from_str(&payload.kind) {
        Ok(kind) => kind,
        Err(e) => return invalid_input("invalid_kind", &e.to_string()),
    };

    let input = CreateTransactionInput {
        amount: payload.amount,
        kind,
        category_id: payload.category_id,
        member_id: payload.member_id,
        description: payload.description,
        occurred_on: payload
            .occurred_on
            .unwrap_or_else(|| chrono::Utc::now().date_naive()),
    };

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.create_transaction(input).await {
        Ok(transaction) => {
            info!(
                transaction_id = %transaction.id,
                recorded_by = %auth.user_id(),
                "Transaction recorded"
            );
            (
                StatusCode::CREATED,
                Json(json!({ "transaction": TransactionResponse::from(transaction) })),
            )
                .into_response()
        }
        Err(e @ (TransactionError::InvalidAmount | TransactionError::KindMismatch { .. })) => {
            invalid_input("invalid_transaction", &e.to_string())
        }
        Err(TransactionError::CategoryNotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "category_not_found",
                "message": format!("Category not found: {id}")
            })),
        )
            .into_response(),
        Err(TransactionError::MemberNotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "member_not_found",
                "message": format!("Member not found: {id}")
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to record transaction");
            internal_error()
        }
    }
}

/// GET `/transactions/{transaction_id}` - Get a transaction.
async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.get_transaction(transaction_id).await {
        Ok(transaction) => (
            StatusCode::OK,
            Json(json!({ "transaction": TransactionResponse::from(transaction) })),
        )
            .into_response(),
        Err(TransactionError::NotFound(_)) => transaction_not_found(transaction_id),
        Err(e) => {
            error!(error = %e, transaction_id = %transaction_id, "Failed to load transaction");
            internal_error()
        }
    }
}

/// PUT `/transactions/{transaction_id}` - Update a transaction.
async fn update_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<Uuid>,
    Json(payload): Json<UpdateTransactionRequest>,
) -> impl IntoResponse {
    let input = UpdateTransactionInput {
        amount: payload.amount,
        description: payload.description,
        occurred_on: payload.occurred_on,
        member_id: payload.member_id,
    };

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.update_transaction(transaction_id, input).await {
        Ok(transaction) => (
            StatusCode::OK,
            Json(json!({ "transaction": TransactionResponse::from(transaction) })),
        )
            .into_response(),
        Err(TransactionError::NotFound(_)) => transaction_not_found(transaction_id),
        Err(e @ TransactionError::InvalidAmount) => {
            invalid_input("invalid_transaction", &e.to_string())
        }
        Err(TransactionError::MemberNotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "member_not_found",
                "message": format!("Member not found: {id}")
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, transaction_id = %transaction_id, "Failed to update transaction");
            internal_error()
        }
    }
}

/// DELETE `/transactions/{transaction_id}` - Delete a transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.delete_transaction(transaction_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(TransactionError::NotFound(_)) => transaction_not_found(transaction_id),
        Err(e) => {
            error!(error = %e, transaction_id = %transaction_id, "Failed to delete transaction");
            internal_error()
        }
    }
}

fn transaction_not_found(transaction_id: Uuid) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "transaction_not_found",
            "message": format!("Transaction not found: {transaction_id}")
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
