//! Club account routes: CRUD reads plus the balance mutation endpoint.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use clubdesk_core::ledger::MutationRequest;
use clubdesk_db::entities::{account_entries, accounts};
use clubdesk_db::repositories::account::{AccountError, AccountRepository, CreateAccountInput};

/// Creates the account routes (auth middleware is applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts", post(create_account))
        .route("/accounts/{account_id}", get(get_account))
        .route("/accounts/{account_id}/mutations", post(apply_mutation))
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Account display name.
    pub name: String,
    /// Starting balance (defaults to zero).
    #[serde(rename = "initialBalance", default)]
    pub initial_balance: Option<Decimal>,
}

/// Response for an account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: Uuid,
    /// Account name.
    pub name: String,
    /// Current balance.
    pub balance: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl From<accounts::Model> for AccountResponse {
    fn from(model: accounts::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            balance: model.balance.to_string(),
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

/// Response for a ledger entry.
#[derive(Debug, Serialize)]
pub struct LedgerEntryResponse {
    /// Entry ID (correlation token, `-from`/`-to` suffixed for transfers).
    pub id: String,
    /// Entry direction.
    #[serde(rename = "type")]
    pub entry_type: &'static str,
    /// Entry amount (positive magnitude).
    pub amount: String,
    /// Entry description.
    pub description: String,
    /// Commit timestamp.
    pub date: String,
    /// Destination account for the source side of a transfer.
    #[serde(rename = "transferToAccount", skip_serializing_if = "Option::is_none")]
    pub transfer_to_account: Option<Uuid>,
    /// Source account for the destination side of a transfer.
    #[serde(rename = "transferFromAccount", skip_serializing_if = "Option::is_none")]
    pub transfer_from_account: Option<Uuid>,
    /// Per-account insertion order.
    pub position: i64,
}

impl From<account_entries::Model> for LedgerEntryResponse {
    fn from(model: account_entries::Model) -> Self {
        use clubdesk_db::entities::sea_orm_active_enums::EntryType;

        Self {
            id: model.id,
            entry_type: match model.entry_type {
                EntryType::Credit => "credit",
                EntryType::Debit => "debit",
            },
            amount: model.amount.to_string(),
            description: model.description,
            date: model.entry_date.to_rfc3339(),
            transfer_to_account: model.transfer_to_account,
            transfer_from_account: model.transfer_from_account,
            position: model.position,
        }
    }
}

/// GET `/accounts` - List accounts with balances.
async fn list_accounts(State(state): State<AppState>) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.list_accounts().await {
        Ok(accounts) => {
            let response: Vec<AccountResponse> =
                accounts.into_iter().map(AccountResponse::from).collect();
            (StatusCode::OK, Json(json!({ "accounts": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list accounts");
            internal_error()
        }
    }
}

/// POST `/accounts` - Create an account.
async fn create_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    if payload.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_name",
                "message": "Account name must not be empty"
            })),
        )
            .into_response();
    }

    let input = CreateAccountInput {
        name: payload.name,
        initial_balance: payload.initial_balance.unwrap_or(Decimal::ZERO),
    };

    match repo.create_account(input).await {
        Ok(account) => {
            info!(
                account_id = %account.id,
                created_by = %auth.user_id(),
                "Account created"
            );
            (
                StatusCode::CREATED,
                Json(json!({ "account": AccountResponse::from(account) })),
            )
                .into_response()
        }
        Err(AccountError::DuplicateName(name)) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "duplicate_name",
                "message": format!("Account name '{name}' already exists")
            })),
        )
            .into_response(),
        Err(AccountError::NegativeInitialBalance) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "negative_balance",
                "message": "Initial balance must not be negative"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create account");
            internal_error()
        }
    }
}

/// GET `/accounts/{account_id}` - Account with its full entry history.
async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.get_account_with_entries(account_id).await {
        Ok(result) => {
            let entries: Vec<LedgerEntryResponse> = result
                .entries
                .into_iter()
                .map(LedgerEntryResponse::from)
                .collect();

            (
                StatusCode::OK,
                Json(json!({
                    "account": AccountResponse::from(result.account),
                    "transactions": entries
                })),
            )
                .into_response()
        }
        Err(AccountError::NotFound(_)) => account_not_found(account_id),
        Err(e) => {
            error!(error = %e, account_id = %account_id, "Failed to load account");
            internal_error()
        }
    }
}

/// POST `/accounts/{account_id}/mutations` - Apply a credit, debit, or
/// transfer. The payload shape is the one the dashboard has always sent:
/// `{ amount, type, description, transferToAccount? }`.
async fn apply_mutation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(account_id): Path<Uuid>,
    Json(payload): Json<MutationRequest>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.apply_mutation(account_id, &payload).await {
        Ok(applied) => {
            info!(
                account_id = %account_id,
                kind = ?payload.kind,
                amount = %payload.amount,
                applied_by = %auth.user_id(),
                "Mutation applied"
            );

            let entries: Vec<LedgerEntryResponse> = applied
                .entries
                .into_iter()
                .map(LedgerEntryResponse::from)
                .collect();

            (
                StatusCode::OK,
                Json(json!({
                    "account": AccountResponse::from(applied.account),
                    "entries": entries
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(
                error = %e,
                account_id = %account_id,
                kind = ?payload.kind,
                "Mutation rejected"
            );

            let status = StatusCode::from_u16(e.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (
                status,
                Json(json!({
                    "error": e.error_code(),
                    "message": e.to_string(),
                    "retryable": e.is_retryable()
                })),
            )
                .into_response()
        }
    }
}

fn account_not_found(account_id: Uuid) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "account_not_found",
            "message": format!("Account not found: {account_id}")
        })),
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
