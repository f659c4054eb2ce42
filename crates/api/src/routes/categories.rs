//! Income/expense category routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use clubdesk_core::category::CategoryKind;
use clubdesk_db::entities::categories;
use clubdesk_db::repositories::category::{
    CategoryError, CategoryRepository, CreateCategoryInput, UpdateCategoryInput,
};

/// Creates the category routes (auth middleware is applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories", post(create_category))
        .route("/categories/{category_id}", get(get_category))
        .route("/categories/{category_id}", put(update_category))
        .route("/categories/{category_id}", delete(delete_category))
}

/// Query parameters for listing categories.
#[derive(Debug, Deserialize)]
pub struct ListCategoriesQuery {
    /// Filter by kind: income or expense.
    pub kind: Option<String>,
}

/// Request body for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Display name, unique per kind.
    pub name: String,
    /// Kind: income or expense.
    pub kind: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Request body for updating a category.
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Response for a category.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    /// Category ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Income or expense.
    pub kind: String,
    /// Description.
    pub description: Option<String>,
}

impl From<categories::Model> for CategoryResponse {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            kind: CategoryKind::from(model.kind).as_str().to_string(),
            description: model.description,
        }
    }
}

/// GET `/categories` - List categories, optionally by kind.
async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<ListCategoriesQuery>,
) -> impl IntoResponse {
    let kind = match query.kind.as_deref().map(CategoryKind::from_str).transpose() {
        Ok(kind) => kind,
        Err(e) => return invalid_input("invalid_kind", &e.to_string()),
    };

    let repo = CategoryRepository::new((*state.db).clone());
    match repo.list_categories(kind).await {
        Ok(categories) => {
            let response: Vec<CategoryResponse> =
                categories.into_iter().map(CategoryResponse::from).collect();
            (StatusCode::OK, Json(json!({ "categories": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list categories");
            internal_error()
        }
    }
}

/// POST `/categories` - Create a category.
async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> impl IntoResponse {
    let kind = match CategoryKind::from_str(&payload.kind) {
        Ok(kind) => kind,
        Err(e) => return invalid_input("invalid_kind", &e.to_string()),
    };

    if payload.name.trim().is_empty() {
        return invalid_input("invalid_name", "Category name must not be empty");
    }

    let repo = CategoryRepository::new((*state.db).clone());
    let input = CreateCategoryInput {
        name: payload.name,
        kind,
        description: payload.description,
    };

    match repo.create_category(input).await {
        Ok(category) => {
            info!(
                category_id = %category.id,
                created_by = %auth.user_id(),
                "Category created"
            );
            (
                StatusCode::CREATED,
                Json(json!({ "category": CategoryResponse::from(category) })),
            )
                .into_response()
        }
        Err(CategoryError::DuplicateName(name)) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "duplicate_name",
                "message": format!("Category '{name}' already exists")
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create category");
            internal_error()
        }
    }
}

/// GET `/categories/{category_id}` - Get a category.
async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = CategoryRepository::new((*state.db).clone());

    match repo.get_category(category_id).await {
        Ok(category) => (
            StatusCode::OK,
            Json(json!({ "category": CategoryResponse::from(category) })),
        )
            .into_response(),
        Err(CategoryError::NotFound(_)) => category_not_found(category_id),
        Err(e) => {
            error!(error = %e, category_id = %category_id, "Failed to load category");
            internal_error()
        }
    }
}

/// PUT `/categories/{category_id}` - Update a category.
async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> impl IntoResponse {
    let repo = CategoryRepository::new((*state.db).clone());
    let input = UpdateCategoryInput {
        name: payload.name,
        description: payload.description,
    };

    match repo.update_category(category_id, input).await {
        Ok(category) => (
            StatusCode::OK,
            Json(json!({ "category": CategoryResponse::from(category) })),
        )
            .into_response(),
        Err(CategoryError::NotFound(_)) => category_not_found(category_id),
        Err(CategoryError::DuplicateName(name)) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "duplicate_name",
                "message": format!("Category '{name}' already exists")
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, category_id = %category_id, "Failed to update category");
            internal_error()
        }
    }
}

/// DELETE `/categories/{category_id}` - Delete an unused category.
async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = CategoryRepository::new((*state.db).clone());

    match repo.delete_category(category_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(CategoryError::NotFound(_)) => category_not_found(category_id),
        Err(CategoryError::InUse(_, count)) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "category_in_use",
                "message": format!("Category is referenced by {count} transaction(s)")
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, category_id = %category_id, "Failed to delete category");
            internal_error()
        }
    }
}

fn category_not_found(category_id: Uuid) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "category_not_found",
            "message": format!("Category not found: {category_id}")
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
