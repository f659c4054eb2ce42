//! Category repository for income/expense category operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use clubdesk_core::category::CategoryKind;

use crate::entities::{categories, sea_orm_active_enums, transactions};

/// Error types for category operations.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    /// Category not found.
    #[error("Category not found: {0}")]
    NotFound(Uuid),

    /// A category with this name and kind already exists.
    #[error("Category '{0}' already exists")]
    DuplicateName(String),

    /// Category still has transactions attached.
    #[error("Category {0} is referenced by {1} transaction(s)")]
    InUse(Uuid, u64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    /// Display name, unique per kind.
    pub name: String,
    /// Income or expense.
    pub kind: CategoryKind,
    /// Optional description.
    pub description: Option<String>,
}

/// Input for updating a category. The kind is immutable: changing it
/// would silently reclassify every attached transaction.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Category repository.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` or a database error.
    pub async fn create_category(
        &self,
        input: CreateCategoryInput,
    ) -> Result<categories::Model, CategoryError> {
        let kind = sea_orm_active_enums::CategoryKind::from(input.kind);

        let existing = categories::Entity::find()
            .filter(categories::Column::Name.eq(input.name.clone()))
            .filter(categories::Column::Kind.eq(kind))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(CategoryError::DuplicateName(input.name));
        }

        let now = Utc::now().into();
        let category = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            kind: Set(kind),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let category = category.insert(&self.db).await?;
        info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Gets a category by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn get_category(&self, category_id: Uuid) -> Result<categories::Model, CategoryError> {
        categories::Entity::find_by_id(category_id)
            .one(&self.db)
            .await?
            .ok_or(CategoryError::NotFound(category_id))
    }

    /// Lists categories, optionally restricted to one kind.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list_categories(
        &self,
        kind: Option<CategoryKind>,
    ) -> Result<Vec<categories::Model>, CategoryError> {
        let mut query = categories::Entity::find();

        if let Some(kind) = kind {
            query = query.filter(
                categories::Column::Kind.eq(sea_orm_active_enums::CategoryKind::from(kind)),
            );
        }

        let categories = query
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await?;
        Ok(categories)
    }

    /// Updates a category's name or description.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `DuplicateName`, or a database error.
    pub async fn update_category(
        &self,
        category_id: Uuid,
        input: UpdateCategoryInput,
    ) -> Result<categories::Model, CategoryError> {
        let category = self.get_category(category_id).await?;

        if let Some(name) = &input.name
            && *name != category.name
        {
            let clash = categories::Entity::find()
                .filter(categories::Column::Name.eq(name.clone()))
                .filter(categories::Column::Kind.eq(category.kind))
                .one(&self.db)
                .await?;
            if clash.is_some() {
                return Err(CategoryError::DuplicateName(name.clone()));
            }
        }

        let mut active: categories::ActiveModel = category.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(Utc::now().into());

        let category = active.update(&self.db).await?;
        Ok(category)
    }

    /// Deletes a category that no transaction references.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InUse`, or a database error.
    pub async fn delete_category(&self, category_id: Uuid) -> Result<(), CategoryError> {
        let references = transactions::Entity::find()
            .filter(transactions::Column::CategoryId.eq(category_id))
            .count(&self.db)
            .await?;
        if references > 0 {
            return Err(CategoryError::InUse(category_id, references));
        }

        let result = categories::Entity::delete_by_id(category_id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(CategoryError::NotFound(category_id));
        }

        info!(category_id = %category_id, "Category deleted");
        Ok(())
    }
}
