//! Transaction repository for categorized income/expense records.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::info;
use uuid::Uuid;

use clubdesk_core::category::CategoryKind;
use clubdesk_shared::types::PageRequest;

use crate::entities::{categories, members, sea_orm_active_enums, transactions};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    /// Member not found.
    #[error("Member not found: {0}")]
    MemberNotFound(Uuid),

    /// Transaction kind does not match the category's kind.
    #[error("Transaction kind '{got}' does not match category kind '{expected}'")]
    KindMismatch {
        /// The category's kind.
        expected: CategoryKind,
        /// The kind on the request.
        got: CategoryKind,
    },

    /// Amount must be greater than zero.
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Positive amount.
    pub amount: Decimal,
    /// Income or expense; must match the category's kind.
    pub kind: CategoryKind,
    /// Owning category.
    pub category_id: Uuid,
    /// Related member, if any (e.g. a fee payment).
    pub member_id: Option<Uuid>,
    /// Free-text description.
    pub description: String,
    /// Date the transaction occurred.
    pub occurred_on: NaiveDate,
}

/// Input for updating a transaction. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New description.
    pub description: Option<String>,
    /// New occurrence date.
    pub occurred_on: Option<NaiveDate>,
    /// New related member.
    pub member_id: Option<Uuid>,
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by kind.
    pub kind: Option<CategoryKind>,
    /// Filter by category.
    pub category_id: Option<Uuid>,
    /// Filter by related member.
    pub member_id: Option<Uuid>,
    /// Filter by date range start (inclusive).
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end (inclusive).
    pub date_to: Option<NaiveDate>,
}

/// Transaction repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a transaction after validating amount, category, and
    /// member references.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `CategoryNotFound`, `KindMismatch`,
    /// `MemberNotFound`, or a database error.
    pub async fn create_transaction(
        &self,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        if input.amount <= Decimal::ZERO {
            return Err(TransactionError::InvalidAmount);
        }

        let category = categories::Entity::find_by_id(input.category_id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::CategoryNotFound(input.category_id))?;

        let category_kind = CategoryKind::from(category.kind);
        if category_kind != input.kind {
            return Err(TransactionError::KindMismatch {
                expected: category_kind,
                got: input.kind,
            });
        }

        if let Some(member_id) = input.member_id {
            members::Entity::find_by_id(member_id)
                .one(&self.db)
                .await?
                .ok_or(TransactionError::MemberNotFound(member_id))?;
        }

        let now = Utc::now().into();
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            amount: Set(input.amount),
            kind: Set(sea_orm_active_enums::CategoryKind::from(input.kind)),
            category_id: Set(input.category_id),
            member_id: Set(input.member_id),
            description: Set(input.description),
            occurred_on: Set(input.occurred_on),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let transaction = transaction.insert(&self.db).await?;
        info!(
            transaction_id = %transaction.id,
            kind = ?transaction.kind,
            amount = %transaction.amount,
            "Transaction recorded"
        );
        Ok(transaction)
    }

    /// Gets a transaction by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn get_transaction(
        &self,
        transaction_id: Uuid,
    ) -> Result<transactions::Model, TransactionError> {
        transactions::Entity::find_by_id(transaction_id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(transaction_id))
    }

    /// Lists transactions with optional filters, newest first.
    ///
    /// Returns the page of transactions and the total count.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list_transactions(
        &self,
        filter: TransactionFilter,
        page: &PageRequest,
    ) -> Result<(Vec<transactions::Model>, u64), TransactionError> {
        let mut query = transactions::Entity::find();

        if let Some(kind) = filter.kind {
            query = query.filter(
                transactions::Column::Kind.eq(sea_orm_active_enums::CategoryKind::from(kind)),
            );
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(transactions::Column::CategoryId.eq(category_id));
        }
        if let Some(member_id) = filter.member_id {
            query = query.filter(transactions::Column::MemberId.eq(member_id));
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(transactions::Column::OccurredOn.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(transactions::Column::OccurredOn.lte(date_to));
        }

        let total = query.clone().count(&self.db).await?;

        let transactions = query
            .order_by_desc(transactions::Column::OccurredOn)
            .order_by_desc(transactions::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((transactions, total))
    }

    /// Updates a transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InvalidAmount`, `MemberNotFound`, or a
    /// database error.
    pub async fn update_transaction(
        &self,
        transaction_id: Uuid,
        input: UpdateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        let transaction = self.get_transaction(transaction_id).await?;

        if let Some(amount) = input.amount
            && amount <= Decimal::ZERO
        {
            return Err(TransactionError::InvalidAmount);
        }
        if let Some(member_id) = input.member_id {
            members::Entity::find_by_id(member_id)
                .one(&self.db)
                .await?
                .ok_or(TransactionError::MemberNotFound(member_id))?;
        }

        let mut active: transactions::ActiveModel = transaction.into();

        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(occurred_on) = input.occurred_on {
            active.occurred_on = Set(occurred_on);
        }
        if let Some(member_id) = input.member_id {
            active.member_id = Set(Some(member_id));
        }
        active.updated_at = Set(Utc::now().into());

        let transaction = active.update(&self.db).await?;
        Ok(transaction)
    }

    /// Deletes a transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn delete_transaction(&self, transaction_id: Uuid) -> Result<(), TransactionError> {
        let result = transactions::Entity::delete_by_id(transaction_id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(TransactionError::NotFound(transaction_id));
        }

        info!(transaction_id = %transaction_id, "Transaction deleted");
        Ok(())
    }
}
