//! Account repository: CRUD plus the atomic ledger mutation commit.
//!
//! A mutation is one database transaction: read the snapshots, plan with
//! `LedgerService`, write the new balances guarded by the optimistic
//! `version` check, append the entries, commit. A lost version check
//! rolls everything back and the whole cycle retries a bounded number of
//! times before `ConcurrentModification` surfaces.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, info};
use uuid::Uuid;

use clubdesk_core::ledger::{
    AccountSnapshot, LedgerError, LedgerService, MutationKind, MutationPlan, MutationRequest,
};
use clubdesk_shared::types::AccountId;

use crate::entities::{account_entries, accounts};

/// Attempts per mutation before `ConcurrentModification` surfaces.
const MAX_MUTATION_ATTEMPTS: u32 = 3;

/// Error types for account CRUD operations.
///
/// Mutation commits use `LedgerError` instead, so business-rule failures
/// keep their spec-level taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// An account with this name already exists.
    #[error("Account name '{0}' already exists")]
    DuplicateName(String),

    /// Initial balance below zero.
    #[error("Initial balance must not be negative")]
    NegativeInitialBalance,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Display name (unique).
    pub name: String,
    /// Starting balance (must be non-negative).
    pub initial_balance: Decimal,
}

/// An account with its full ordered entry history.
#[derive(Debug, Clone)]
pub struct AccountWithEntries {
    /// The account row.
    pub account: accounts::Model,
    /// Entries in insertion (= chronological) order.
    pub entries: Vec<account_entries::Model>,
}

/// Result of a committed mutation.
#[derive(Debug, Clone)]
pub struct AppliedMutation {
    /// The target account after the commit.
    pub account: accounts::Model,
    /// The entries appended by this mutation (target side first).
    pub entries: Vec<account_entries::Model>,
}

/// Account repository.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account with an initial balance and empty history.
    ///
    /// # Errors
    ///
    /// Returns `NegativeInitialBalance`, `DuplicateName`, or a database
    /// error.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        if input.initial_balance < Decimal::ZERO {
            return Err(AccountError::NegativeInitialBalance);
        }

        let existing = accounts::Entity::find()
            .filter(accounts::Column::Name.eq(input.name.clone()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AccountError::DuplicateName(input.name));
        }

        let now = Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            balance: Set(input.initial_balance),
            version: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let account = account.insert(&self.db).await?;
        info!(account_id = %account.id, name = %account.name, "Account created");
        Ok(account)
    }

    /// Lists all accounts, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list_accounts(&self) -> Result<Vec<accounts::Model>, AccountError> {
        let accounts = accounts::Entity::find()
            .order_by_asc(accounts::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(accounts)
    }

    /// Gets an account by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn get_account(&self, account_id: Uuid) -> Result<accounts::Model, AccountError> {
        accounts::Entity::find_by_id(account_id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(account_id))
    }

    /// Gets an account together with its full ordered history.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn get_account_with_entries(
        &self,
        account_id: Uuid,
    ) -> Result<AccountWithEntries, AccountError> {
        let account = self.get_account(account_id).await?;

        let entries = account_entries::Entity::find()
            .filter(account_entries::Column::AccountId.eq(account_id))
            .order_by_asc(account_entries::Column::Position)
            .all(&self.db)
            .await?;

        Ok(AccountWithEntries { account, entries })
    }

    /// Applies a credit, debit, or transfer against the target account.
    ///
    /// The commit is atomic: both sides of a transfer update together or
    /// not at all, and no entry is appended on any failure path.
    ///
    /// # Errors
    ///
    /// Returns the `LedgerError` taxonomy: business-rule failures
    /// (`InvalidAmount`, `InsufficientBalance`, `MissingCounterparty`,
    /// `SelfTransfer`, `AccountNotFound`) and the retryable
    /// `ConcurrentModification` / `Store` failures.
    pub async fn apply_mutation(
        &self,
        account_id: Uuid,
        request: &MutationRequest,
    ) -> Result<AppliedMutation, LedgerError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_apply(account_id, request).await {
                Err(LedgerError::ConcurrentModification) if attempt < MAX_MUTATION_ATTEMPTS => {
                    debug!(
                        account_id = %account_id,
                        attempt,
                        "lost optimistic version check, retrying mutation"
                    );
                }
                Ok(applied) => {
                    info!(
                        account_id = %account_id,
                        kind = ?request.kind,
                        amount = %request.amount,
                        "Mutation committed"
                    );
                    return Ok(applied);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One read-plan-write cycle inside a single database transaction.
    async fn try_apply(
        &self,
        account_id: Uuid,
        request: &MutationRequest,
    ) -> Result<AppliedMutation, LedgerError> {
        let txn = self.db.begin().await.map_err(store_error)?;

        let target = load_account(&txn, account_id).await?;

        let counterparty = match (request.kind, request.transfer_to_account) {
            (MutationKind::Transfer, Some(destination)) => {
                Some(load_account(&txn, destination.into_inner()).await?)
            }
            (MutationKind::Transfer, None) => return Err(LedgerError::MissingCounterparty),
            _ => None,
        };

        // Version of every row read in this transaction, keyed by id; the
        // balance writes below must match these exact versions.
        let mut versions: HashMap<Uuid, i64> = HashMap::new();
        versions.insert(target.id, target.version);
        if let Some(model) = &counterparty {
            versions.insert(model.id, model.version);
        }

        let plan = LedgerService::plan(
            &snapshot_of(&target),
            counterparty.as_ref().map(snapshot_of).as_ref(),
            request,
            Utc::now(),
        )?;

        let entries = self.write_plan(&txn, &plan, &versions).await?;

        txn.commit().await.map_err(store_error)?;

        let account = accounts::Entity::find_by_id(account_id)
            .one(&self.db)
            .await
            .map_err(store_error)?
            .ok_or_else(|| LedgerError::AccountNotFound(AccountId::from_uuid(account_id)))?;

        Ok(AppliedMutation { account, entries })
    }

    /// Writes every change of the plan: guarded balance update plus entry
    /// append. Updates run in account-id order so concurrent transfers
    /// take row locks in a stable order.
    async fn write_plan(
        &self,
        txn: &DatabaseTransaction,
        plan: &MutationPlan,
        versions: &HashMap<Uuid, i64>,
    ) -> Result<Vec<account_entries::Model>, LedgerError> {
        let now = Utc::now();

        let mut ordered: Vec<usize> = (0..plan.changes.len()).collect();
        ordered.sort_by_key(|&i| plan.changes[i].account_id);

        let mut inserted: Vec<Option<account_entries::Model>> = vec![None; plan.changes.len()];

        for i in ordered {
            let change = &plan.changes[i];
            let id = change.account_id.into_inner();
            let version = versions[&id];

            let update = accounts::Entity::update_many()
                .col_expr(accounts::Column::Balance, Expr::value(change.new_balance))
                .col_expr(accounts::Column::Version, Expr::value(version + 1))
                .col_expr(
                    accounts::Column::UpdatedAt,
                    Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(now)),
                )
                .filter(accounts::Column::Id.eq(id))
                .filter(accounts::Column::Version.eq(version))
                .exec(txn)
                .await
                .map_err(store_error)?;

            if update.rows_affected == 0 {
                // Someone committed between our read and this write.
                return Err(LedgerError::ConcurrentModification);
            }

            let position = next_position(txn, id).await?;
            let entry = &change.entry;

            let model = account_entries::ActiveModel {
                id: Set(entry.id.clone()),
                account_id: Set(id),
                entry_type: Set(entry.entry_type.into()),
                amount: Set(entry.amount),
                description: Set(entry.description.clone()),
                transfer_to_account: Set(entry.transfer_to_account.map(AccountId::into_inner)),
                transfer_from_account: Set(entry.transfer_from_account.map(AccountId::into_inner)),
                position: Set(position),
                entry_date: Set(entry.entry_date.into()),
                created_at: Set(now.into()),
            };

            inserted[i] = Some(model.insert(txn).await.map_err(store_error)?);
        }

        // Plan order (target first), not lock order.
        Ok(inserted.into_iter().flatten().collect())
    }
}

/// Loads an account row inside the transaction.
async fn load_account(
    txn: &DatabaseTransaction,
    account_id: Uuid,
) -> Result<accounts::Model, LedgerError> {
    accounts::Entity::find_by_id(account_id)
        .one(txn)
        .await
        .map_err(store_error)?
        .ok_or_else(|| LedgerError::AccountNotFound(AccountId::from_uuid(account_id)))
}

/// Next append position for an account, computed inside the transaction.
async fn next_position(txn: &DatabaseTransaction, account_id: Uuid) -> Result<i64, LedgerError> {
    let last = account_entries::Entity::find()
        .filter(account_entries::Column::AccountId.eq(account_id))
        .order_by_desc(account_entries::Column::Position)
        .limit(1)
        .one(txn)
        .await
        .map_err(store_error)?;

    Ok(last.map_or(1, |entry| entry.position + 1))
}

fn snapshot_of(model: &accounts::Model) -> AccountSnapshot {
    AccountSnapshot {
        id: AccountId::from_uuid(model.id),
        name: model.name.clone(),
        balance: model.balance,
    }
}

fn store_error(err: DbErr) -> LedgerError {
    LedgerError::Store(err.to_string())
}
