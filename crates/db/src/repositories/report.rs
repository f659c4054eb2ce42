//! Report repository: fetches transaction rows for aggregation.
//!
//! Aggregation itself is pure logic in `clubdesk_core::reports`; this
//! repository only joins transactions with their category names.

use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use clubdesk_core::reports::TransactionRow;
use clubdesk_shared::types::CategoryId;

use crate::entities::{categories, transactions};

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches transaction rows in the given date window, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a database error if a query fails.
    pub async fn fetch_rows(
        &self,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<Vec<TransactionRow>, DbErr> {
        let category_names: HashMap<Uuid, String> = categories::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let mut query = transactions::Entity::find();
        if let Some(from) = date_from {
            query = query.filter(transactions::Column::OccurredOn.gte(from));
        }
        if let Some(to) = date_to {
            query = query.filter(transactions::Column::OccurredOn.lte(to));
        }

        let rows = query
            .order_by_asc(transactions::Column::OccurredOn)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|t| TransactionRow {
                amount: t.amount,
                kind: t.kind.into(),
                category_id: CategoryId::from_uuid(t.category_id),
                category_name: category_names
                    .get(&t.category_id)
                    .cloned()
                    .unwrap_or_default(),
                occurred_on: t.occurred_on,
            })
            .collect();

        Ok(rows)
    }
}
