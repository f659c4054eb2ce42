//! `SeaORM` Entity for the account_entries table.
//!
//! Rows are append-only: the repository only ever inserts. `position` is
//! monotonic per account and carries the chronological order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::EntryType;

/// One immutable entry in an account's history.
///
/// `id` is a string: a correlation token, suffixed `-from`/`-to` for the
/// two sides of a transfer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "account_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub account_id: Uuid,
    pub entry_type: EntryType,
    pub amount: Decimal,
    pub description: String,
    pub transfer_to_account: Option<Uuid>,
    pub transfer_from_account: Option<Uuid>,
    pub position: i64,
    pub entry_date: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id"
    )]
    Accounts,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
