//! `SeaORM` active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_type")]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Credit entry.
    #[sea_orm(string_value = "credit")]
    Credit,
    /// Debit entry.
    #[sea_orm(string_value = "debit")]
    Debit,
}

impl From<clubdesk_core::ledger::EntryType> for EntryType {
    fn from(value: clubdesk_core::ledger::EntryType) -> Self {
        match value {
            clubdesk_core::ledger::EntryType::Credit => Self::Credit,
            clubdesk_core::ledger::EntryType::Debit => Self::Debit,
        }
    }
}

impl From<EntryType> for clubdesk_core::ledger::EntryType {
    fn from(value: EntryType) -> Self {
        match value {
            EntryType::Credit => Self::Credit,
            EntryType::Debit => Self::Debit,
        }
    }
}

/// Income or expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "category_kind")]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Income category.
    #[sea_orm(string_value = "income")]
    Income,
    /// Expense category.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<clubdesk_core::category::CategoryKind> for CategoryKind {
    fn from(value: clubdesk_core::category::CategoryKind) -> Self {
        match value {
            clubdesk_core::category::CategoryKind::Income => Self::Income,
            clubdesk_core::category::CategoryKind::Expense => Self::Expense,
        }
    }
}

impl From<CategoryKind> for clubdesk_core::category::CategoryKind {
    fn from(value: CategoryKind) -> Self {
        match value {
            CategoryKind::Income => Self::Income,
            CategoryKind::Expense => Self::Expense,
        }
    }
}

/// Role of a club member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "member_role")]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Registered player.
    #[sea_orm(string_value = "player")]
    Player,
    /// Coaching staff.
    #[sea_orm(string_value = "coach")]
    Coach,
    /// Team or club manager.
    #[sea_orm(string_value = "manager")]
    Manager,
    /// Other staff.
    #[sea_orm(string_value = "staff")]
    Staff,
}

impl From<clubdesk_core::member::MemberRole> for MemberRole {
    fn from(value: clubdesk_core::member::MemberRole) -> Self {
        match value {
            clubdesk_core::member::MemberRole::Player => Self::Player,
            clubdesk_core::member::MemberRole::Coach => Self::Coach,
            clubdesk_core::member::MemberRole::Manager => Self::Manager,
            clubdesk_core::member::MemberRole::Staff => Self::Staff,
        }
    }
}

impl From<MemberRole> for clubdesk_core::member::MemberRole {
    fn from(value: MemberRole) -> Self {
        match value {
            MemberRole::Player => Self::Player,
            MemberRole::Coach => Self::Coach,
            MemberRole::Manager => Self::Manager,
            MemberRole::Staff => Self::Staff,
        }
    }
}

/// Whether a member is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "member_status")]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    /// Member is active.
    #[sea_orm(string_value = "active")]
    Active,
    /// Member has left or been deactivated.
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

impl From<clubdesk_core::member::MemberStatus> for MemberStatus {
    fn from(value: clubdesk_core::member::MemberStatus) -> Self {
        match value {
            clubdesk_core::member::MemberStatus::Active => Self::Active,
            clubdesk_core::member::MemberStatus::Inactive => Self::Inactive,
        }
    }
}

impl From<MemberStatus> for clubdesk_core::member::MemberStatus {
    fn from(value: MemberStatus) -> Self {
        match value {
            MemberStatus::Active => Self::Active,
            MemberStatus::Inactive => Self::Inactive,
        }
    }
}
