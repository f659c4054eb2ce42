//! `SeaORM` entity definitions.

pub mod account_entries;
pub mod accounts;
pub mod categories;
pub mod members;
pub mod sea_orm_active_enums;
pub mod transactions;
