//! Database seeder for Clubdesk development and testing.
//!
//! Seeds demo accounts, members, and transactions against the categories
//! created by the initial migration.
//!
//! Usage: cargo run --bin seeder

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::str::FromStr;
use uuid::Uuid;

use clubdesk_db::entities::{
    accounts, categories, members, transactions,
    sea_orm_active_enums::{CategoryKind, MemberRole, MemberStatus},
};

/// Operations account ID (consistent for all seeds)
const OPERATIONS_ACCOUNT_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Youth-fund account ID (consistent for all seeds)
const YOUTH_ACCOUNT_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = clubdesk_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding accounts...");
    seed_accounts(&db).await;

    println!("Seeding members...");
    seed_members(&db).await;

    println!("Seeding transactions...");
    seed_transactions(&db).await;

    println!("Seeding complete!");
}

fn operations_account_id() -> Uuid {
    Uuid::parse_str(OPERATIONS_ACCOUNT_ID).unwrap()
}

fn youth_account_id() -> Uuid {
    Uuid::parse_str(YOUTH_ACCOUNT_ID).unwrap()
}

/// Seeds the two demo club accounts.
async fn seed_accounts(db: &DatabaseConnection) {
    if accounts::Entity::find_by_id(operations_account_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Accounts already exist, skipping...");
        return;
    }

    let now = Utc::now().into();
    let seed = [
        (operations_account_id(), "Operations", "2500.00"),
        (youth_account_id(), "Youth fund", "800.00"),
    ];

    for (id, name, balance) in seed {
        let account = accounts::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            balance: Set(Decimal::from_str(balance).unwrap()),
            version: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
        };
        account.insert(db).await.expect("Failed to seed account");
    }
}

/// Seeds a handful of roster records.
async fn seed_members(db: &DatabaseConnection) {
    let existing = members::Entity::find().one(db).await.ok().flatten();
    if existing.is_some() {
        println!("  Members already exist, skipping...");
        return;
    }

    let now = Utc::now().into();
    let seed = [
        ("Nadia Petrova", MemberRole::Player, "BG", "30.00"),
        ("Tomas Lindqvist", MemberRole::Player, "SE", "30.00"),
        ("Iker Mendoza", MemberRole::Coach, "ES", "0.00"),
        ("Ada Okafor", MemberRole::Manager, "NG", "0.00"),
    ];

    for (name, role, country, fee) in seed {
        let member = members::ActiveModel {
            id: Set(Uuid::new_v4()),
            full_name: Set(name.to_string()),
            role: Set(role),
            email: Set(None),
            phone: Set(None),
            country: Set(Some(country.to_string())),
            date_of_birth: Set(None),
            joined_on: Set(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()),
            status: Set(MemberStatus::Active),
            monthly_fee: Set(Some(Decimal::from_str(fee).unwrap())),
            created_at: Set(now),
            updated_at: Set(now),
        };
        member.insert(db).await.expect("Failed to seed member");
    }
}

/// Seeds a month of example transactions.
async fn seed_transactions(db: &DatabaseConnection) {
    let existing = transactions::Entity::find().one(db).await.ok().flatten();
    if existing.is_some() {
        println!("  Transactions already exist, skipping...");
        return;
    }

    let fees = category_id(db, "Membership fees").await;
    let travel = category_id(db, "Travel").await;
    let equipment = category_id(db, "Equipment").await;

    let now = Utc::now().into();
    let seed = [
        ("60.00", CategoryKind::Income, fees, 5),
        ("60.00", CategoryKind::Income, fees, 12),
        ("140.00", CategoryKind::Expense, travel, 14),
        ("85.50", CategoryKind::Expense, equipment, 20),
    ];

    for (amount, kind, category, day) in seed {
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            amount: Set(Decimal::from_str(amount).unwrap()),
            kind: Set(kind),
            category_id: Set(category),
            member_id: Set(None),
            description: Set("Seed data".to_string()),
            occurred_on: Set(NaiveDate::from_ymd_opt(2026, 7, day).unwrap()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        transaction
            .insert(db)
            .await
            .expect("Failed to seed transaction");
    }
}

async fn category_id(db: &DatabaseConnection, name: &str) -> Uuid {
    categories::Entity::find()
        .filter(categories::Column::Name.eq(name))
        .one(db)
        .await
        .expect("Failed to query categories")
        .unwrap_or_else(|| panic!("Category '{name}' not seeded; run the migrator first"))
        .id
}
