//! Initial database migration.
//!
//! Creates the enums, tables, and indexes for accounts, ledger entries,
//! members, categories, and transactions, plus the default category seed.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: ACCOUNTS & LEDGER
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(ACCOUNT_ENTRIES_SQL).await?;

        // ============================================================
        // PART 3: ROSTER
        // ============================================================
        db.execute_unprepared(MEMBERS_SQL).await?;

        // ============================================================
        // PART 4: CATEGORIES & TRANSACTIONS
        // ============================================================
        db.execute_unprepared(CATEGORIES_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;

        // ============================================================
        // PART 5: SEED DATA
        // ============================================================
        db.execute_unprepared(SEED_CATEGORIES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Ledger entry direction
CREATE TYPE entry_type AS ENUM (
    'credit',
    'debit'
);

-- Category direction
CREATE TYPE category_kind AS ENUM (
    'income',
    'expense'
);

-- Member role
CREATE TYPE member_role AS ENUM (
    'player',
    'coach',
    'manager',
    'staff'
);

-- Member status
CREATE TYPE member_status AS ENUM (
    'active',
    'inactive'
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    balance NUMERIC(19, 4) NOT NULL DEFAULT 0,
    version BIGINT NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    -- The ledger service never writes a negative balance; the check
    -- backs that up at the storage boundary.
    CONSTRAINT accounts_balance_non_negative CHECK (balance >= 0)
);
";

const ACCOUNT_ENTRIES_SQL: &str = r"
CREATE TABLE account_entries (
    id TEXT PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES accounts(id),
    entry_type entry_type NOT NULL,
    amount NUMERIC(19, 4) NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    transfer_to_account UUID REFERENCES accounts(id),
    transfer_from_account UUID REFERENCES accounts(id),
    position BIGINT NOT NULL,
    entry_date TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT account_entries_amount_positive CHECK (amount > 0),
    CONSTRAINT account_entries_position_unique UNIQUE (account_id, position)
);

CREATE INDEX idx_account_entries_account ON account_entries(account_id, position);
";

const MEMBERS_SQL: &str = r"
CREATE TABLE members (
    id UUID PRIMARY KEY,
    full_name TEXT NOT NULL,
    role member_role NOT NULL,
    email TEXT,
    phone TEXT,
    country TEXT,
    date_of_birth DATE,
    joined_on DATE NOT NULL,
    status member_status NOT NULL DEFAULT 'active',
    monthly_fee NUMERIC(19, 4),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT members_fee_non_negative CHECK (monthly_fee IS NULL OR monthly_fee >= 0)
);

CREATE INDEX idx_members_role ON members(role);
CREATE INDEX idx_members_status ON members(status);
";

const CATEGORIES_SQL: &str = r"
CREATE TABLE categories (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    kind category_kind NOT NULL,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT categories_name_kind_unique UNIQUE (name, kind)
);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY,
    amount NUMERIC(19, 4) NOT NULL,
    kind category_kind NOT NULL,
    category_id UUID NOT NULL REFERENCES categories(id),
    member_id UUID REFERENCES members(id),
    description TEXT NOT NULL DEFAULT '',
    occurred_on DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT transactions_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_transactions_occurred_on ON transactions(occurred_on);
CREATE INDEX idx_transactions_category ON transactions(category_id);
CREATE INDEX idx_transactions_member ON transactions(member_id);
";

const SEED_CATEGORIES_SQL: &str = r"
INSERT INTO categories (id, name, kind, description) VALUES
    (gen_random_uuid(), 'Membership fees', 'income', 'Monthly and annual member fees'),
    (gen_random_uuid(), 'Sponsorship', 'income', 'Sponsor and partner contributions'),
    (gen_random_uuid(), 'Ticket sales', 'income', 'Match day ticket income'),
    (gen_random_uuid(), 'Salaries', 'expense', 'Coach and staff salaries'),
    (gen_random_uuid(), 'Equipment', 'expense', 'Kit, balls, and training gear'),
    (gen_random_uuid(), 'Travel', 'expense', 'Away match travel and lodging')
ON CONFLICT DO NOTHING;
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS transactions;
DROP TABLE IF EXISTS categories;
DROP TABLE IF EXISTS members;
DROP TABLE IF EXISTS account_entries;
DROP TABLE IF EXISTS accounts;

DROP TYPE IF EXISTS member_status;
DROP TYPE IF EXISTS member_role;
DROP TYPE IF EXISTS category_kind;
DROP TYPE IF EXISTS entry_type;
";
