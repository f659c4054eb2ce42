//! Shared types and configuration for Clubdesk.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Pagination types for list endpoints
//! - Configuration management
//! - Session token validation
//!
//! Error types live with the domains that raise them (`LedgerError` in
//! core, per-repository errors in db); there is no catch-all error enum.

pub mod auth;
pub mod config;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::AppConfig;
pub use jwt::{JwtConfig, JwtError, JwtService};
