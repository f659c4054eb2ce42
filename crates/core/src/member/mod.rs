//! Player and staff roster domain types.

pub mod types;

pub use types::{MemberError, MemberRole, MemberStatus, NewMember};
