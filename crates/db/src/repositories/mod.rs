//! Repository abstractions for data access.

pub mod account;
pub mod category;
pub mod member;
pub mod report;
pub mod transaction;

pub use account::AccountRepository;
pub use category::CategoryRepository;
pub use member::MemberRepository;
pub use report::ReportRepository;
pub use transaction::TransactionRepository;
