pub mod engine;
pub mod error;
pub mod rate_table;
pub mod session;
