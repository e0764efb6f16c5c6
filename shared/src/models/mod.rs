//! Data models
//!
//! Shared between registry-server and clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod area;
pub mod patient;
pub mod region;

// Re-exports
pub use area::*;
pub use patient::*;
pub use region::*;
