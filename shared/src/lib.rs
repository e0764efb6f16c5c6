//! Shared types for the clinic registry
//!
//! Common types used across the server and tooling including HTTP types,
//! error types, domain models, and the ticket value type.

pub mod error;
pub mod models;
pub mod ticket;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

// Ticket re-exports (for convenient access)
pub use ticket::{TicketNumber, TicketParseError};
