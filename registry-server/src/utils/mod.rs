//! Utility modules

pub mod logger;
pub mod validation;

pub use logger::{init_logger, init_logger_with_file};

// Error handling lives in the shared crate; re-export the names handlers use.
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
