//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so every limit the
//! registration form promises is checked here before touching the database.

use crate::utils::AppError;
use shared::error::ErrorCode;

// ── Text length limits ──────────────────────────────────────────────

/// Patient usernames
pub const MAX_USERNAME_LEN: usize = 150;

/// Phone numbers (digits, separators, leading +)
pub const MAX_PHONE_LEN: usize = 20;

/// Personal identification numbers: exactly 12 digits
pub const IIN_LEN: usize = 12;

/// Confirmation links handed back to the patient
pub const MAX_LINK_LEN: usize = 200;

/// Area and region names
pub const MAX_NAME_LEN: usize = 100;

// ── Validation helpers ───────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate an optional IIN: exactly 12 ASCII digits when present.
pub fn validate_iin(value: &Option<String>, field: &str) -> Result<(), AppError> {
    if let Some(v) = value
        && (v.len() != IIN_LEN || !v.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("{field} must be exactly {IIN_LEN} digits"),
        ));
    }
    Ok(())
}
