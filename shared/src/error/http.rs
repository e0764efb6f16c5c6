//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::PatientNotFound
            | Self::AreaNotFound
            | Self::RegionNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::TicketAllocationConflict
            | Self::PatientUsernameExists
            | Self::PatientIinExists
            | Self::AreaCodeExists => StatusCode::CONFLICT,

            // 422 Unprocessable (fatal per-area state, retrying cannot help)
            Self::TicketCapacityExhausted => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            Self::TicketMalformed
            | Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
