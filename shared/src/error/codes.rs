//! Unified error codes for the clinic registry
//!
//! This module defines all error codes used across the registry server and
//! its clients. Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Ticket errors
//! - 5xxx: Patient errors
//! - 7xxx: Location errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Ticket ====================
    /// Concurrent allocations raced for the same ticket number
    TicketAllocationConflict = 4001,
    /// The 7-digit number space for an area is fully consumed
    TicketCapacityExhausted = 4002,
    /// A stored ticket does not parse as `<code><7 digits>`
    TicketMalformed = 4003,

    // ==================== 5xxx: Patient ====================
    /// Patient not found
    PatientNotFound = 5001,
    /// Patient username already exists
    PatientUsernameExists = 5002,
    /// Patient IIN already exists
    PatientIinExists = 5003,
    /// Manager reference is invalid (missing or not a manager)
    ManagerInvalid = 5004,

    // ==================== 7xxx: Location ====================
    /// Area not found
    AreaNotFound = 7001,
    /// Area code already used by a different area
    AreaCodeExists = 7002,
    /// Region not found
    RegionNotFound = 7101,
    /// Region does not belong to the specified area
    RegionAreaMismatch = 7102,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Ticket
            ErrorCode::TicketAllocationConflict => {
                "Ticket allocation conflict, please retry"
            }
            ErrorCode::TicketCapacityExhausted => {
                "Ticket number space is exhausted for this area"
            }
            ErrorCode::TicketMalformed => "Stored ticket is malformed",

            // Patient
            ErrorCode::PatientNotFound => "Patient not found",
            ErrorCode::PatientUsernameExists => "Username already exists",
            ErrorCode::PatientIinExists => "IIN already exists",
            ErrorCode::ManagerInvalid => "Manager not found or user is not a manager",

            // Location
            ErrorCode::AreaNotFound => "Area not found",
            ErrorCode::AreaCodeExists => "Area code already used by a different area",
            ErrorCode::RegionNotFound => "Region not found",
            ErrorCode::RegionAreaMismatch => "Region does not belong to the specified area",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Ticket
            4001 => Ok(ErrorCode::TicketAllocationConflict),
            4002 => Ok(ErrorCode::TicketCapacityExhausted),
            4003 => Ok(ErrorCode::TicketMalformed),

            // Patient
            5001 => Ok(ErrorCode::PatientNotFound),
            5002 => Ok(ErrorCode::PatientUsernameExists),
            5003 => Ok(ErrorCode::PatientIinExists),
            5004 => Ok(ErrorCode::ManagerInvalid),

            // Location
            7001 => Ok(ErrorCode::AreaNotFound),
            7002 => Ok(ErrorCode::AreaCodeExists),
            7101 => Ok(ErrorCode::RegionNotFound),
            7102 => Ok(ErrorCode::RegionAreaMismatch),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        // General
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::Unknown.code(), 1);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::AlreadyExists.code(), 4);
        assert_eq!(ErrorCode::InvalidRequest.code(), 5);
        assert_eq!(ErrorCode::InvalidFormat.code(), 6);
        assert_eq!(ErrorCode::RequiredField.code(), 7);
        assert_eq!(ErrorCode::ValueOutOfRange.code(), 8);

        // Ticket
        assert_eq!(ErrorCode::TicketAllocationConflict.code(), 4001);
        assert_eq!(ErrorCode::TicketCapacityExhausted.code(), 4002);
        assert_eq!(ErrorCode::TicketMalformed.code(), 4003);

        // Patient
        assert_eq!(ErrorCode::PatientNotFound.code(), 5001);
        assert_eq!(ErrorCode::PatientUsernameExists.code(), 5002);
        assert_eq!(ErrorCode::PatientIinExists.code(), 5003);
        assert_eq!(ErrorCode::ManagerInvalid.code(), 5004);

        // Location
        assert_eq!(ErrorCode::AreaNotFound.code(), 7001);
        assert_eq!(ErrorCode::AreaCodeExists.code(), 7002);
        assert_eq!(ErrorCode::RegionNotFound.code(), 7101);
        assert_eq!(ErrorCode::RegionAreaMismatch.code(), 7102);

        // System
        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
        assert_eq!(ErrorCode::ConfigError.code(), 9003);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::NotFound.is_success());
        assert!(!ErrorCode::InternalError.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(
            ErrorCode::try_from(4001),
            Ok(ErrorCode::TicketAllocationConflict)
        );
        assert_eq!(ErrorCode::try_from(5001), Ok(ErrorCode::PatientNotFound));
        assert_eq!(ErrorCode::try_from(7001), Ok(ErrorCode::AreaNotFound));
        assert_eq!(ErrorCode::try_from(9001), Ok(ErrorCode::InternalError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_from_error_code_to_u16() {
        let code: u16 = ErrorCode::Success.into();
        assert_eq!(code, 0);

        let code: u16 = ErrorCode::TicketCapacityExhausted.into();
        assert_eq!(code, 4002);

        let code: u16 = ErrorCode::InternalError.into();
        assert_eq!(code, 9001);
    }

    #[test]
    fn test_serialize() {
        let code = ErrorCode::NotFound;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "3");

        let code = ErrorCode::TicketAllocationConflict;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "4001");

        let code = ErrorCode::Success;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "0");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("0").unwrap();
        assert_eq!(code, ErrorCode::Success);

        let code: ErrorCode = serde_json::from_str("3").unwrap();
        assert_eq!(code, ErrorCode::NotFound);

        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::TicketAllocationConflict);

        let code: ErrorCode = serde_json::from_str("9001").unwrap();
        assert_eq!(code, ErrorCode::InternalError);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());

        let result: Result<ErrorCode, _> = serde_json::from_str("10000");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::NotFound), "3");
        assert_eq!(format!("{}", ErrorCode::TicketMalformed), "4003");
        assert_eq!(format!("{}", ErrorCode::InternalError), "9001");
    }

    #[test]
    fn test_message() {
        assert_eq!(
            ErrorCode::Success.message(),
            "Operation completed successfully"
        );
        assert_eq!(ErrorCode::NotFound.message(), "Resource not found");
        assert_eq!(ErrorCode::AreaNotFound.message(), "Area not found");
        assert_eq!(ErrorCode::InternalError.message(), "Internal server error");
    }

    #[test]
    fn test_invalid_error_code_display() {
        let err = InvalidErrorCode(999);
        assert_eq!(format!("{}", err), "invalid error code: 999");
    }

    #[test]
    fn test_roundtrip() {
        // Test that serialization -> deserialization roundtrip works
        let codes = [
            ErrorCode::Success,
            ErrorCode::TicketAllocationConflict,
            ErrorCode::TicketCapacityExhausted,
            ErrorCode::PatientUsernameExists,
            ErrorCode::AreaNotFound,
            ErrorCode::InternalError,
        ];

        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, parsed);
        }
    }

    #[test]
    fn test_debug() {
        // Test that Debug derive works correctly
        let debug_str = format!("{:?}", ErrorCode::Success);
        assert_eq!(debug_str, "Success");

        let debug_str = format!("{:?}", ErrorCode::AreaNotFound);
        assert_eq!(debug_str, "AreaNotFound");
    }

    #[test]
    fn test_clone_copy() {
        let code = ErrorCode::Success;
        let cloned = code.clone();
        let copied = code;

        assert_eq!(code, cloned);
        assert_eq!(code, copied);
    }

    #[test]
    fn test_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(ErrorCode::Success);
        set.insert(ErrorCode::NotFound);
        set.insert(ErrorCode::Success); // Duplicate

        assert_eq!(set.len(), 2);
        assert!(set.contains(&ErrorCode::Success));
        assert!(set.contains(&ErrorCode::NotFound));
    }
}
