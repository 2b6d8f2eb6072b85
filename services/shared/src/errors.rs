/// Shared error vocabulary for the betting services
///
/// Design Philosophy:
/// - Standardized error codes for consistent error handling across services
/// - Categorized by error domain (Validation, NotFound, Conflict, Network, Internal)
/// - Error codes follow pattern: <CATEGORY>_<SPECIFIC>
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error categories that map to HTTP status codes and logging severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Validation and business-rule rejections (400 Bad Request)
    Validation,

    /// Resource not found (404 Not Found)
    NotFound,

    /// Concurrent-modification misses (409 Conflict)
    /// Nothing was committed; the caller may retry the whole operation.
    Conflict,

    /// Ledger store unavailable or not confirming writes (503)
    Network,

    /// Unexpected failures and programming errors (500)
    Internal,
}

impl ErrorCategory {
    /// Map error category to HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorCategory::Validation => 400,
            ErrorCategory::NotFound => 404,
            ErrorCategory::Conflict => 409,
            ErrorCategory::Network => 503,
            ErrorCategory::Internal => 500,
        }
    }

    /// Map error category to log level
    pub fn log_level(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "warn",
            ErrorCategory::NotFound => "info",
            ErrorCategory::Conflict => "warn",
            ErrorCategory::Network => "error",
            ErrorCategory::Internal => "error",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "Validation",
            ErrorCategory::NotFound => "NotFound",
            ErrorCategory::Conflict => "Conflict",
            ErrorCategory::Network => "Network",
            ErrorCategory::Internal => "Internal",
        }
    }
}

/// Standard error codes used across all services
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorCode(pub &'static str);

impl ErrorCode {
    // Validation errors
    pub const VALIDATION_INVALID_INPUT: ErrorCode = ErrorCode("VALIDATION_INVALID_INPUT");
    pub const VALIDATION_MISSING_FIELD: ErrorCode = ErrorCode("VALIDATION_MISSING_FIELD");
    pub const VALIDATION_INVALID_LEVERAGE: ErrorCode = ErrorCode("VALIDATION_INVALID_LEVERAGE");
    pub const VALIDATION_INSUFFICIENT_BALANCE: ErrorCode =
        ErrorCode("VALIDATION_INSUFFICIENT_BALANCE");
    pub const VALIDATION_BONUS_ALREADY_CLAIMED: ErrorCode =
        ErrorCode("VALIDATION_BONUS_ALREADY_CLAIMED");

    // Resource errors
    pub const NOT_FOUND_ACCOUNT: ErrorCode = ErrorCode("NOT_FOUND_ACCOUNT");

    // Concurrency errors
    pub const CONFLICT_CONCURRENT_UPDATE: ErrorCode = ErrorCode("CONFLICT_CONCURRENT_UPDATE");

    // Network errors
    pub const NETWORK_LEDGER_UNAVAILABLE: ErrorCode = ErrorCode("NETWORK_LEDGER_UNAVAILABLE");

    // Internal errors
    pub const INTERNAL_UNEXPECTED: ErrorCode = ErrorCode("INTERNAL_UNEXPECTED");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
