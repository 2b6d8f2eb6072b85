use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shared::{ErrorCategory, ErrorCode, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] redis::RedisError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid leverage: {0}")]
    InvalidLeverage(String),

    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Daily bonus already claimed today")]
    AlreadyClaimedToday,

    #[error("Account was modified concurrently")]
    WriteConflict,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn category(&self) -> ErrorCategory {
        match self {
            AppError::Ledger(_) => ErrorCategory::Network,
            AppError::NotFound(_) => ErrorCategory::NotFound,
            AppError::InvalidInput(_)
            | AppError::InvalidLeverage(_)
            | AppError::InsufficientBalance
            | AppError::AlreadyClaimedToday => ErrorCategory::Validation,
            AppError::WriteConflict => ErrorCategory::Conflict,
            AppError::Internal(_) => ErrorCategory::Internal,
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            AppError::Ledger(_) => ErrorCode::NETWORK_LEDGER_UNAVAILABLE,
            AppError::NotFound(_) => ErrorCode::NOT_FOUND_ACCOUNT,
            AppError::InvalidInput(_) => ErrorCode::VALIDATION_INVALID_INPUT,
            AppError::InvalidLeverage(_) => ErrorCode::VALIDATION_INVALID_LEVERAGE,
            AppError::InsufficientBalance => ErrorCode::VALIDATION_INSUFFICIENT_BALANCE,
            AppError::AlreadyClaimedToday => ErrorCode::VALIDATION_BONUS_ALREADY_CLAIMED,
            AppError::WriteConflict => ErrorCode::CONFLICT_CONCURRENT_UPDATE,
            AppError::Internal(_) => ErrorCode::INTERNAL_UNEXPECTED,
        }
    }

    /// User-facing message. Storage internals are never leaked: ledger and
    /// internal failures collapse to a generic retryable message.
    fn public_message(&self) -> String {
        match self {
            AppError::Ledger(e) => {
                tracing::error!("Ledger error: {:?}", e);
                "Ledger temporarily unavailable, try again".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                "Internal server error".to_string()
            }
            AppError::WriteConflict => {
                "Account was modified concurrently, retry the wager".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::LeverageOutOfRange(_) => AppError::InvalidLeverage(err.to_string()),
            _ => AppError::InvalidInput(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let category = self.category();
        let code = self.code();
        let message = self.public_message();

        match category.log_level() {
            "error" => tracing::error!(code = code.as_str(), %message, "Request failed"),
            "warn" => tracing::warn!(code = code.as_str(), %message, "Request rejected"),
            _ => tracing::info!(code = code.as_str(), %message, "Request rejected"),
        }

        metrics::counter!(
            "errors_total",
            "category" => category.as_str(),
            "code" => code.as_str()
        )
        .increment(1);

        let status = StatusCode::from_u16(category.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({
            "error": {
                "code": code.as_str(),
                "message": message,
                "category": category.as_str(),
            }
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
