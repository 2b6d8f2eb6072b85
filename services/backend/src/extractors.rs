use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use shared::{ErrorCategory, ErrorCode};

/// JSON extractor that reports body rejections in the standard error
/// envelope instead of axum's plain-text defaults.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ValidationJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidatedJson(value)),
            Err(rejection) => Err(ValidationJsonRejection(rejection)),
        }
    }
}

/// Rejection type that renders body errors as standardized responses
pub struct ValidationJsonRejection(JsonRejection);

impl IntoResponse for ValidationJsonRejection {
    fn into_response(self) -> Response {
        let original = self.0.to_string();

        let (code, message) = if original.contains("missing field") {
            let field = original
                .split("missing field `")
                .nth(1)
                .and_then(|s| s.split('`').next())
                .unwrap_or("unknown");
            (
                ErrorCode::VALIDATION_MISSING_FIELD,
                format!("Missing required field: {}", field),
            )
        } else {
            (
                ErrorCode::VALIDATION_INVALID_INPUT,
                "Invalid request body".to_string(),
            )
        };

        tracing::warn!(
            error_code = code.as_str(),
            error_message = %message,
            original_error = %original,
            "Request body rejected"
        );
        metrics::counter!(
            "errors_total",
            "category" => ErrorCategory::Validation.as_str(),
            "code" => code.as_str()
        )
        .increment(1);

        let body = Json(json!({
            "error": {
                "code": code.as_str(),
                "message": message,
                "category": ErrorCategory::Validation.as_str(),
            }
        }));

        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
