use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ccs_application::ResolutionFailure;
use ccs_core::AppError;
use ccs_domain::ValidationReport;
use tracing::error;

mod types;


pub use types::ErrorResponse;

/// HTTP API error wrapper around resolution failures.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    validation: Option<ValidationReport>,
}

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self {
            error: value,
            validation: None,
        }
    }
}

impl From<ResolutionFailure> for ApiError {
    fn from(value: ResolutionFailure) -> Self {
        Self {
            error: value.error,
            validation: value.validation,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        if status.is_server_error() {
            error!(error = %self.error, "request failed");
        }

        let validation = self
            .validation
            .and_then(|report| serde_json::to_value(report).ok());
        let payload = Json(ErrorResponse::new(self.error.to_string(), validation));

        (status, payload).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
