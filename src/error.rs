//! HTTP-facing error type.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::errors::RewriteError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
}

impl From<RewriteError> for AppError {
    fn from(e: RewriteError) -> Self {
        let message = e.to_string();
        match e {
            RewriteError::ConfigInvalid(errors) => AppError::bad_request(
                "Invalid regular expression settings",
                json!({ "errors": errors.entries() }),
            ),
            RewriteError::PageNotFound { page_id, tenant_id } => AppError::not_found(
                message,
                json!({ "page_id": page_id, "tenant_id": tenant_id }),
            ),
            RewriteError::ConfigUnavailable(tenant_id) => {
                AppError::not_found(message, json!({ "tenant_id": tenant_id }))
            }
            RewriteError::MalformedInput { uri, reason } => AppError::bad_request(
                "Malformed URI",
                json!({ "uri": uri, "reason": reason }),
            ),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Invalid request", json!({ "reason": e.to_string() }))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}
