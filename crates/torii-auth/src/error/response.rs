//! Error response implementation.

use super::types::ApiError;
use crate::middleware::auth::types::Role;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<Vec<Role>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current: Option<Role>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log based on error type
        if self.is_server_error() {
            error!(
                error = %self,
                code = self.error_code(),
                "Server error occurred"
            );
        } else if self.status_code() == StatusCode::UNAUTHORIZED
            || self.status_code() == StatusCode::FORBIDDEN
        {
            warn!(
                error = %self,
                code = self.error_code(),
                "Request rejected"
            );
        }

        let status = self.status_code();
        let code = self.error_code();

        // Build response body
        let (message, required, current) = match &self {
            ApiError::InsufficientRole { required, current } => {
                (self.to_string(), Some(required.clone()), Some(*current))
            }
            ApiError::VerificationFailure(err) | ApiError::OwnershipCheckFailure(err) => {
                // Don't expose internal error details in production
                let message = if cfg!(debug_assertions) {
                    format!("{}: {}", self, err)
                } else {
                    self.to_string()
                };
                (message, None, None)
            }
            _ => (self.to_string(), None, None),
        };

        let body = ErrorResponse {
            error: message,
            code,
            required,
            current,
        };

        (status, Json(body)).into_response()
    }
}

// Conversion implementations
impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        // Expiry, signature mismatch, and malformed tokens all collapse
        // into one rejection; the distinction must not reach the client.
        ApiError::InvalidCredential
    }
}
