//! API error types.

use crate::middleware::auth::types::Role;
use axum::http::StatusCode;
use thiserror::Error;

/// Result type for authorization operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error enum covering every rejection the pipeline can produce.
///
/// Each stage converts its own faults into one of these variants at the
/// point of detection; no error propagates past the stage that found it,
/// and no ambiguous condition ever resolves to an accept.
#[derive(Debug, Error)]
pub enum ApiError {
    // 400 Bad Request
    #[error("Resource ID is required.")]
    MissingResourceId,

    // 401 Unauthorized
    #[error("Authentication required. No token provided.")]
    MissingCredential,

    /// Covers expired, tampered, and structurally invalid credentials with
    /// one undifferentiated message.
    #[error("Invalid or expired token.")]
    InvalidCredential,

    // 403 Forbidden
    #[error("Access denied. Role information not available.")]
    MissingRoleContext,

    #[error("Access denied. Insufficient permissions.")]
    InsufficientRole {
        /// Roles the route accepts.
        required: Vec<Role>,
        /// Role the requester presented.
        current: Role,
    },

    #[error("Access denied. You can only modify your own resources.")]
    NotOwner,

    // 404 Not Found
    #[error("{resource} not found.")]
    ResourceNotFound {
        /// Resource-type name the lookup was registered under.
        resource: String,
    },

    // 500 Internal Server Error
    #[error("Credential verification error")]
    VerificationFailure(#[source] anyhow::Error),

    #[error("Ownership verification error")]
    OwnershipCheckFailure(#[source] anyhow::Error),
}

impl ApiError {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingResourceId => StatusCode::BAD_REQUEST,

            Self::MissingCredential | Self::InvalidCredential => StatusCode::UNAUTHORIZED,

            Self::MissingRoleContext | Self::InsufficientRole { .. } | Self::NotOwner => {
                StatusCode::FORBIDDEN
            }

            Self::ResourceNotFound { .. } => StatusCode::NOT_FOUND,

            Self::VerificationFailure(_) | Self::OwnershipCheckFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get error code for client handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingResourceId => "missing_resource_id",
            Self::MissingCredential => "missing_credential",
            Self::InvalidCredential => "invalid_credential",
            Self::MissingRoleContext => "missing_role_context",
            Self::InsufficientRole { .. } => "insufficient_role",
            Self::NotOwner => "not_owner",
            Self::ResourceNotFound { .. } => "resource_not_found",
            Self::VerificationFailure(_) => "verification_failure",
            Self::OwnershipCheckFailure(_) => "ownership_check_failure",
        }
    }

    /// Check if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Check if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_match_taxonomy() {
        assert_eq!(
            ApiError::MissingResourceId.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::MissingCredential.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::InvalidCredential.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::MissingRoleContext.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ApiError::NotOwner.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::ResourceNotFound {
                resource: "post".into()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::OwnershipCheckFailure(anyhow::anyhow!("store down")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_expired_and_tampered_share_one_message() {
        // Both failure modes must surface as the same rejection so the
        // response cannot be used as an expiry-vs-signature oracle.
        let expired: ApiError =
            jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::ExpiredSignature)
                .into();
        let tampered: ApiError =
            jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::InvalidSignature)
                .into();
        assert_eq!(expired.to_string(), tampered.to_string());
        assert_eq!(expired.error_code(), tampered.error_code());
    }

    #[test]
    fn test_not_found_message_names_the_resource() {
        let err = ApiError::ResourceNotFound {
            resource: "post".into(),
        };
        assert_eq!(err.to_string(), "post not found.");
    }
}
