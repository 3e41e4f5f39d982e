//! Authentication extractors for handlers.

use super::types::AuthUser;
use crate::error::ApiError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Extractor for the authenticated user (required).
///
/// Only succeeds behind [`AuthLayer`](super::AuthLayer); an absent context
/// is a pipeline-ordering bug and rejects rather than passing through.
pub struct Auth(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(Auth)
            .ok_or(ApiError::MissingRoleContext)
    }
}
