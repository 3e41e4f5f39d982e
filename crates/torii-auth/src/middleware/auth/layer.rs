//! Authentication middleware layer.

use super::{jwt::decode_token, types::AuthUser};
use crate::config::{AuthConfig, BEARER_SCHEME, TOKEN_COOKIE};
use crate::error::ApiError;
use axum::{
    body::Body,
    http::{header, Request},
    response::{IntoResponse, Response},
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::debug;

/// Authentication layer configuration.
///
/// The signing secret is injected here rather than read from the ambient
/// environment per call, so tests can substitute their own.
#[derive(Clone)]
pub struct AuthLayer {
    config: Arc<AuthConfig>,
}

impl AuthLayer {
    /// Create new auth layer.
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            config: self.config.clone(),
        }
    }
}

/// Authentication middleware service.
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    config: Arc<AuthConfig>,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let config = self.config.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            // Extract token from request
            let token = match extract_token(&req) {
                Ok(token) => token,
                Err(err) => return Ok(err.into_response()),
            };

            // Decode and validate token
            let claims = match decode_token(&token, config.jwt_secret.expose()) {
                Ok(claims) => claims,
                Err(err) => {
                    debug!(error = %err, "Credential rejected");
                    return Ok(ApiError::from(err).into_response());
                }
            };

            if claims.is_expired() {
                return Ok(ApiError::InvalidCredential.into_response());
            }

            // Create auth user from claims
            let Some(auth_user) = AuthUser::from_claims(&claims) else {
                let err =
                    ApiError::VerificationFailure(anyhow::anyhow!("claims carry an empty subject"));
                return Ok(err.into_response());
            };

            // Insert auth user into request extensions
            req.extensions_mut().insert(auth_user);

            // Continue to handler
            inner.call(req).await
        })
    }
}

fn extract_token(req: &Request<Body>) -> Result<String, ApiError> {
    // The cookie carrier takes precedence over the Authorization header
    if let Some(cookie_header) = req.headers().get(header::COOKIE) {
        let cookie_str = cookie_header
            .to_str()
            .map_err(|_| ApiError::InvalidCredential)?;

        for cookie in cookie_str.split(';') {
            let cookie = cookie.trim();
            if let Some(token) = cookie
                .strip_prefix(TOKEN_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
            {
                return Ok(token.to_string());
            }
        }
    }

    // Fall back to a bearer token
    if let Some(auth_header) = req.headers().get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::InvalidCredential)?;

        if let Some(token) = auth_str
            .strip_prefix(BEARER_SCHEME)
            .and_then(|rest| rest.strip_prefix(' '))
        {
            return Ok(token.to_string());
        }
    }

    Err(ApiError::MissingCredential)
}
