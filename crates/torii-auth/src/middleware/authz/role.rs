//! Role gate middleware.

use crate::{
    error::ApiError,
    middleware::auth::types::{AuthUser, Role},
};
use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::warn;

/// Per-route role gate.
///
/// The allowed-role set is declared once when the route is built; the layer
/// applies the membership check to every request that reaches it.
#[derive(Clone)]
pub struct RoleGateLayer {
    allowed: Arc<[Role]>,
}

impl RoleGateLayer {
    /// Create a gate admitting exactly the given roles.
    pub fn allow(roles: &[Role]) -> Self {
        Self {
            allowed: Arc::from(roles),
        }
    }
}

impl<S> Layer<S> for RoleGateLayer {
    type Service = RoleGateMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RoleGateMiddleware {
            inner,
            allowed: self.allowed.clone(),
        }
    }
}

/// Role gate middleware service.
#[derive(Clone)]
pub struct RoleGateMiddleware<S> {
    inner: S,
    allowed: Arc<[Role]>,
}

impl<S> Service<Request<Body>> for RoleGateMiddleware<S>
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

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let allowed = self.allowed.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            // Get authenticated user from request extensions
            let Some(role) = req.extensions().get::<AuthUser>().map(|user| user.role) else {
                warn!("Role check without authentication");
                return Ok(ApiError::MissingRoleContext.into_response());
            };

            if !allowed.contains(&role) {
                warn!(
                    required = ?allowed,
                    current = %role,
                    "Role gate denied"
                );
                let err = ApiError::InsufficientRole {
                    required: allowed.to_vec(),
                    current: role,
                };
                return Ok(err.into_response());
            }

            inner.call(req).await
        })
    }
}
