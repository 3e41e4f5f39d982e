//! Ownership gate middleware.

use super::resource::{check_resource_access, RegistryError, ResourceLookup, ResourceRegistry};
use crate::{error::ApiError, middleware::auth::types::AuthUser};
use axum::{
    body::Body,
    extract::{FromRequestParts, RawPathParams},
    http::Request,
    response::{IntoResponse, Response},
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{error, warn};

/// Name of the route parameter carrying the resource identifier.
const RESOURCE_ID_PARAM: &str = "id";

/// Per-route ownership gate.
///
/// Admits the resource's owner and admins; everyone else is rejected after
/// an asynchronous lookup against the registered store collaborator.
#[derive(Clone)]
pub struct OwnershipLayer {
    lookup: Arc<dyn ResourceLookup>,
    resource: Arc<str>,
}

impl OwnershipLayer {
    /// Resolve the gate for `resource` against the startup registry.
    ///
    /// # Errors
    /// [`RegistryError::UnknownResourceType`] when no lookup is registered
    /// under `resource`; route construction should fail on it.
    pub fn for_resource(registry: &ResourceRegistry, resource: &str) -> Result<Self, RegistryError> {
        let lookup = registry
            .get(resource)
            .ok_or_else(|| RegistryError::UnknownResourceType(resource.to_string()))?;
        Ok(Self {
            lookup,
            resource: Arc::from(resource),
        })
    }
}

impl<S> Layer<S> for OwnershipLayer {
    type Service = OwnershipMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OwnershipMiddleware {
            inner,
            lookup: self.lookup.clone(),
            resource: self.resource.clone(),
        }
    }
}

/// Ownership gate middleware service.
#[derive(Clone)]
pub struct OwnershipMiddleware<S> {
    inner: S,
    lookup: Arc<dyn ResourceLookup>,
    resource: Arc<str>,
}

impl<S> Service<Request<Body>> for OwnershipMiddleware<S>
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
        let lookup = self.lookup.clone();
        let resource = self.resource.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            // Get authenticated user from request extensions
            let Some(user) = req.extensions().get::<AuthUser>().cloned() else {
                warn!("Ownership check without authentication");
                return Ok(ApiError::MissingRoleContext.into_response());
            };

            // Admins bypass the ownership check; no lookup is performed
            if user.role.bypasses_ownership() {
                return inner.call(req).await;
            }

            let (req, resource_id) = take_resource_id(req).await;
            let Some(resource_id) = resource_id else {
                return Ok(ApiError::MissingResourceId.into_response());
            };

            match lookup.find_by_id(&resource_id).await {
                Ok(Some(record)) => match check_resource_access(&user, &record.owner_id) {
                    Ok(()) => inner.call(req).await,
                    Err(err) => {
                        warn!(
                            user_id = %user.id,
                            resource = %resource,
                            resource_id = %resource_id,
                            "Ownership denied"
                        );
                        Ok(err.into_response())
                    }
                },
                Ok(None) => {
                    let err = ApiError::ResourceNotFound {
                        resource: resource.to_string(),
                    };
                    Ok(err.into_response())
                }
                Err(source) => {
                    error!(
                        error = %source,
                        resource = %resource,
                        resource_id = %resource_id,
                        "Resource lookup failed"
                    );
                    Ok(ApiError::OwnershipCheckFailure(source).into_response())
                }
            }
        })
    }
}

/// Pull the `id` route parameter out of the request, handing the request
/// back untouched.
async fn take_resource_id(req: Request<Body>) -> (Request<Body>, Option<String>) {
    let (mut parts, body) = req.into_parts();
    let resource_id = match RawPathParams::from_request_parts(&mut parts, &()).await {
        Ok(params) => params
            .iter()
            .find(|(name, _)| *name == RESOURCE_ID_PARAM)
            .map(|(_, value)| value.to_string()),
        Err(_) => None,
    };
    (Request::from_parts(parts, body), resource_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::types::{Claims, Role};
    use crate::middleware::authz::resource::OwnedResource;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use std::convert::Infallible;
    use tower::{service_fn, ServiceExt};

    /// Lookup that fails the test if the gate consults it.
    struct UntouchableLookup;

    #[async_trait::async_trait]
    impl ResourceLookup for UntouchableLookup {
        async fn find_by_id(&self, _id: &str) -> anyhow::Result<Option<OwnedResource>> {
            Err(anyhow::anyhow!("lookup must not run"))
        }
    }

    async fn ok_handler(_req: Request<Body>) -> Result<Response, Infallible> {
        Ok(StatusCode::OK.into_response())
    }

    fn gate() -> OwnershipLayer {
        let mut registry = ResourceRegistry::new();
        registry.register("post", Arc::new(UntouchableLookup));
        OwnershipLayer::for_resource(&registry, "post").unwrap()
    }

    fn user(id: &str, role: Role) -> AuthUser {
        AuthUser::from_claims(&Claims::new(id, role, 3600)).unwrap()
    }

    #[tokio::test]
    async fn test_unregistered_resource_type_fails_at_construction() {
        let registry = ResourceRegistry::new();
        let result = OwnershipLayer::for_resource(&registry, "comment");
        assert!(matches!(
            result,
            Err(RegistryError::UnknownResourceType(name)) if name == "comment"
        ));
    }

    #[tokio::test]
    async fn test_missing_context_fails_closed() {
        let svc = gate().layer(service_fn(ok_handler));
        let resp = svc.oneshot(Request::new(Body::empty())).await.unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_bypass_skips_the_lookup() {
        let svc = gate().layer(service_fn(ok_handler));
        let mut req = Request::new(Body::empty());
        req.extensions_mut().insert(user("u3", Role::Admin));

        // UntouchableLookup would turn any lookup into a 500
        let resp = svc.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_resource_id_is_bad_request() {
        // No router in front, so no path parameters are present
        let svc = gate().layer(service_fn(ok_handler));
        let mut req = Request::new(Body::empty());
        req.extensions_mut().insert(user("u1", Role::Editor));

        let resp = svc.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "missing_resource_id");
    }
}
