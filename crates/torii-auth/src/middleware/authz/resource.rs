//! Resource lookup collaborators and the ownership relation.

use crate::{error::ApiError, middleware::auth::types::AuthUser};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// The owning-identity view of a stored resource.
///
/// The pipeline reads nothing else from a resource; storage stays behind
/// the lookup trait.
#[derive(Debug, Clone)]
pub struct OwnedResource {
    /// Identity reference of the resource's owner, in canonical string form.
    pub owner_id: String,
}

/// Keyed lookup into an external resource store.
#[async_trait]
pub trait ResourceLookup: Send + Sync {
    /// Find a resource by identifier, returning `None` when absent.
    ///
    /// # Errors
    /// Any store fault. The ownership gate converts faults into a rejection,
    /// never into an accept.
    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<OwnedResource>>;
}

/// Registration table mapping resource-type names to their lookups.
///
/// Built once at startup; resolving an unregistered name is a configuration
/// error surfaced when the route is built, not per request.
#[derive(Default)]
pub struct ResourceRegistry {
    lookups: HashMap<String, Arc<dyn ResourceLookup>>,
}

impl ResourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a lookup under a resource-type name.
    pub fn register(&mut self, resource: impl Into<String>, lookup: Arc<dyn ResourceLookup>) {
        self.lookups.insert(resource.into(), lookup);
    }

    /// Get the lookup registered under `resource`.
    pub fn get(&self, resource: &str) -> Option<Arc<dyn ResourceLookup>> {
        self.lookups.get(resource).cloned()
    }
}

/// Startup-time registry errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No lookup was registered under the requested resource-type name.
    #[error("no lookup registered for resource type '{0}'")]
    UnknownResourceType(String),
}

/// Apply the ownership relation for a resource already in hand.
///
/// Admins bypass the comparison; everyone else must match the recorded
/// owner. The relation is recomputed on every call, never cached.
///
/// # Errors
/// [`ApiError::NotOwner`] when the user neither owns the resource nor holds
/// the bypass role.
pub fn check_resource_access(user: &AuthUser, owner_id: &str) -> Result<(), ApiError> {
    if user.is_admin() || user.id == owner_id {
        Ok(())
    } else {
        Err(ApiError::NotOwner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::types::{Claims, Role};
    use proptest::prelude::*;

    struct NullLookup;

    #[async_trait]
    impl ResourceLookup for NullLookup {
        async fn find_by_id(&self, _id: &str) -> anyhow::Result<Option<OwnedResource>> {
            Ok(None)
        }
    }

    fn user(id: &str, role: Role) -> AuthUser {
        AuthUser::from_claims(&Claims::new(id, role, 3600)).unwrap()
    }

    #[test]
    fn test_registry_resolves_registered_names_only() {
        let mut registry = ResourceRegistry::new();
        registry.register("post", Arc::new(NullLookup));

        assert!(registry.get("post").is_some());
        assert!(registry.get("comment").is_none());
    }

    #[test]
    fn test_owner_passes_non_owner_rejected() {
        assert!(check_resource_access(&user("u1", Role::Editor), "u1").is_ok());
        assert!(matches!(
            check_resource_access(&user("u2", Role::Editor), "u1"),
            Err(ApiError::NotOwner)
        ));
    }

    #[test]
    fn test_admin_bypasses_mismatched_owner() {
        assert!(check_resource_access(&user("u3", Role::Admin), "u1").is_ok());
    }

    fn any_role() -> impl Strategy<Value = Role> {
        prop_oneof![
            Just(Role::Admin),
            Just(Role::Editor),
            Just(Role::Viewer),
        ]
    }

    proptest! {
        #[test]
        fn prop_access_iff_owner_or_admin(
            user_id in "[a-z0-9]{1,8}",
            owner_id in "[a-z0-9]{1,8}",
            role in any_role(),
        ) {
            let requester = user(&user_id, role);
            let granted = check_resource_access(&requester, &owner_id).is_ok();
            prop_assert_eq!(granted, role == Role::Admin || user_id == owner_id);
        }
    }
}
