//! Middleware for the Torii authorization pipeline.
//!
//! Per request the stages run strictly in order: authentication, then the
//! role gate, then the ownership gate (each gate only where a route
//! declares it). A stage that rejects responds immediately; later stages
//! never run after a rejection.

pub mod auth;
pub mod authz;

pub use auth::{Auth, AuthLayer, AuthMiddleware, AuthUser, Claims, Role};
pub use authz::{
    check_resource_access, OwnedResource, OwnershipLayer, OwnershipMiddleware, RegistryError,
    ResourceLookup, ResourceRegistry, RoleGateLayer, RoleGateMiddleware,
};
