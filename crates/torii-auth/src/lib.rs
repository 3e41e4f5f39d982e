//! Torii request-authorization layer
//!
//! This crate provides the authorization pipeline for Torii HTTP services.
//!
//! # Architecture
//!
//! The pipeline is built from composable Tower layers over Axum:
//!
//! - **Credential verification**: [`AuthLayer`] reads a bearer credential
//!   from the `token` cookie or the `Authorization` header, validates it,
//!   and attaches an [`AuthUser`] to the request.
//! - **Role gating**: [`RoleGateLayer`] restricts a route to a declared set
//!   of roles.
//! - **Ownership gating**: [`OwnershipLayer`] restricts a route to the
//!   owner of the addressed resource, with an admin bypass.
//!
//! Layers compose in a fixed order per request: authentication first, then
//! role and ownership gates. A rejecting layer responds immediately and
//! never invokes the stages behind it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod middleware;

pub use config::{AuthConfig, ConfigLoader};
pub use error::{ApiError, ApiResult};
pub use middleware::{
    Auth, AuthLayer, AuthUser, Claims, OwnedResource, OwnershipLayer, ResourceLookup,
    ResourceRegistry, Role, RoleGateLayer,
};
