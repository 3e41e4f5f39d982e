//! Authorization middleware: role and ownership gates.

pub mod ownership;
pub mod resource;
pub mod role;

pub use ownership::{OwnershipLayer, OwnershipMiddleware};
pub use resource::{
    check_resource_access, OwnedResource, RegistryError, ResourceLookup, ResourceRegistry,
};
pub use role::{RoleGateLayer, RoleGateMiddleware};
