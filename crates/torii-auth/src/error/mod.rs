//! Error types for the authorization pipeline.

pub mod response;
pub mod types;

pub use types::{ApiError, ApiResult};
