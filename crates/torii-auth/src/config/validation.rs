//! Configuration validation.

use super::types::AuthConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The signing secret is too short to be safe.
    #[error("Invalid JWT secret: must be at least 32 characters")]
    InvalidJwtSecret,

    /// Tokens would be issued already expired.
    #[error("Invalid token expiry: must be non-zero")]
    InvalidTokenExpiry,
}

/// Validate authorization configuration.
///
/// # Errors
/// Every violated constraint, collected so startup can report them at once.
pub fn validate_config(config: &AuthConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate JWT secret
    if config.jwt_secret.expose().len() < 32 {
        errors.push(ConfigError::InvalidJwtSecret);
    }

    // Validate token expiry
    if config.token_expiry_secs == 0 {
        errors.push(ConfigError::InvalidTokenExpiry);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
