//! Authorization configuration types.

use serde::{Deserialize, Serialize};
use torii_common_secret::{Secret, SecretString};

/// Name of the cookie carrying the credential. Fixed, not configurable.
pub const TOKEN_COOKIE: &str = "token";

/// Authorization header scheme. Fixed, not configurable.
pub const BEARER_SCHEME: &str = "Bearer";

/// The built-in development signing secret.
///
/// Deployments must override it via `TORII_JWT_SECRET`; the loader shouts
/// whenever a process starts with this value.
pub const INSECURE_DEFAULT_SECRET: &str = "insecure-dev-secret-change-me-in-production";

/// Authorization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT signing secret. Redacted in logs and serialized output.
    pub jwt_secret: SecretString,
    /// Issued-token expiry (seconds).
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: u64,
}

fn default_token_expiry() -> u64 {
    3600 // 1 hour
}

impl AuthConfig {
    /// Build a config around an explicit secret; used by embedding servers
    /// and tests that do not go through the loader.
    pub fn for_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: Secret::new(secret.into()),
            token_expiry_secs: default_token_expiry(),
        }
    }

    /// Whether the signing secret is still the built-in development value.
    pub fn uses_insecure_default(&self) -> bool {
        self.jwt_secret.expose() == INSECURE_DEFAULT_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insecure_default_is_detected() {
        let config = AuthConfig::for_secret(INSECURE_DEFAULT_SECRET);
        assert!(config.uses_insecure_default());

        let config = AuthConfig::for_secret("a".repeat(32));
        assert!(!config.uses_insecure_default());
    }

    #[test]
    fn test_secret_never_serializes() {
        let config = AuthConfig::for_secret("very-confidential-signing-secret");
        let serialized = serde_json::to_string(&config).unwrap();
        assert!(!serialized.contains("very-confidential-signing-secret"));
    }
}
