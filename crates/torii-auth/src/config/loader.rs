//! Configuration loading utilities.

use super::types::AuthConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// Load configuration from various sources.
pub struct ConfigLoader {
    config_path: Option<String>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a loader with the default `TORII` environment prefix.
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: "TORII".to_string(),
        }
    }

    /// Set config file path.
    pub fn with_config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Set environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration.
    ///
    /// # Errors
    /// Source or deserialization failures from the underlying config stack.
    pub fn load(&self) -> Result<AuthConfig> {
        let mut builder = config::Config::builder();

        // Add default values
        builder = builder.add_source(config::File::from_str(
            include_str!("defaults.toml"),
            config::FileFormat::Toml,
        ));

        // Add config file if specified
        if let Some(path) = &self.config_path {
            if Path::new(path).exists() {
                info!(path = %path, "Loading config file");
                builder = builder.add_source(config::File::with_name(path));
            }
        }

        // Add environment variables
        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config: AuthConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        if config.uses_insecure_default() {
            warn!(
                "Signing secret is the built-in development value; set {}_JWT_SECRET before deploying",
                self.env_prefix
            );
        }

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration from environment.
///
/// # Errors
/// See [`ConfigLoader::load`].
pub fn load_config() -> Result<AuthConfig> {
    let config_path = std::env::var("CONFIG_PATH").ok();

    let mut loader = ConfigLoader::new();
    if let Some(path) = config_path {
        loader = loader.with_config_path(path);
    }

    loader.load()
}
