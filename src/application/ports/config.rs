//! Settings persistence port

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Where user settings (data directory, default element, audio options) live
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read the stored settings; a missing file yields an all-`None` config
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write a fresh settings file. Refuses to overwrite an existing one.
    async fn init(&self) -> Result<(), ConfigError>;

    /// Read the stored settings, falling back to an empty config when they
    /// cannot be read or parsed
    async fn load_or_empty(&self) -> AppConfig {
        match self.load().await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %self.path().display(), error = %e, "Ignoring unreadable config file");
                AppConfig::empty()
            }
        }
    }
}
