//! Settings file under the XDG config directory

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, AudioConfig};
use crate::domain::error::ConfigError;

const APP_DIR: &str = "elementa";
const FILE_NAME: &str = "config.toml";

/// `config.toml` under `$XDG_CONFIG_HOME/elementa`
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("~/.config"));
        Self::with_path(base.join(APP_DIR).join(FILE_NAME))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Settings written by `init`: the defaults with the journal and
    /// recordings directories resolved, so the file shows where data lives
    pub fn starter_config() -> AppConfig {
        let defaults = AppConfig::defaults();
        let data_dir = defaults.data_dir_or_default();
        let recordings_dir = defaults.recordings_dir_or_default();

        AppConfig {
            data_dir: Some(data_dir.to_string_lossy().into_owned()),
            audio: Some(AudioConfig {
                save: Some(defaults.save_audio_or_default()),
                recordings_dir: Some(recordings_dir.to_string_lossy().into_owned()),
            }),
            ..defaults
        }
    }

    fn decode(content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("toml.tmp")
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Self::decode(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(AppConfig::empty()),
            Err(e) => Err(ConfigError::ReadError(e.to_string())),
        }
    }

    /// Written to a sibling temp file and renamed, like the journal file
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let write_error = |e: std::io::Error| ConfigError::WriteError(e.to_string());

        let content =
            toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(write_error)?;
        }

        let temp = self.temp_path();
        fs::write(&temp, content).await.map_err(write_error)?;
        fs::rename(&temp, &self.path).await.map_err(write_error)?;
        tracing::debug!(path = %self.path.display(), "Saved config");
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path.display().to_string(),
            ));
        }
        self.save(&Self::starter_config()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_is_namespaced() {
        let store = XdgConfigStore::new();
        let path = store.path();
        assert!(path.to_string_lossy().contains("elementa"));
        assert!(path.ends_with("config.toml"));
    }

    #[test]
    fn custom_path() {
        let store = XdgConfigStore::with_path("/custom/path/config.toml");
        assert_eq!(store.path(), PathBuf::from("/custom/path/config.toml"));
    }

    #[test]
    fn decode_with_audio_table() {
        let content = r#"
data_dir = "/srv/journal"
default_element = "water"

[audio]
save = false
recordings_dir = "/srv/recordings"
"#;

        let config = XdgConfigStore::decode(content).unwrap();
        assert_eq!(config.data_dir, Some("/srv/journal".to_string()));
        assert_eq!(config.default_element, Some("water".to_string()));
        let audio = config.audio.unwrap();
        assert_eq!(audio.save, Some(false));
        assert_eq!(audio.recordings_dir, Some("/srv/recordings".to_string()));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            XdgConfigStore::decode("data_dir = ["),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn starter_config_spells_out_directories() {
        let starter = XdgConfigStore::starter_config();
        let audio = starter.audio.clone().unwrap();
        assert_eq!(
            starter.data_dir.as_deref().map(PathBuf::from),
            Some(AppConfig::defaults().data_dir_or_default())
        );
        assert_eq!(audio.save, Some(true));
        assert!(audio.recordings_dir.unwrap().ends_with("recordings"));
        assert_eq!(starter.default_element, Some("earth".to_string()));
    }

    #[tokio::test]
    async fn init_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("elementa/config.toml"));

        store.init().await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.default_element, Some("earth".to_string()));
        assert!(loaded.save_audio_or_default());
        assert!(loaded.data_dir.is_some());
        assert_eq!(
            loaded.recordings_dir_or_default(),
            loaded.data_dir_or_default().join("recordings")
        );
        assert!(!dir.path().join("elementa/config.toml.tmp").exists());

        assert!(matches!(
            store.init().await,
            Err(ConfigError::AlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("absent.toml"));
        let config = store.load().await.unwrap();
        assert!(config.data_dir.is_none());
        assert!(config.audio.is_none());
    }

    #[tokio::test]
    async fn unreadable_file_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_element = [").unwrap();
        let store = XdgConfigStore::with_path(path);

        assert!(store.load().await.is_err());
        let config = store.load_or_empty().await;
        assert!(config.default_element.is_none());
    }
}
