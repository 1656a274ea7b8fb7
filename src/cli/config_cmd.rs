//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AudioConfig;
use crate::domain::element::Element;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;

    match key {
        "data_dir" => config.data_dir = Some(value.to_string()),
        "default_element" => config.default_element = Some(value.trim().to_lowercase()),
        "audio.save" => {
            config.audio.get_or_insert_with(AudioConfig::default).save =
                Some(parse_bool(value).map_err(|_| bool_error(key))?);
        }
        "audio.recordings_dir" => {
            config
                .audio
                .get_or_insert_with(AudioConfig::default)
                .recordings_dir = Some(value.to_string());
        }
        _ => unreachable!(), // Already validated
    }

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;

    let value = match key {
        "data_dir" => config.data_dir,
        "default_element" => config.default_element,
        "audio.save" => config
            .audio
            .as_ref()
            .and_then(|a| a.save)
            .map(|b| b.to_string()),
        "audio.recordings_dir" => config.audio.and_then(|a| a.recordings_dir),
        _ => unreachable!(),
    };

    presenter.output(value.as_deref().unwrap_or(NOT_SET));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;
    let audio = config.audio.unwrap_or_default();

    presenter.key_value("data_dir", config.data_dir.as_deref().unwrap_or(NOT_SET));
    presenter.key_value(
        "default_element",
        config.default_element.as_deref().unwrap_or(NOT_SET),
    );
    presenter.key_value(
        "audio.save",
        &audio
            .save
            .map(|b| b.to_string())
            .unwrap_or_else(|| NOT_SET.to_string()),
    );
    presenter.key_value(
        "audio.recordings_dir",
        audio.recordings_dir.as_deref().unwrap_or(NOT_SET),
    );

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "default_element" => {
            value
                .parse::<Element>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        }
        "audio.save" => {
            parse_bool(value).map_err(|_| bool_error(key))?;
        }
        "data_dir" | "audio.recordings_dir" => {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Path must not be empty".to_string(),
                });
            }
        }
        _ => {}
    }
    Ok(())
}

fn bool_error(key: &str) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: "Value must be 'true' or 'false'".to_string(),
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("NO"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn validate_default_element() {
        assert!(validate_config_value("default_element", "water").is_ok());
        assert!(validate_config_value("default_element", " Fire ").is_ok());
        assert!(validate_config_value("default_element", "aether").is_err());
    }

    #[test]
    fn validate_audio_save() {
        assert!(validate_config_value("audio.save", "false").is_ok());
        assert!(validate_config_value("audio.save", "sometimes").is_err());
    }

    #[test]
    fn validate_paths_not_blank() {
        assert!(validate_config_value("data_dir", "/srv/journal").is_ok());
        assert!(validate_config_value("audio.recordings_dir", "  ").is_err());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = check_key("api_key").unwrap_err();
        assert!(err.to_string().contains("default_element"));
    }
}
