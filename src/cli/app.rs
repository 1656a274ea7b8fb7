//! Journal command handlers

use std::env;
use std::process::ExitCode;

use crate::application::ports::ConfigStore;
use crate::application::{EntryStore, EntryStoreError};
use crate::domain::config::AppConfig;
use crate::domain::element::Element;
use crate::domain::journal::EntryId;
use crate::infrastructure::{FileStore, XdgConfigStore};

use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "ELEMENTA_DATA_DIR";

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let file_config = XdgConfigStore::new().load_or_empty().await;

    let env_config = AppConfig {
        data_dir: env::var(DATA_DIR_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

/// Entry store over the configured data directory
pub fn open_store(config: &AppConfig) -> EntryStore<FileStore> {
    EntryStore::new(FileStore::new(config.data_dir_or_default()))
}

fn exit_for(presenter: &Presenter, err: &EntryStoreError) -> ExitCode {
    presenter.error(&err.to_string());
    ExitCode::from(EXIT_ERROR)
}

/// `write`: compose and save an entry
pub async fn run_write(config: &AppConfig, element: Option<Element>, words: &[String]) -> ExitCode {
    let presenter = Presenter::new();
    let element = element.unwrap_or_else(|| config.default_element_or_default());
    let store = open_store(config);

    match store.create(element, &words.join(" ")).await {
        Ok(entry) => {
            presenter.success(&format!("Saved to {}", presenter.element_label(element)));
            presenter.output(&entry.id().to_string());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => exit_for(&presenter, &e),
    }
}

/// `list`: print entries newest first, optionally one folder only
pub async fn run_list(config: &AppConfig, folder: Option<Element>, json: bool) -> ExitCode {
    let presenter = Presenter::new();
    let store = open_store(config);

    let entries = match folder {
        Some(folder) => store.in_folder(folder).await,
        None => store.load_all().await,
    };

    if json {
        return match serde_json::to_string_pretty(&entries) {
            Ok(json) => {
                presenter.output(&json);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                presenter.error(&format!("Failed to serialize entries: {}", e));
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    if entries.is_empty() {
        presenter.info("No entries yet");
        return ExitCode::from(EXIT_SUCCESS);
    }

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            presenter.output("");
        }
        presenter.entry(entry);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// `show`: print one entry
pub async fn run_show(config: &AppConfig, id: EntryId) -> ExitCode {
    let presenter = Presenter::new();
    match open_store(config).find(id).await {
        Some(entry) => {
            presenter.entry(&entry);
            ExitCode::from(EXIT_SUCCESS)
        }
        None => {
            presenter.error(&format!("Entry {} not found", id));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// `delete`: remove an entry; unknown ids are not an error
pub async fn run_delete(config: &AppConfig, id: EntryId) -> ExitCode {
    let presenter = Presenter::new();
    let store = open_store(config);
    let existed = store.find(id).await.is_some();

    match store.delete_by_id(id).await {
        Ok(()) if existed => {
            presenter.success(&format!("Deleted entry {}", id));
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(()) => {
            presenter.warn(&format!("No entry {} to delete", id));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => exit_for(&presenter, &e.into()),
    }
}

/// `move`: refile an entry
pub async fn run_move(config: &AppConfig, id: EntryId, folder: Element) -> ExitCode {
    let presenter = Presenter::new();
    match open_store(config).move_to_folder(id, folder).await {
        Ok(entry) => {
            presenter.success(&format!(
                "Moved entry {} to {}",
                entry.id(),
                presenter.element_label(folder)
            ));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => exit_for(&presenter, &e),
    }
}

/// `prompt`: print a random prompt for an element
pub fn run_prompt(config: &AppConfig, element: Option<Element>) -> ExitCode {
    let presenter = Presenter::new();
    let element = element.unwrap_or_else(|| config.default_element_or_default());
    presenter.output(element.random_prompt());
    ExitCode::from(EXIT_SUCCESS)
}

/// `element`: print the catalog card
pub fn run_element(element: Element) -> ExitCode {
    Presenter::new().element_card(element);
    ExitCode::from(EXIT_SUCCESS)
}
