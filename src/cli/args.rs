//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::element::Element;
use crate::domain::journal::EntryId;

/// Elementa - journal reflections filed under the five elements
#[derive(Parser, Debug)]
#[command(name = "elementa")]
#[command(version)]
#[command(about = "Elemental journaling: write, file and record reflections")]
#[command(long_about = None)]
pub struct Cli {
    /// Directory holding the journal (overrides config and ELEMENTA_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a new entry
    Write {
        /// Element to write under (defaults to config default_element)
        #[arg(short, long, value_name = "ELEMENT")]
        element: Option<ElementArg>,

        /// Entry text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List entries, newest first
    List {
        /// Only entries filed in this folder
        #[arg(short, long, value_name = "ELEMENT")]
        folder: Option<ElementArg>,

        /// Print raw JSON instead of formatted entries
        #[arg(long)]
        json: bool,
    },
    /// Show a single entry
    Show {
        /// Entry id
        id: EntryId,
    },
    /// Delete an entry
    Delete {
        /// Entry id
        id: EntryId,
    },
    /// File an entry under another element folder
    Move {
        /// Entry id
        id: EntryId,
        /// Target folder
        folder: ElementArg,
    },
    /// Print a random writing prompt
    Prompt {
        /// Element to draw from (defaults to config default_element)
        element: Option<ElementArg>,
    },
    /// Describe an element
    Element {
        element: ElementArg,
    },
    /// Record a reflection until Ctrl+C
    Record {
        /// Element to record under (defaults to config default_element)
        #[arg(short, long, value_name = "ELEMENT")]
        element: Option<ElementArg>,

        /// Replay recognizer output from a JSON script instead of the microphone
        #[arg(long, value_name = "FILE")]
        script: Option<PathBuf>,

        /// Discard captured audio instead of archiving it
        #[arg(long)]
        no_save: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Element argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ElementArg {
    Earth,
    Water,
    Fire,
    Air,
    Spirit,
}

impl From<ElementArg> for Element {
    fn from(arg: ElementArg) -> Self {
        match arg {
            ElementArg::Earth => Element::Earth,
            ElementArg::Water => Element::Water,
            ElementArg::Fire => Element::Fire,
            ElementArg::Air => Element::Air,
            ElementArg::Spirit => Element::Spirit,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "data_dir",
    "default_element",
    "audio.save",
    "audio.recordings_dir",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
