//! CLI presenter for output formatting

use chrono::{DateTime, Local, Utc};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::element::Element;
use crate::domain::journal::Entry;

/// Display format for entry dates, e.g. "Mar 9, 02:05 PM"
const DATE_FORMAT: &str = "%b %-d, %I:%M %p";

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Element name in its palette color
    pub fn element_label(&self, element: Element) -> ColoredString {
        let (r, g, b) = element.color().rgb();
        element.label().truecolor(r, g, b).bold()
    }

    /// Format an entry date for display in local time
    pub fn format_date(&self, date: DateTime<Utc>) -> String {
        date.with_timezone(&Local).format(DATE_FORMAT).to_string()
    }

    /// Header line for an entry: id, element, folder (when moved) and date
    pub fn format_entry_header(&self, entry: &Entry) -> String {
        let mut header = format!(
            "{} {}",
            entry.id().to_string().dimmed(),
            self.element_label(entry.element())
        );
        if entry.is_moved() {
            header.push_str(&format!(" → {}", self.element_label(entry.folder())));
        }
        header.push_str(&format!("  {}", self.format_date(entry.date()).dimmed()));
        header
    }

    /// Print an entry: header line, then its text
    pub fn entry(&self, entry: &Entry) {
        println!("{}", self.format_entry_header(entry));
        println!("{}", entry.text());
    }

    /// Print the full catalog card for an element
    pub fn element_card(&self, element: Element) {
        let details = element.details();
        let geometry = element.geometry();

        println!("{}  {}", self.element_label(element), details.figure.dimmed());
        println!("{}", details.description);
        println!();
        self.key_value("color", &element.color().to_string());
        self.key_value("shape", &format!("{} ({})", geometry.shape, geometry.size));
        self.key_value("in nature", details.nature_action);
        println!();
        for fact in details.quick_facts {
            println!("  • {}", fact);
        }
        println!();
        println!("{}", "Prompts".cyan());
        for prompt in element.prompts() {
            println!("  {}", prompt);
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
