//! Journal entry entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::element::Element;
use crate::domain::error::EmptyEntryError;

/// Entry identifier: creation time in milliseconds since the Unix epoch.
/// Sorting ids descending lists entries newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(i64);

impl EntryId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Derive an id from a creation timestamp
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis())
    }

    pub const fn value(&self) -> i64 {
        self.0
    }

    /// The instant this id encodes, if it is in chrono's range
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// Next id after this one
    pub const fn successor(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i64> for EntryId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// A stored record that cannot be turned into an [`Entry`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed entry: {0}")]
pub struct MalformedEntryError(pub String);

/// A single journal reflection.
///
/// `element`, `text` and `date` are fixed at creation. `folder` starts out equal
/// to `element` and only changes through [`Entry::move_to`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredEntry")]
pub struct Entry {
    id: EntryId,
    element: Element,
    text: String,
    folder: Element,
    date: DateTime<Utc>,
}

impl Entry {
    /// Create an entry with an explicit id. Text is trimmed and must not be empty.
    pub fn new(
        id: EntryId,
        element: Element,
        text: impl AsRef<str>,
        date: DateTime<Utc>,
    ) -> Result<Self, EmptyEntryError> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(EmptyEntryError);
        }
        Ok(Self {
            id,
            element,
            text: text.to_string(),
            folder: element,
            date,
        })
    }

    /// Create an entry whose id is derived from its creation time
    pub fn compose(
        element: Element,
        text: impl AsRef<str>,
        now: DateTime<Utc>,
    ) -> Result<Self, EmptyEntryError> {
        Self::new(EntryId::from_timestamp(now), element, text, now)
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn folder(&self) -> Element {
        self.folder
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Whether the entry has been filed away from its originating element
    pub fn is_moved(&self) -> bool {
        self.folder != self.element
    }

    /// Refile the entry under another folder
    pub fn move_to(&mut self, folder: Element) {
        self.folder = folder;
    }
}

/// Loose on-disk shape. Older or hand-edited records may lack fields.
#[derive(Debug, Deserialize)]
struct StoredEntry {
    id: Option<i64>,
    element: Option<String>,
    text: Option<String>,
    folder: Option<String>,
    date: Option<DateTime<Utc>>,
}

impl TryFrom<StoredEntry> for Entry {
    type Error = MalformedEntryError;

    fn try_from(stored: StoredEntry) -> Result<Self, Self::Error> {
        let id = stored
            .id
            .map(EntryId)
            .ok_or_else(|| MalformedEntryError("missing id".to_string()))?;

        let element = stored
            .element
            .as_deref()
            .ok_or_else(|| MalformedEntryError(format!("entry {id}: missing element")))
            .and_then(|tag| parse_tag(id, tag))?;

        let folder = match stored.folder.as_deref() {
            Some(tag) => parse_tag(id, tag)?,
            None => element,
        };

        let date = stored
            .date
            .or_else(|| id.timestamp())
            .ok_or_else(|| MalformedEntryError(format!("entry {id}: missing date")))?;

        // stored text is kept as written; only new entries are trimmed
        let text = stored
            .text
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| MalformedEntryError(format!("entry {id}: missing or blank text")))?;

        Ok(Entry {
            id,
            element,
            text,
            folder,
            date,
        })
    }
}

fn parse_tag(id: EntryId, tag: &str) -> Result<Element, MalformedEntryError> {
    Element::from_tag(tag)
        .ok_or_else(|| MalformedEntryError(format!("entry {id}: unknown element \"{tag}\"")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn compose_derives_id_from_time() {
        let now = at(1_700_000_000_123);
        let entry = Entry::compose(Element::Fire, "hot", now).unwrap();
        assert_eq!(entry.id(), EntryId::new(1_700_000_000_123));
        assert_eq!(entry.folder(), Element::Fire);
        assert_eq!(entry.date(), now);
        assert!(!entry.is_moved());
    }

    #[test]
    fn text_is_trimmed() {
        let entry = Entry::compose(Element::Air, "  breathe \n", at(1)).unwrap();
        assert_eq!(entry.text(), "breathe");
    }

    #[test]
    fn empty_or_whitespace_text_is_rejected() {
        assert_eq!(Entry::compose(Element::Air, "", at(1)), Err(EmptyEntryError));
        assert_eq!(Entry::compose(Element::Air, " \t\n", at(1)), Err(EmptyEntryError));
    }

    #[test]
    fn move_changes_folder_only() {
        let mut entry = Entry::compose(Element::Fire, "hot", at(2)).unwrap();
        entry.move_to(Element::Water);
        assert_eq!(entry.folder(), Element::Water);
        assert_eq!(entry.element(), Element::Fire);
        assert_eq!(entry.text(), "hot");
        assert!(entry.is_moved());
    }

    #[test]
    fn serializes_with_flat_fields() {
        let entry = Entry::compose(Element::Earth, "roots", at(1_000)).unwrap();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], 1_000);
        assert_eq!(value["element"], "earth");
        assert_eq!(value["folder"], "earth");
        assert_eq!(value["text"], "roots");
        assert!(value["date"].as_str().unwrap().starts_with("1970-01-01T00:00:01"));
    }

    #[test]
    fn deserializes_browser_written_record() {
        let json = r#"{"id":1700000000000,"element":"water","text":"flow","folder":"air","date":"2023-11-14T22:13:20.000Z"}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id().value(), 1_700_000_000_000);
        assert_eq!(entry.element(), Element::Water);
        assert_eq!(entry.folder(), Element::Air);
        assert_eq!(entry.date(), at(1_700_000_000_000));
    }

    #[test]
    fn missing_folder_defaults_to_element() {
        let json = r#"{"id":5,"element":"spirit","text":"grace","date":"2024-01-01T00:00:00Z"}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.folder(), Element::Spirit);
    }

    #[test]
    fn missing_date_defaults_to_id_instant() {
        let json = r#"{"id":86400000,"element":"earth","text":"day one"}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.date(), at(86_400_000));
    }

    #[test]
    fn malformed_records_are_rejected() {
        for json in [
            r#"{"element":"earth","text":"no id"}"#,
            r#"{"id":1,"text":"no element"}"#,
            r#"{"id":1,"element":"earth"}"#,
            r#"{"id":1,"element":"inbox","text":"bad tag"}"#,
            r#"{"id":1,"element":"earth","folder":"inbox","text":"bad folder"}"#,
            r#"{"id":1,"element":"earth","text":"   "}"#,
        ] {
            assert!(serde_json::from_str::<Entry>(json).is_err(), "accepted {json}");
        }
    }

    #[test]
    fn stored_text_is_not_trimmed() {
        let json = r#"{"id":3,"element":"water","text":"  tide \n"}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.text(), "  tide \n");
    }

    #[test]
    fn entry_id_parse_and_order() {
        assert_eq!("42".parse::<EntryId>().unwrap(), EntryId::new(42));
        assert!("abc".parse::<EntryId>().is_err());
        assert!(EntryId::new(2) > EntryId::new(1));
        assert_eq!(EntryId::new(9).successor(), EntryId::new(10));
    }
}
