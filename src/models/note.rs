use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use super::NoteId;

/// Timestamp layout used by the `id|timestamp|content` record output.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// A note with its plaintext content.
///
/// Notes are the primary unit of capture. The content here has already
/// been run through the inverse transform; the obfuscated bytes only
/// exist at the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    id: NoteId,
    content: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl Note {
    pub fn new(id: NoteId, content: impl Into<String>, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            content: content.into(),
            created_at,
        }
    }

    /// Returns the note's unique identifier.
    pub fn id(&self) -> NoteId {
        self.id
    }

    /// Returns the note's plaintext content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the note was created.
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// Formats the creation time as `YYYY-MM-DD HH:MM:SS` (UTC).
    pub fn formatted_timestamp(&self) -> String {
        self.created_at
            .format(TIMESTAMP_FORMAT)
            .unwrap_or_else(|_| self.created_at.unix_timestamp().to_string())
    }

    /// Renders the note as a single delimited record line.
    pub fn record_line(&self) -> String {
        format!("{}|{}|{}", self.id, self.formatted_timestamp(), self.content)
    }
}
