use serde::{Deserialize, Serialize};

use super::TagId;

/// A tag extracted from note content.
///
/// Tag names are unique across the store; the same `#name` occurrence in
/// several notes resolves to one row linked many times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    id: TagId,
    name: String,
}

impl Tag {
    pub fn new(id: TagId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the tag's unique identifier.
    pub fn id(&self) -> TagId {
        self.id
    }

    /// Returns the tag's name (without the leading `#`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders the tag as a single delimited record line.
    pub fn record_line(&self) -> String {
        format!("{}|{}", self.id, self.name)
    }
}
