use thiserror::Error;

/// Errors produced by the note store and relationship engine.
///
/// The core library never exits the process; every failure is surfaced
/// through this enum so the CLI layer can decide how to report it and
/// which exit code to use.
#[derive(Debug, Error)]
pub enum JotError {
    /// The database could not be opened or its schema initialized.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] rusqlite::Error),

    /// A single storage statement failed unexpectedly.
    #[error("storage operation failed: {0}")]
    Storage(#[from] rusqlite::Error),

    /// No secret key material is available from the environment.
    #[error("no key material available (set JOT_KEY)")]
    MissingKeyMaterial,

    /// A tag lookup by name found nothing.
    #[error("tag not found: {name}")]
    TagNotFound { name: String },

    /// The tag pattern could not be compiled.
    #[error("pattern engine failure: {0}")]
    Pattern(#[source] regex::Error),

    /// A stored timestamp is outside the representable range.
    #[error("invalid timestamp in store: {0}")]
    InvalidTimestamp(#[from] time::error::ComponentRange),
}

impl JotError {
    /// Returns true for conditions caused by user input rather than an
    /// internal failure (missing key, unknown tag name).
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            JotError::MissingKeyMaterial | JotError::TagNotFound { .. }
        )
    }
}
