mod schema;
mod store;

use std::path::Path;

use rusqlite::Connection;

use crate::error::JotError;
use schema::INITIAL_SCHEMA;

pub use store::{ListOrder, NoteRecord, TagInsert};

/// Database wrapper providing connection management and schema initialization.
///
/// The connection is a process-wide resource: opened once at first use,
/// owned by the service for the life of the invocation, closed on drop.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens an in-memory SQLite database.
    ///
    /// Automatically initializes the schema on connection open.
    pub fn in_memory() -> Result<Self, JotError> {
        let conn = Connection::open_in_memory().map_err(JotError::StorageUnavailable)?;
        let db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a file-based SQLite database at the given path.
    ///
    /// Creates the database file if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, JotError> {
        let conn = Connection::open(path).map_err(JotError::StorageUnavailable)?;
        let db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// Uses IF NOT EXISTS throughout so reopening an existing store is a
    /// no-op rather than an error.
    fn initialize_schema(&self) -> Result<(), JotError> {
        self.conn
            .execute("PRAGMA foreign_keys = ON", [])
            .map_err(JotError::StorageUnavailable)?;
        self.conn
            .execute_batch(INITIAL_SCHEMA)
            .map_err(JotError::StorageUnavailable)?;
        Ok(())
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
