//! Storage collaborator contract: point CRUD over the three collections.
//!
//! Every method here is a single statement against the store. Multi-step
//! sequences (write-and-link, delete-unlink-collect) and the content
//! transform belong to the relationship engine in `service`; rows move
//! through this layer with their content still obfuscated.

use rusqlite::{ErrorCode, OptionalExtension};
use time::OffsetDateTime;

use super::Database;
use crate::error::JotError;
use crate::models::{NoteId, Tag, TagId};

/// A raw note row. `content` holds the obfuscated bytes exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub id: NoteId,
    pub content: Vec<u8>,
    pub created_at: OffsetDateTime,
}

/// Ordering for note listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrder {
    /// Insertion order (id ascending).
    #[default]
    Insertion,
    /// Most recent first (id descending).
    RecencyDesc,
}

/// Outcome of attempting to insert a tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagInsert {
    /// A new row was created.
    Created(TagId),
    /// The name already exists; the caller should look up the existing row.
    Conflict,
}

impl Database {
    /// Inserts a note row and returns its assigned id.
    pub fn create_note(
        &self,
        content: &[u8],
        created_at: OffsetDateTime,
    ) -> Result<NoteId, JotError> {
        self.connection().execute(
            "INSERT INTO notes (content, created_at) VALUES (?1, ?2)",
            (content, created_at.unix_timestamp()),
        )?;
        Ok(NoteId::new(self.connection().last_insert_rowid()))
    }

    /// Fetches a single note row by id.
    pub fn get_note(&self, id: NoteId) -> Result<Option<NoteRecord>, JotError> {
        let row = self
            .connection()
            .query_row(
                "SELECT id, content, created_at FROM notes WHERE id = ?1",
                [id.get()],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, Vec<u8>>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                },
            )
            .optional()?;

        row.map(Self::record_from_row).transpose()
    }

    /// Lists note rows in the requested order, optionally limited.
    pub fn list_notes(
        &self,
        order: ListOrder,
        limit: Option<usize>,
    ) -> Result<Vec<NoteRecord>, JotError> {
        let order_clause = match order {
            ListOrder::Insertion => "ASC",
            ListOrder::RecencyDesc => "DESC",
        };
        let query = match limit {
            Some(n) => format!(
                "SELECT id, content, created_at FROM notes ORDER BY id {} LIMIT {}",
                order_clause, n
            ),
            None => format!(
                "SELECT id, content, created_at FROM notes ORDER BY id {}",
                order_clause
            ),
        };

        let mut stmt = self.connection().prepare(&query)?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Vec<u8>>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(Self::record_from_row(row?)?);
        }
        Ok(records)
    }

    /// Lists note rows linked to the given tag, in insertion order.
    pub fn notes_for_tag(&self, tag_id: TagId) -> Result<Vec<NoteRecord>, JotError> {
        let mut stmt = self.connection().prepare(
            "SELECT n.id, n.content, n.created_at FROM notes n
             WHERE n.id IN (SELECT note_id FROM note_tags WHERE tag_id = ?1)
             ORDER BY n.id ASC",
        )?;
        let rows = stmt.query_map([tag_id.get()], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Vec<u8>>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(Self::record_from_row(row?)?);
        }
        Ok(records)
    }

    /// Attempts to insert a tag row.
    ///
    /// A uniqueness violation on the name is reported as `TagInsert::Conflict`
    /// rather than an error; any other failure propagates.
    pub fn create_tag(&self, name: &str) -> Result<TagInsert, JotError> {
        let result = self
            .connection()
            .execute("INSERT INTO tags (name) VALUES (?1)", [name]);

        match result {
            Ok(_) => Ok(TagInsert::Created(TagId::new(
                self.connection().last_insert_rowid(),
            ))),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Ok(TagInsert::Conflict)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Looks up a tag id by exact (case-sensitive) name.
    pub fn find_tag(&self, name: &str) -> Result<Option<TagId>, JotError> {
        let id: Option<i64> = self
            .connection()
            .query_row("SELECT id FROM tags WHERE name = ?1", [name], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(id.map(TagId::new))
    }

    /// Lists all tags, id ascending.
    pub fn list_tags(&self) -> Result<Vec<Tag>, JotError> {
        let mut stmt = self
            .connection()
            .prepare("SELECT id, name FROM tags ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(Tag::new(TagId::new(row.get(0)?), row.get::<_, String>(1)?))
        })?;

        let mut tags = Vec::new();
        for row in rows {
            tags.push(row?);
        }
        Ok(tags)
    }

    /// Creates a link edge between a tag and a note.
    pub fn link(&self, tag_id: TagId, note_id: NoteId) -> Result<(), JotError> {
        self.connection().execute(
            "INSERT INTO note_tags (tag_id, note_id) VALUES (?1, ?2)",
            (tag_id.get(), note_id.get()),
        )?;
        Ok(())
    }

    /// Removes every link edge referencing the given note.
    pub fn unlink_all_for_note(&self, note_id: NoteId) -> Result<(), JotError> {
        self.connection()
            .execute("DELETE FROM note_tags WHERE note_id = ?1", [note_id.get()])?;
        Ok(())
    }

    /// Deletes a note row. Missing ids delete zero rows, which is fine.
    pub fn delete_note(&self, id: NoteId) -> Result<(), JotError> {
        self.connection()
            .execute("DELETE FROM notes WHERE id = ?1", [id.get()])?;
        Ok(())
    }

    /// Returns the ids of tags with no remaining link edges.
    pub fn tags_with_zero_links(&self) -> Result<Vec<TagId>, JotError> {
        let mut stmt = self.connection().prepare(
            "SELECT id FROM tags WHERE id NOT IN (SELECT DISTINCT tag_id FROM note_tags)",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(TagId::new(row?));
        }
        Ok(ids)
    }

    /// Deletes a tag row by id.
    pub fn delete_tag(&self, id: TagId) -> Result<(), JotError> {
        self.connection()
            .execute("DELETE FROM tags WHERE id = ?1", [id.get()])?;
        Ok(())
    }

    fn record_from_row((id, content, created_at): (i64, Vec<u8>, i64)) -> Result<NoteRecord, JotError> {
        Ok(NoteRecord {
            id: NoteId::new(id),
            content,
            created_at: OffsetDateTime::from_unix_timestamp(created_at)?,
        })
    }
}
