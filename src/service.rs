use time::OffsetDateTime;

use crate::db::{Database, ListOrder, NoteRecord, TagInsert};
use crate::error::JotError;
use crate::models::{Note, NoteId, Tag};
use crate::{cipher, extract};

/// Relationship engine over notes, tags and their link edges.
///
/// `NoteService` owns the `Database` and provides the high-level
/// operations the command surface maps onto. It is the only layer that
/// runs the content transform or touches more than one collection per
/// operation, and it never terminates the process; all failures come
/// back as [`JotError`].
pub struct NoteService {
    db: Database,
}

impl NoteService {
    /// Creates a new service owning the given database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Returns a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Writes a note and links every tag embedded in its content.
    ///
    /// The content is obfuscated before persistence; tag extraction runs
    /// over the original plaintext. Tag names are attached in order of
    /// appearance via insert-or-link, so a name shared across notes
    /// resolves to one tag row with one link per note. The whole
    /// sequence runs in a single transaction.
    ///
    /// # Examples
    ///
    /// ```
    /// use jot::{Database, NoteService};
    ///
    /// # fn main() -> Result<(), jot::JotError> {
    /// let service = NoteService::new(Database::in_memory()?);
    /// let id = service.write_note("pick up milk #errands", "secret")?;
    /// assert!(id.get() > 0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn write_note(&self, content: &str, key: &str) -> Result<NoteId, JotError> {
        // Transform first so a missing or unusable key can never leave a
        // partially written note behind.
        let obfuscated = cipher::encrypt(key, content.as_bytes());
        let tags = extract::extract(content)?;

        let conn = self.db.connection();
        conn.execute("BEGIN TRANSACTION", [])?;

        let result: Result<NoteId, JotError> = (|| {
            let note_id = self
                .db
                .create_note(&obfuscated, OffsetDateTime::now_utc())?;

            for name in &tags {
                self.upsert_and_link(name, note_id)?;
            }

            Ok(note_id)
        })();

        match result {
            Ok(note_id) => {
                conn.execute("COMMIT", [])?;
                Ok(note_id)
            }
            Err(e) => {
                conn.execute("ROLLBACK", []).ok();
                Err(e)
            }
        }
    }

    /// Attaches one tag name to a note, creating the tag if needed.
    ///
    /// Insert-then-handle-conflict: a fresh insert links the new row; a
    /// uniqueness conflict links the existing row instead. If the
    /// post-conflict lookup finds nothing (a race or store anomaly) the
    /// link is skipped silently so the already-durable note write
    /// survives. Any other storage failure propagates.
    fn upsert_and_link(&self, name: &str, note_id: NoteId) -> Result<(), JotError> {
        match self.db.create_tag(name)? {
            TagInsert::Created(tag_id) => self.db.link(tag_id, note_id),
            TagInsert::Conflict => match self.db.find_tag(name)? {
                Some(tag_id) => self.db.link(tag_id, note_id),
                None => Ok(()),
            },
        }
    }

    /// Reads a single note, decrypting its content.
    ///
    /// Returns `None` if no note has the given id.
    pub fn read_note(&self, id: NoteId, key: &str) -> Result<Option<Note>, JotError> {
        match self.db.get_note(id)? {
            Some(record) => Ok(Some(Self::decrypt_record(record, key))),
            None => Ok(None),
        }
    }

    /// Reads all notes in insertion order, decrypting each.
    pub fn read_notes(&self, key: &str) -> Result<Vec<Note>, JotError> {
        let records = self.db.list_notes(ListOrder::Insertion, None)?;
        Ok(Self::decrypt_records(records, key))
    }

    /// Reads the `count` most recent notes, newest first.
    pub fn read_recent(&self, count: usize, key: &str) -> Result<Vec<Note>, JotError> {
        let records = self.db.list_notes(ListOrder::RecencyDesc, Some(count))?;
        Ok(Self::decrypt_records(records, key))
    }

    /// Reads every note linked to the named tag.
    ///
    /// An unknown tag name is `TagNotFound`, distinct from a known tag
    /// with zero linked notes (which yields an empty vector).
    pub fn read_tagged(&self, name: &str, key: &str) -> Result<Vec<Note>, JotError> {
        let tag_id = self
            .db
            .find_tag(name)?
            .ok_or_else(|| JotError::TagNotFound {
                name: name.to_string(),
            })?;

        let records = self.db.notes_for_tag(tag_id)?;
        Ok(Self::decrypt_records(records, key))
    }

    /// Lists all tags, id ascending. Needs no key material.
    pub fn list_tags(&self) -> Result<Vec<Tag>, JotError> {
        self.db.list_tags()
    }

    /// Deletes a note and everything that only existed because of it.
    ///
    /// Removes the note's link edges, removes the note row, then
    /// garbage-collects every tag left with zero links. Link removal must
    /// precede collection so the collector sees the post-delete state.
    /// Deleting an id that does not exist is a no-op. The whole sequence
    /// runs in a single transaction.
    pub fn delete_note(&self, id: NoteId) -> Result<(), JotError> {
        let conn = self.db.connection();
        conn.execute("BEGIN TRANSACTION", [])?;

        let result: Result<(), JotError> = (|| {
            self.db.unlink_all_for_note(id)?;
            self.db.delete_note(id)?;

            for tag_id in self.db.tags_with_zero_links()? {
                self.db.delete_tag(tag_id)?;
            }

            Ok(())
        })();

        match result {
            Ok(()) => {
                conn.execute("COMMIT", [])?;
                Ok(())
            }
            Err(e) => {
                conn.execute("ROLLBACK", []).ok();
                Err(e)
            }
        }
    }

    fn decrypt_record(record: NoteRecord, key: &str) -> Note {
        let plaintext = cipher::decrypt(key, &record.content);
        Note::new(
            record.id,
            String::from_utf8_lossy(&plaintext).into_owned(),
            record.created_at,
        )
    }

    fn decrypt_records(records: Vec<NoteRecord>, key: &str) -> Vec<Note> {
        records
            .into_iter()
            .map(|record| Self::decrypt_record(record, key))
            .collect()
    }
}
