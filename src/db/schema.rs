/// Complete database schema for the note store.
///
/// Uses CREATE TABLE/INDEX IF NOT EXISTS so initialization is idempotent
/// across reopens. All statements run in a single batch.
///
/// `note_tags` carries no ON DELETE CASCADE on purpose: link removal and
/// orphaned-tag collection are explicit steps owned by the relationship
/// engine, not the storage layer.
pub const INITIAL_SCHEMA: &str = r#"
-- Notes: obfuscated content bytes plus a creation timestamp
CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY,
    content BLOB NOT NULL,
    created_at INTEGER NOT NULL
);

-- Tags: unique, case-sensitive names
CREATE TABLE IF NOT EXISTS tags (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

-- Junction table: many-to-many edges between notes and tags
CREATE TABLE IF NOT EXISTS note_tags (
    id INTEGER PRIMARY KEY,
    tag_id INTEGER NOT NULL REFERENCES tags(id),
    note_id INTEGER NOT NULL REFERENCES notes(id)
);

-- Index for recency queries over notes
CREATE INDEX IF NOT EXISTS idx_notes_created ON notes(created_at);

-- Indexes for junction table lookups in both directions
CREATE INDEX IF NOT EXISTS idx_note_tags_note ON note_tags(note_id);
CREATE INDEX IF NOT EXISTS idx_note_tags_tag ON note_tags(tag_id);
"#;
