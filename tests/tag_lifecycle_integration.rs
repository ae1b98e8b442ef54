use anyhow::Result;
use jot::{Database, JotError, NoteService};

const KEY: &str = "integration-secret";

fn table_count(service: &NoteService, table: &str) -> i64 {
    service
        .database()
        .connection()
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })
        .expect("count query failed")
}

#[test]
fn tag_shared_by_two_notes_exists_once_with_two_links() -> Result<()> {
    let service = NoteService::new(Database::in_memory()?);

    service.write_note("first mention of #foo", KEY)?;
    service.write_note("second mention of #foo", KEY)?;

    assert_eq!(table_count(&service, "tags"), 1);
    assert_eq!(table_count(&service, "note_tags"), 2);
    Ok(())
}

#[test]
fn deleting_sole_owner_collects_the_tag() -> Result<()> {
    let service = NoteService::new(Database::in_memory()?);

    let id = service.write_note("only note with #solo", KEY)?;
    service.delete_note(id)?;

    assert!(matches!(
        service.read_tagged("solo", KEY),
        Err(JotError::TagNotFound { .. })
    ));
    assert_eq!(table_count(&service, "tags"), 0);
    assert_eq!(table_count(&service, "note_tags"), 0);
    Ok(())
}

#[test]
fn deleting_one_of_two_owners_keeps_the_tag() -> Result<()> {
    let service = NoteService::new(Database::in_memory()?);

    let doomed = service.write_note("doomed #shared", KEY)?;
    let survivor = service.write_note("survivor #shared", KEY)?;

    service.delete_note(doomed)?;

    let remaining = service.read_tagged("shared", KEY)?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id(), survivor);
    Ok(())
}

#[test]
fn unknown_tag_is_not_found_while_known_empty_tag_is_not() -> Result<()> {
    let service = NoteService::new(Database::in_memory()?);

    service.write_note("note with #known", KEY)?;

    // Never-created name: distinct "not found" condition.
    assert!(matches!(
        service.read_tagged("unknown", KEY),
        Err(JotError::TagNotFound { .. })
    ));

    // Existing tag: found, lists its notes.
    let notes = service.read_tagged("known", KEY)?;
    assert_eq!(notes.len(), 1);
    Ok(())
}

#[test]
fn tag_listing_survives_note_churn() -> Result<()> {
    let service = NoteService::new(Database::in_memory()?);

    let a = service.write_note("#alpha note", KEY)?;
    service.write_note("#beta note", KEY)?;
    service.delete_note(a)?;

    let names: Vec<String> = service
        .list_tags()?
        .iter()
        .map(|t| t.name().to_string())
        .collect();
    assert_eq!(names, vec!["beta"]);
    Ok(())
}

#[test]
fn delete_of_unknown_id_leaves_everything_untouched() -> Result<()> {
    let service = NoteService::new(Database::in_memory()?);

    service.write_note("keep me #here", KEY)?;
    let before = (
        table_count(&service, "notes"),
        table_count(&service, "tags"),
        table_count(&service, "note_tags"),
    );

    service.delete_note(jot::NoteId::new(12345))?;

    let after = (
        table_count(&service, "notes"),
        table_count(&service, "tags"),
        table_count(&service, "note_tags"),
    );
    assert_eq!(before, after);
    Ok(())
}
