use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jot::utils::{ensure_database_directory, get_database_path};
use jot::{Database, JotError, NoteId, NoteService, cipher};

/// jot - personal note-taking with hashtags and content obfuscation
#[derive(Parser)]
#[command(name = "jot")]
#[command(about = "A personal note store with hashtag extraction")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Write a new note; #tags embedded in the text are extracted and linked
    Write {
        /// The content of the note
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Read one note by id, or all notes when no id is given
    Read {
        /// Note id to read
        #[arg(value_name = "ID")]
        id: Option<i64>,
    },

    /// List notes carrying a tag, or all tags when no name is given
    Tag {
        /// Tag name to look up (without the leading #)
        #[arg(value_name = "NAME")]
        name: Option<String>,
    },

    /// Delete a note, its tag links, and any tags left unused
    Delete {
        /// Note id to delete
        #[arg(value_name = "ID")]
        id: i64,
    },

    /// Show the most recent notes, newest first
    Recent {
        /// How many notes to show
        #[arg(value_name = "COUNT", default_value_t = 10)]
        count: usize,
    },
}

fn main() {
    // Load .env before anything reads JOT_KEY.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(&cli.command) {
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e}");
        std::process::exit(exit_code);
    }
}

/// Determines if an error is a user error (vs internal error).
///
/// User errors (unknown tag, missing key, empty content) exit with 1;
/// internal failures such as storage errors exit with 2.
fn is_user_error(error: &anyhow::Error) -> bool {
    if let Some(jot_err) = error.downcast_ref::<JotError>() {
        return jot_err.is_user_error();
    }
    error.to_string().contains("cannot be empty")
}

fn run(command: &Commands) -> Result<()> {
    let db_path = get_database_path()?;
    ensure_database_directory(&db_path)?;

    let db = Database::open(&db_path).context("Failed to open database")?;
    let service = NoteService::new(db);

    match command {
        Commands::Write { text } => handle_write(&service, text),
        Commands::Read { id } => handle_read(&service, *id),
        Commands::Tag { name } => handle_tag(&service, name.as_deref()),
        Commands::Delete { id } => handle_delete(&service, *id),
        Commands::Recent { count } => handle_recent(&service, *count),
    }
}

fn handle_write(service: &NoteService, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("Note content cannot be empty");
    }

    let key = cipher::key_from_env()?;
    let id = service.write_note(text, &key)?;

    println!("Note created (id: {id})");
    Ok(())
}

fn handle_read(service: &NoteService, id: Option<i64>) -> Result<()> {
    let key = cipher::key_from_env()?;

    match id {
        Some(id) => {
            if let Some(note) = service.read_note(NoteId::new(id), &key)? {
                println!("{}", note.record_line());
            }
        }
        None => {
            for note in service.read_notes(&key)? {
                println!("{}", note.record_line());
            }
        }
    }
    Ok(())
}

fn handle_tag(service: &NoteService, name: Option<&str>) -> Result<()> {
    match name {
        Some(name) => {
            let key = cipher::key_from_env()?;
            for note in service.read_tagged(name, &key)? {
                println!("{}", note.record_line());
            }
        }
        None => {
            // Listing tag names touches no note content, so no key needed.
            for tag in service.list_tags()? {
                println!("{}", tag.record_line());
            }
        }
    }
    Ok(())
}

fn handle_delete(service: &NoteService, id: i64) -> Result<()> {
    service.delete_note(NoteId::new(id))?;
    Ok(())
}

fn handle_recent(service: &NoteService, count: usize) -> Result<()> {
    let key = cipher::key_from_env()?;
    for note in service.read_recent(count, &key)? {
        println!("{}", note.record_line());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_maps_to_user_error() {
        let err = anyhow::Error::from(JotError::MissingKeyMaterial);
        assert!(is_user_error(&err));
    }

    #[test]
    fn tag_not_found_maps_to_user_error() {
        let err = anyhow::Error::from(JotError::TagNotFound {
            name: "x".to_string(),
        });
        assert!(is_user_error(&err));
    }

    #[test]
    fn storage_failure_maps_to_internal_error() {
        let err = anyhow::Error::from(JotError::Storage(rusqlite::Error::InvalidQuery));
        assert!(!is_user_error(&err));
    }

    #[test]
    fn empty_content_message_maps_to_user_error() {
        let err = anyhow::anyhow!("Note content cannot be empty");
        assert!(is_user_error(&err));
    }
}
