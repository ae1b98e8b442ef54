mod ids;
mod note;
mod tag;

pub use ids::{NoteId, TagId};
pub use note::Note;
pub use tag::Tag;
