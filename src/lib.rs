pub mod cipher;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod service;
pub mod utils;

pub use db::{Database, ListOrder, NoteRecord, TagInsert};
pub use error::JotError;
pub use models::{Note, NoteId, Tag, TagId};
pub use service::NoteService;
