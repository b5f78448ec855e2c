pub mod conversations;
pub mod db;
pub mod dedupe;
pub mod diagnostics;
pub mod error;
pub mod importer;
pub mod models;
pub mod parser;
pub mod phone;
pub mod query;
pub mod search;
pub mod store;
mod migrations;

pub use db::{open_archive, ArchiveDb};
pub use error::{CoreError, ParseError, StorageError};
pub use store::{MemoryStore, MessageStore};
