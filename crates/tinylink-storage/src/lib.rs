//! Storage backends for the tinylink store contract.

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryRepository;
pub use sqlite::SqliteRepository;
pub use tinylink_core::{InsertOutcome, ReadRepository, Repository, ShortLink, StorageError};
