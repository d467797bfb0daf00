//! Core types and traits for the tinylink URL shortener.
//!
//! This crate provides shared types and traits used by both the
//! shortener service and the redirector service, plus the store
//! contract every storage backend implements.

pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{CoreError, ShortenerError, StorageError};
pub use repository::{InsertOutcome, ReadRepository, Repository, ShortLink};
pub use shortcode::ShortCode;
pub use shortener::Shortener;
