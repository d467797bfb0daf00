//! URL shortener service implementation.
//!
//! This crate provides the submission side of tinylink: deduplicating
//! submissions and allocating fresh short codes with bounded collision
//! retry. Core types are re-exported from `tinylink_core`.

pub mod service;

pub use service::{ShortenerService, ShortenerSettings, DEFAULT_MAX_ATTEMPTS};
pub use tinylink_core::{Shortener, ShortenerError};
