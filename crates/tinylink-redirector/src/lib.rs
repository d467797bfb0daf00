//! Redirector service library.
//!
//! This crate provides a [`RedirectorService`] that resolves short codes to
//! their original URLs through a read-only view of the store.
//!
//! # Example
//!
//! ```rust,no_run
//! use tinylink_redirector::{RedirectorError, RedirectorService};
//! use tinylink_storage::InMemoryRepository;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = RedirectorService::new(InMemoryRepository::new());
//!
//! // Resolve a short code taken from a request path
//! match service.resolve_str("abc123").await {
//!     Ok(url) => println!("Redirect to: {}", url),
//!     Err(RedirectorError::NotFound(code)) => println!("No link for {}", code),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod redirector;
pub mod service;

pub use error::{RedirectorError, Result};
pub use redirector::Redirector;
pub use service::RedirectorService;
