use std::sync::Arc;

use crate::error::RedirectorError;
use crate::redirector::Redirector;
use async_trait::async_trait;
use tinylink_core::{ReadRepository, ShortCode};
use tracing::{debug, trace};

/// Service for handling URL redirects.
///
/// Uses a read-only repository to look links up by code. It never writes.
#[derive(Debug)]
pub struct RedirectorService<R> {
    repository: Arc<R>,
}

impl<R> Clone for RedirectorService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ReadRepository> RedirectorService<R> {
    /// Creates a new RedirectorService with the given repository.
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Resolves a short code to its original URL.
    ///
    /// # Arguments
    ///
    /// * `code` - The short code to resolve
    ///
    /// # Returns
    ///
    /// * `Ok(url)` - The original URL if the code exists
    /// * `Err(RedirectorError::NotFound)` - If the code doesn't exist
    /// * `Err(RedirectorError::Storage)` - If there was an error accessing the repository
    pub async fn resolve(&self, code: &ShortCode) -> crate::Result<String> {
        Redirector::resolve(self, code).await
    }

    /// Resolves raw text, such as a request path segment.
    ///
    /// Text that is not a well-formed short code cannot be in the store, so it
    /// is reported as `NotFound` without a lookup.
    pub async fn resolve_str(&self, code: &str) -> crate::Result<String> {
        match ShortCode::new(code) {
            Ok(code) => self.resolve(&code).await,
            Err(e) => {
                trace!(code = %code, error = %e, "Malformed short code");
                Err(RedirectorError::NotFound(code.to_owned()))
            }
        }
    }
}

#[async_trait]
impl<R: ReadRepository> Redirector for RedirectorService<R> {
    async fn resolve(&self, code: &ShortCode) -> crate::Result<String> {
        trace!(code = %code, "resolving short code");

        match self.repository.find_by_code(code).await? {
            Some(link) => {
                debug!(code = %code, url = %link.original_url, "Resolved short code");
                Ok(link.original_url)
            }
            None => {
                trace!(code = %code, "Short code not found");
                Err(RedirectorError::NotFound(code.to_string()))
            }
        }
    }
}
