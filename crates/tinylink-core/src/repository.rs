use crate::error::Result;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A stored mapping from a short code to the URL it stands for.
///
/// Links are created once and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortLink {
    /// The code visitors use; primary key of the store.
    pub short_code: ShortCode,
    /// The original URL that was shortened. Unique across links.
    pub original_url: String,
    /// When the store accepted the link.
    pub created_at: Timestamp,
}

impl ShortLink {
    /// Creates a link stamped with the current time.
    pub fn new(short_code: ShortCode, original_url: impl Into<String>) -> Self {
        Self {
            short_code,
            original_url: original_url.into(),
            created_at: Timestamp::now(),
        }
    }
}

/// The result of an atomic [`Repository::insert_if_absent`].
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    /// The link was created.
    Inserted(ShortLink),
    /// The short code is already held by another link. Nothing was written.
    Collision,
    /// The original URL is already mapped, to the carried link. Nothing was
    /// written.
    UrlTaken(ShortLink),
}

/// A read-only view of a repository.
///
/// This trait provides only the read operations from [`Repository`],
/// allowing services like the redirector to have read-only access.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the link for a given short code.
    /// Returns `None` if the code does not exist.
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<ShortLink>>;

    /// Retrieves the link previously created for `original_url`.
    /// The match is byte-exact; no normalization is applied.
    async fn find_by_original(&self, original_url: &str) -> Result<Option<ShortLink>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Creates a link only if neither `code` nor `original_url` is taken.
    ///
    /// Must be atomic with respect to concurrent callers, in this process or
    /// any other sharing the same storage: no two callers can both get
    /// [`InsertOutcome::Inserted`] for the same code or the same URL.
    async fn insert_if_absent(
        &self,
        code: &ShortCode,
        original_url: &str,
    ) -> Result<InsertOutcome>;
}

#[async_trait]
impl<T: ReadRepository + ?Sized> ReadRepository for Arc<T> {
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<ShortLink>> {
        (**self).find_by_code(code).await
    }

    async fn find_by_original(&self, original_url: &str) -> Result<Option<ShortLink>> {
        (**self).find_by_original(original_url).await
    }
}

#[async_trait]
impl<T: Repository + ?Sized> Repository for Arc<T> {
    async fn insert_if_absent(
        &self,
        code: &ShortCode,
        original_url: &str,
    ) -> Result<InsertOutcome> {
        (**self).insert_if_absent(code, original_url).await
    }
}
