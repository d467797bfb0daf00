use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tinylink_core::error::Result;
use tinylink_core::{InsertOutcome, ReadRepository, Repository, ShortCode, ShortLink};

/// In-memory implementation of the Repository trait using DashMap.
///
/// Links are indexed twice, by code and by original URL. An insert takes the
/// code entry lock first and the URL entry lock second, always in that order,
/// and writes both indexes while holding both, so concurrent inserts can
/// never both claim the same code or the same URL.
#[derive(Debug)]
pub struct InMemoryRepository {
    by_code: DashMap<String, ShortLink>,
    by_url: DashMap<String, ShortLink>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            by_code: DashMap::new(),
            by_url: DashMap::new(),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            by_code: DashMap::with_capacity(capacity),
            by_url: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<ShortLink>> {
        Ok(self.by_code.get(code.as_str()).map(|link| link.clone()))
    }

    async fn find_by_original(&self, original_url: &str) -> Result<Option<ShortLink>> {
        Ok(self.by_url.get(original_url).map(|link| link.clone()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert_if_absent(
        &self,
        code: &ShortCode,
        original_url: &str,
    ) -> Result<InsertOutcome> {
        let code_slot = match self.by_code.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => return Ok(InsertOutcome::Collision),
            Entry::Vacant(slot) => slot,
        };

        let url_slot = match self.by_url.entry(original_url.to_owned()) {
            Entry::Occupied(existing) => {
                return Ok(InsertOutcome::UrlTaken(existing.get().clone()));
            }
            Entry::Vacant(slot) => slot,
        };

        let link = ShortLink::new(code.clone(), original_url);
        url_slot.insert(link.clone());
        code_slot.insert(link.clone());

        Ok(InsertOutcome::Inserted(link))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    #[tokio::test]
    async fn insert_and_find_both_ways() {
        let repo = InMemoryRepository::new();

        let outcome = repo
            .insert_if_absent(&code("abc123"), "https://example.com")
            .await
            .unwrap();
        let InsertOutcome::Inserted(link) = outcome else {
            panic!("expected insert, got {outcome:?}");
        };
        assert_eq!(link.short_code.as_str(), "abc123");

        let by_code = repo.find_by_code(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(by_code, link);

        let by_url = repo
            .find_by_original("https://example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_url, link);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn find_nonexistent() {
        let repo = InMemoryRepository::new();

        assert!(repo.find_by_code(&code("nope")).await.unwrap().is_none());
        assert!(repo
            .find_by_original("https://nowhere.example")
            .await
            .unwrap()
            .is_none());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn insert_collision_leaves_store_untouched() {
        let repo = InMemoryRepository::new();

        repo.insert_if_absent(&code("abc123"), "https://example.com")
            .await
            .unwrap();

        let outcome = repo
            .insert_if_absent(&code("abc123"), "https://other.com")
            .await
            .unwrap();
        assert_eq!(outcome, InsertOutcome::Collision);

        assert_eq!(repo.len(), 1);
        assert!(repo
            .find_by_original("https://other.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn insert_same_url_reports_existing_link() {
        let repo = InMemoryRepository::new();

        repo.insert_if_absent(&code("first"), "https://example.com")
            .await
            .unwrap();

        let outcome = repo
            .insert_if_absent(&code("second"), "https://example.com")
            .await
            .unwrap();
        let InsertOutcome::UrlTaken(existing) = outcome else {
            panic!("expected url taken, got {outcome:?}");
        };
        assert_eq!(existing.short_code.as_str(), "first");

        assert!(repo.find_by_code(&code("second")).await.unwrap().is_none());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn url_match_is_byte_exact() {
        let repo = InMemoryRepository::new();

        repo.insert_if_absent(&code("lower"), "https://example.com/a")
            .await
            .unwrap();
        let outcome = repo
            .insert_if_absent(&code("upper"), "https://example.com/A")
            .await
            .unwrap();

        assert!(matches!(outcome, InsertOutcome::Inserted(_)));
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn concurrent_inserts_of_one_code_have_one_winner() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..32u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert_if_absent(&code("shared"), &format!("https://example{i}.com"))
                    .await
                    .unwrap()
            }));
        }

        let mut inserted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                InsertOutcome::Inserted(_) => inserted += 1,
                InsertOutcome::Collision => {}
                other => panic!("unexpected outcome {other:?}"),
            }
        }

        assert_eq!(inserted, 1);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_access() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let c = code(&format!("code-{:03}", i));
                repo.insert_if_absent(&c, &format!("https://example{}.com", i))
                    .await
                    .unwrap();
            }));
        }

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let c = code(&format!("code-{:03}", i));
                let _ = repo.find_by_code(&c).await;
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..10u64 {
            let c = code(&format!("code-{:03}", i));
            let link = repo.find_by_code(&c).await.unwrap().unwrap();
            assert_eq!(link.original_url, format!("https://example{}.com", i));
        }
    }
}
