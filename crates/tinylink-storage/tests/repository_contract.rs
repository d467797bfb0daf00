//! Behaviour every storage backend must share.

use std::sync::Arc;

use tinylink_core::ShortCode;
use tinylink_storage::{InMemoryRepository, InsertOutcome, Repository, SqliteRepository};

fn code(value: &str) -> ShortCode {
    ShortCode::new_unchecked(value)
}

async fn insert_then_find<R: Repository>(repo: R) {
    let outcome = repo
        .insert_if_absent(&code("abc123"), "https://example.com/a")
        .await
        .unwrap();
    let InsertOutcome::Inserted(link) = outcome else {
        panic!("expected insert, got {outcome:?}");
    };
    assert_eq!(link.short_code.as_str(), "abc123");
    assert_eq!(link.original_url, "https://example.com/a");

    let by_code = repo.find_by_code(&code("abc123")).await.unwrap();
    assert_eq!(by_code.as_ref(), Some(&link));

    let by_url = repo
        .find_by_original("https://example.com/a")
        .await
        .unwrap();
    assert_eq!(by_url.as_ref(), Some(&link));
}

async fn missing_entries<R: Repository>(repo: R) {
    assert!(repo
        .find_by_code(&code("doesnotexist"))
        .await
        .unwrap()
        .is_none());
    assert!(repo
        .find_by_original("https://example.com/missing")
        .await
        .unwrap()
        .is_none());
}

async fn code_collision<R: Repository>(repo: R) {
    repo.insert_if_absent(&code("AAAA"), "https://one.example")
        .await
        .unwrap();

    let outcome = repo
        .insert_if_absent(&code("AAAA"), "https://two.example")
        .await
        .unwrap();
    assert_eq!(outcome, InsertOutcome::Collision);

    let kept = repo.find_by_code(&code("AAAA")).await.unwrap().unwrap();
    assert_eq!(kept.original_url, "https://one.example");
    assert!(repo
        .find_by_original("https://two.example")
        .await
        .unwrap()
        .is_none());
}

async fn url_taken<R: Repository>(repo: R) {
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
}

async fn racing_inserts_for_one_url<R: Repository>(repo: R) {
    let repo = Arc::new(repo);
    let mut handles = vec![];

    for i in 0..16 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo.insert_if_absent(&code(&format!("code-{i:02}")), "https://race.example")
                .await
                .unwrap()
        }));
    }

    let mut winners = vec![];
    let mut reported = vec![];
    for handle in handles {
        match handle.await.unwrap() {
            InsertOutcome::Inserted(link) => winners.push(link.short_code),
            InsertOutcome::UrlTaken(link) => reported.push(link.short_code),
            InsertOutcome::Collision => panic!("codes are distinct, no collision expected"),
        }
    }

    assert_eq!(winners.len(), 1);
    assert!(reported.iter().all(|code| code == &winners[0]));

    let stored = repo
        .find_by_original("https://race.example")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.short_code, winners[0]);
}

macro_rules! contract_tests {
    ($backend:ident, $make:expr) => {
        mod $backend {
            use super::*;

            #[tokio::test]
            async fn insert_then_find() {
                super::insert_then_find($make).await;
            }

            #[tokio::test]
            async fn missing_entries() {
                super::missing_entries($make).await;
            }

            #[tokio::test]
            async fn code_collision() {
                super::code_collision($make).await;
            }

            #[tokio::test]
            async fn url_taken() {
                super::url_taken($make).await;
            }

            #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
            async fn racing_inserts_for_one_url() {
                super::racing_inserts_for_one_url($make).await;
            }
        }
    };
}

contract_tests!(in_memory, InMemoryRepository::new());
contract_tests!(sqlite, SqliteRepository::in_memory().await.unwrap());
