use async_trait::async_trait;
use std::sync::Arc;
use tinylink_core::{InsertOutcome, Repository, ShortCode, Shortener, ShortenerError};
use tinylink_generator::Generator;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Tunables for [`ShortenerService`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct ShortenerSettings {
    /// How many fresh codes to try before giving up. Zero is treated as one.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `Generator` to handle:
/// - Deduplication: a URL that was shortened before gets its old code back
/// - Allocation: fresh candidates are inserted until one does not collide
///
/// Uniqueness rests entirely on the repository's atomic insert; the
/// generator is never trusted to avoid repeats.
#[derive(Debug)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    settings: ShortenerSettings,
}

impl<R, G> Clone for ShortenerService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
            settings: self.settings,
        }
    }
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    /// Creates a new `ShortenerService` with default settings.
    ///
    /// Pass an `Arc<R>` to share one repository with other services.
    pub fn new(repository: R, generator: G) -> Self {
        Self::with_settings(repository, generator, ShortenerSettings::default())
    }

    pub fn with_settings(repository: R, generator: G, settings: ShortenerSettings) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            settings,
        }
    }

    /// The effective retry bound, never less than one.
    pub fn max_attempts(&self) -> u32 {
        self.settings.max_attempts.max(1)
    }

    /// Returns the short code for `original_url`, creating one if needed.
    pub async fn shorten(&self, original_url: &str) -> Result<ShortCode, ShortenerError> {
        Shortener::shorten(self, original_url).await
    }

    fn generate_code(&self) -> ShortCode {
        self.generator.generate().into()
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, original_url: &str) -> Result<ShortCode, ShortenerError> {
        trace!(url = %original_url, "shortening url");

        if let Some(existing) = self.repository.find_by_original(original_url).await? {
            debug!(code = %existing.short_code, "url already shortened, reusing code");
            return Ok(existing.short_code);
        }

        let max_attempts = self.max_attempts();
        for attempt in 1..=max_attempts {
            // A fresh candidate every round, never the one that just collided.
            let candidate = self.generate_code();

            match self
                .repository
                .insert_if_absent(&candidate, original_url)
                .await?
            {
                InsertOutcome::Inserted(link) => {
                    debug!(code = %link.short_code, attempt, "allocated short code");
                    return Ok(link.short_code);
                }
                InsertOutcome::Collision => {
                    debug!(code = %candidate, attempt, max_attempts, "short code collision");
                }
                InsertOutcome::UrlTaken(existing) => {
                    debug!(
                        code = %existing.short_code,
                        "url was shortened concurrently, reusing code"
                    );
                    return Ok(existing.short_code);
                }
            }
        }

        warn!(attempts = max_attempts, "could not allocate a unique short code");
        Err(ShortenerError::ExhaustedRetries {
            attempts: max_attempts,
        })
    }
}
