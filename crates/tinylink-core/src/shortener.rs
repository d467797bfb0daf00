use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Returns the short code for `original_url`, creating one if the URL has
    /// not been shortened before.
    ///
    /// The URL is expected to be validated by the caller. Shortening the same
    /// URL again returns the same code.
    async fn shorten(&self, original_url: &str) -> Result<ShortCode>;
}
