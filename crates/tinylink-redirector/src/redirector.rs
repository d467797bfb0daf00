use crate::Result;
use async_trait::async_trait;
use tinylink_core::ShortCode;

#[async_trait]
pub trait Redirector: Send + Sync + 'static {
    /// Resolves a short code to the original URL it was created for.
    /// Fails with `NotFound` if the code does not exist.
    async fn resolve(&self, code: &ShortCode) -> Result<String>;
}
