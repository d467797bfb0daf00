pub mod error;
pub mod random;
pub mod scripted;

pub use error::Error;
pub use random::{RandomGenerator, RandomGeneratorSettings};
pub use scripted::ScriptedGenerator;

use std::sync::Arc;
use tinylink_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// Uniqueness is enforced by the store's atomic insert, so a generator is
/// free to repeat itself; callers retry on collision.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;
    /// Generates a candidate short code.
    fn generate(&self) -> Self::Output;
}

impl<G: Generator> Generator for Arc<G> {
    type Output = G::Output;

    fn generate(&self) -> Self::Output {
        (**self).generate()
    }
}
