use crate::Generator;
use std::sync::atomic::{AtomicUsize, Ordering};
use tinylink_core::ShortCode;

/// A deterministic generator that replays a fixed list of codes.
///
/// Once the list is used up the last code is returned forever, which makes
/// it easy to force collisions. Every call is counted.
#[derive(Debug)]
pub struct ScriptedGenerator {
    codes: Vec<ShortCode>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    /// Creates a generator that hands out `codes` in order.
    ///
    /// # Panics
    ///
    /// Panics if `codes` is empty.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes: Vec<ShortCode> = codes.into_iter().map(ShortCode::new_unchecked).collect();
        assert!(!codes.is_empty(), "scripted generator needs at least one code");

        Self {
            codes,
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a generator that always returns `code`.
    pub fn repeating(code: impl Into<String>) -> Self {
        Self::new([code])
    }

    /// Number of codes handed out so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Generator for ScriptedGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let idx = call.min(self.codes.len() - 1);
        self.codes[idx].clone()
    }
}
