//! Random source abstraction for tracking-number generation.
//!
//! In production this wraps the thread-local RNG. In tests a scripted
//! implementation is injected so allocation is repeatable.

use rand::Rng;

/// Abstraction over the random source used to pick token characters.
pub trait TokenRng: Send + Sync {
    /// Returns a uniformly random index in `[0, bound)`.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// Production random source backed by [`rand`]'s thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTokenRng;

impl TokenRng for SystemTokenRng {
    fn next_index(&mut self, bound: usize) -> usize {
        rand::rng().random_range(0..bound)
    }
}
