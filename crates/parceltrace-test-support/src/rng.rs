//! Test RNGs — deterministic `TokenRng` implementations.

use parceltrace_core::rng::TokenRng;

/// A random source that always yields the same index (modulo the bound).
/// With `ConstantTokenRng(0)` the allocator produces `CTR-AAAAAA` forever,
/// which makes collision and exhaustion scenarios trivial to stage.
#[derive(Debug, Clone, Copy)]
pub struct ConstantTokenRng(pub usize);

impl TokenRng for ConstantTokenRng {
    fn next_index(&mut self, bound: usize) -> usize {
        self.0 % bound
    }
}

/// A random source that yields indices from a predetermined sequence.
/// Panics if the sequence is exhausted. Used in tests that need specific,
/// repeatable tokens.
#[derive(Debug)]
pub struct SequenceTokenRng {
    values: Vec<usize>,
    index: usize,
}

impl SequenceTokenRng {
    /// Creates a new `SequenceTokenRng` with the given index values.
    #[must_use]
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, index: 0 }
    }
}

impl TokenRng for SequenceTokenRng {
    fn next_index(&mut self, bound: usize) -> usize {
        let value = self.values[self.index];
        self.index += 1;
        value % bound
    }
}
