use crate::traits::BackoffSource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Window for retry `attempt`, saturating at the last configured entry.
///
/// `ranges` must be non-empty; `SimConfig::validate` guarantees it for
/// every table that reaches a `Network`.
pub fn window_for(ranges: &[u32], attempt: usize) -> u32 {
    ranges[attempt.min(ranges.len() - 1)]
}

/// Binary exponential window table: `base * 2^i` for `i in 0..levels`,
/// saturating at `u32::MAX`.
pub fn doubling_windows(base: u32, levels: u32) -> Vec<u32> {
    (0..levels)
        .map(|i| base.saturating_mul(1u32.checked_shl(i).unwrap_or(u32::MAX)))
        .collect()
}

/// Uniform draws over the inclusive window, backed by any `Rng`.
#[derive(Debug, Clone)]
pub struct UniformBackoff<R> {
    rng: R,
}

impl<R: Rng> UniformBackoff<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

/// The reproducible stream used for seeded runs and sweep series.
pub type SeededBackoff = UniformBackoff<ChaCha8Rng>;

impl SeededBackoff {
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> BackoffSource for UniformBackoff<R> {
    fn draw(&mut self, window: u32) -> u32 {
        self.rng.gen_range(0..=window)
    }
}

/// Replays a fixed sequence of draws, each clamped to the requested window.
/// Once the script runs out every draw returns the full window.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackoff {
    script: VecDeque<u32>,
    requested: Vec<u32>,
}

impl ScriptedBackoff {
    pub fn new(script: impl IntoIterator<Item = u32>) -> Self {
        Self {
            script: script.into_iter().collect(),
            requested: Vec::new(),
        }
    }

    /// Windows asked for so far, in call order.
    pub fn requested(&self) -> &[u32] {
        &self.requested
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl BackoffSource for ScriptedBackoff {
    fn draw(&mut self, window: u32) -> u32 {
        self.requested.push(window);
        self.script.pop_front().map_or(window, |v| v.min(window))
    }
}
