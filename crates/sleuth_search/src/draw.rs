//! # Random Draws
//!
//! Every random decision the resolver makes goes through [`SearchDraw`].
//! Production code wraps a seeded `ChaCha8Rng` in [`RngDraw`]; tests and
//! replays use [`ScriptedDraw`] to force exact rolls.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Source of the two draws a search needs.
pub trait SearchDraw {
    /// Uniform roll in `[0, 100)`.
    fn roll_percent(&mut self) -> f64;

    /// Uniform index in `[0, upper)`. `upper` is never zero.
    fn pick(&mut self, upper: u32) -> u32;
}

impl<D: SearchDraw + ?Sized> SearchDraw for &mut D {
    fn roll_percent(&mut self) -> f64 {
        (**self).roll_percent()
    }

    fn pick(&mut self, upper: u32) -> u32 {
        (**self).pick(upper)
    }
}

/// Adapts any `rand::Rng` into a [`SearchDraw`].
#[derive(Clone, Debug)]
pub struct RngDraw<R> {
    rng: R,
}

impl<R: Rng> RngDraw<R> {
    /// Wraps an RNG.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Unwraps the RNG.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngDraw<ChaCha8Rng> {
    /// Deterministic draw source from a 64-bit seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> SearchDraw for RngDraw<R> {
    #[inline]
    fn roll_percent(&mut self) -> f64 {
        self.rng.gen_range(0.0..100.0)
    }

    #[inline]
    fn pick(&mut self, upper: u32) -> u32 {
        self.rng.gen_range(0..upper.max(1))
    }
}

/// Replays fixed rolls and picks.
///
/// When a queue runs dry the draw falls back to `0.0` for rolls (always a
/// hit) and `0` for picks (first slot).
#[derive(Clone, Debug, Default)]
pub struct ScriptedDraw {
    rolls: VecDeque<f64>,
    picks: VecDeque<u32>,
}

impl ScriptedDraw {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues rolls.
    #[must_use]
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = f64>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    /// Queues picks.
    #[must_use]
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = u32>) -> Self {
        self.picks.extend(picks);
        self
    }

    /// Rolls not yet consumed.
    #[must_use]
    pub fn pending_rolls(&self) -> usize {
        self.rolls.len()
    }
}

impl SearchDraw for ScriptedDraw {
    fn roll_percent(&mut self) -> f64 {
        self.rolls.pop_front().unwrap_or(0.0)
    }

    fn pick(&mut self, upper: u32) -> u32 {
        self.picks.pop_front().unwrap_or(0) % upper.max(1)
    }
}
