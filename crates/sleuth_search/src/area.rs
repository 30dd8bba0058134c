//! # Search Areas
//!
//! A searchable location: its odds, what it can hand out, and how often it
//! may be searched.
//!
//! ## Lifecycle
//!
//! ```text
//!            resolved attempt
//! Available ─────────────────> Available   (limit not reached)
//!     │
//!     └──────────────────────> Exhausted   (search_count >= max_searches)
//! ```
//!
//! Cooldown is not a state. It is recomputed from the caller's clock on
//! every guard check.

use std::sync::Arc;

use crate::catalog::ItemCatalogEntry;
use crate::error::GuardRejection;
use crate::limit::Limit;

/// Unique identifier for a search area.
pub type AreaId = u32;

/// Default interaction prompt.
pub const DEFAULT_PROMPT: &str = "Press E to investigate";

/// Whether an area can still be searched at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AreaState {
    /// Searches are still allowed (subject to cooldown and range).
    Available,
    /// The search limit was reached. Terminal until [`SearchArea::reset`].
    Exhausted,
}

/// A searchable location with its per-instance search state.
#[derive(Clone, Debug)]
pub struct SearchArea {
    id: AreaId,
    name: String,
    base_chance_percent: f64,
    candidates: Vec<Arc<ItemCatalogEntry>>,
    cooldown_seconds: f64,
    max_searches: Limit,
    interaction_prompt: String,
    removal: Option<bool>,

    search_count: u32,
    last_search_at: Option<f64>,
    player_in_range: bool,
}

impl SearchArea {
    /// Creates an unlimited, cooldown-free area with no candidates.
    ///
    /// The base chance is clamped to `[0, 100]`.
    #[must_use]
    pub fn new(id: AreaId, name: impl Into<String>, base_chance_percent: f64) -> Self {
        Self {
            id,
            name: name.into(),
            base_chance_percent: clamp_percent(base_chance_percent),
            candidates: Vec::new(),
            cooldown_seconds: 0.0,
            max_searches: Limit::Unlimited,
            interaction_prompt: DEFAULT_PROMPT.to_owned(),
            removal: None,
            search_count: 0,
            last_search_at: None,
            player_in_range: false,
        }
    }

    /// Sets the candidate pool, in authoring order.
    #[must_use]
    pub fn with_candidates(mut self, candidates: Vec<Arc<ItemCatalogEntry>>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Sets the cooldown. Negative values are treated as zero.
    #[must_use]
    pub fn with_cooldown(mut self, seconds: f64) -> Self {
        self.cooldown_seconds = seconds.max(0.0);
        self
    }

    /// Sets the search limit.
    #[must_use]
    pub fn with_max_searches(mut self, max_searches: Limit) -> Self {
        self.max_searches = max_searches;
        self
    }

    /// Sets the interaction prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.interaction_prompt = prompt.into();
        self
    }

    /// Overrides whether the area is removed after a resolved search.
    #[must_use]
    pub fn with_removal(mut self, removes_after_search: bool) -> Self {
        self.removal = Some(removes_after_search);
        self
    }

    /// Area id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> AreaId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base chance in percent.
    #[inline]
    #[must_use]
    pub const fn base_chance_percent(&self) -> f64 {
        self.base_chance_percent
    }

    /// Candidate items in authoring order.
    #[must_use]
    pub fn candidates(&self) -> &[Arc<ItemCatalogEntry>] {
        &self.candidates
    }

    /// Cooldown between searches.
    #[inline]
    #[must_use]
    pub const fn cooldown_seconds(&self) -> f64 {
        self.cooldown_seconds
    }

    /// Search limit.
    #[inline]
    #[must_use]
    pub const fn max_searches(&self) -> Limit {
        self.max_searches
    }

    /// Prompt shown while the player is in range.
    #[must_use]
    pub fn interaction_prompt(&self) -> &str {
        &self.interaction_prompt
    }

    /// Whether the area goes away after a resolved search.
    ///
    /// Defaults to true for one-shot areas (`max_searches = 1`).
    #[must_use]
    pub fn removes_after_search(&self) -> bool {
        self.removal
            .unwrap_or(self.max_searches == Limit::AtMost(1))
    }

    /// Resolved attempts made on this instance.
    #[inline]
    #[must_use]
    pub const fn search_count(&self) -> u32 {
        self.search_count
    }

    /// Clock value of the last resolved attempt.
    #[inline]
    #[must_use]
    pub const fn last_search_at(&self) -> Option<f64> {
        self.last_search_at
    }

    /// Searches left, or `None` when unlimited.
    #[must_use]
    pub const fn remaining_searches(&self) -> Option<u32> {
        self.max_searches.remaining(self.search_count)
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> AreaState {
        if self.max_searches.is_reached(self.search_count) {
            AreaState::Exhausted
        } else {
            AreaState::Available
        }
    }

    /// Returns true once the search limit is reached.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self.state(), AreaState::Exhausted)
    }

    /// Seconds left before the next search is allowed.
    #[must_use]
    pub fn cooldown_remaining(&self, now: f64) -> f64 {
        match self.last_search_at {
            Some(last) if self.cooldown_seconds > 0.0 => {
                (self.cooldown_seconds - (now - last)).max(0.0)
            }
            _ => 0.0,
        }
    }

    /// Whether the player is currently close enough.
    #[inline]
    #[must_use]
    pub const fn is_player_in_range(&self) -> bool {
        self.player_in_range
    }

    /// Updates the proximity flag.
    pub fn set_player_in_range(&mut self, in_range: bool) {
        self.player_in_range = in_range;
    }

    /// Guard evaluated before resolving a search.
    ///
    /// Checks the limit, then the cooldown, then proximity.
    ///
    /// # Errors
    ///
    /// Returns the first [`GuardRejection`] that applies.
    pub fn can_search(&self, now: f64) -> Result<(), GuardRejection> {
        if self.is_exhausted() {
            return Err(GuardRejection::Exhausted);
        }

        let remaining_seconds = self.cooldown_remaining(now);
        if remaining_seconds > 0.0 {
            return Err(GuardRejection::CoolingDown { remaining_seconds });
        }

        if !self.player_in_range {
            return Err(GuardRejection::OutOfRange);
        }

        Ok(())
    }

    /// Records a resolved attempt at `now` and returns the new state.
    pub fn record_attempt(&mut self, now: f64) -> AreaState {
        self.search_count = self.search_count.saturating_add(1);
        self.last_search_at = Some(now);
        let state = self.state();
        tracing::debug!(
            area = self.id,
            count = self.search_count,
            ?state,
            "search attempt recorded"
        );
        state
    }

    /// Clears the search count and timestamp.
    pub fn reset(&mut self) {
        self.search_count = 0;
        self.last_search_at = None;
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
