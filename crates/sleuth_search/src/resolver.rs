//! # Search Resolver
//!
//! **Diminishing-returns odds with rarity-weighted picks**
//!
//! The resolver is pure policy. Guards (limit, cooldown, range) have already
//! passed by the time it runs; it only decides whether this attempt finds
//! something and, if so, what.
//!
//! ## The Roll
//!
//! ```text
//! penalty = max(minimum / 100, 1 - previous_attempts * per_attempt_penalty)
//! chance  = clamp(base * penalty, minimum, 100)
//! success = roll <= chance          roll ~ U[0, 100)
//! ```
//!
//! Every resolved attempt costs probability on the next one, win or lose.
//!
//! ## The Pick
//!
//! Each candidate contributes its rarity weight as a multiplicity
//! (Common 10, Uncommon 7, Rare 4 by default). One uniform draw over the
//! total weight picks the slot, so `[Common, Common, Rare]` yields the rare
//! item with probability exactly 4/24.

use std::sync::Arc;

use crate::area::SearchArea;
use crate::catalog::{ItemCatalogEntry, RarityColor};
use crate::config::{RarityWeights, SearchConfig, SearchMessages, SearchTuning};
use crate::draw::SearchDraw;
use crate::error::SearchFailure;
use crate::ledger::SearchLedger;

/// Result of a search attempt, always delivered as a value.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    /// The item found, if any.
    pub item: Option<Arc<ItemCatalogEntry>>,
    /// Message for the player.
    pub message: String,
    /// Why nothing was found, if nothing was.
    pub failure: Option<SearchFailure>,
    /// The chance that applied, when a roll happened.
    pub chance: Option<f64>,
}

impl SearchOutcome {
    /// A successful find.
    #[must_use]
    pub fn found(item: Arc<ItemCatalogEntry>, message: String, chance: f64) -> Self {
        Self {
            item: Some(item),
            message,
            failure: None,
            chance: Some(chance),
        }
    }

    /// A failed attempt.
    #[must_use]
    pub fn failed(failure: SearchFailure, message: String) -> Self {
        let chance = match &failure {
            SearchFailure::NothingFound { chance, .. } => Some(*chance),
            _ => None,
        };
        Self {
            item: None,
            message,
            failure: Some(failure),
            chance,
        }
    }

    /// Returns true if an item was found.
    #[inline]
    #[must_use]
    pub fn success(&self) -> bool {
        self.item.is_some()
    }

    /// Colour to render the message with.
    #[must_use]
    pub fn color(&self) -> RarityColor {
        self.item
            .as_ref()
            .map_or(RarityColor::WHITE, |item| item.rarity.color())
    }
}

/// Computes search odds and picks items.
#[derive(Clone, Debug, Default)]
pub struct SearchResolver {
    tuning: SearchTuning,
    weights: RarityWeights,
    messages: SearchMessages,
}

impl SearchResolver {
    /// Creates a resolver from explicit parts.
    #[must_use]
    pub fn new(tuning: SearchTuning, weights: RarityWeights, messages: SearchMessages) -> Self {
        Self {
            tuning,
            weights,
            messages,
        }
    }

    /// Creates a resolver from a loaded config.
    #[must_use]
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.tuning, config.weights, config.messages.clone())
    }

    /// Tuning in use.
    #[must_use]
    pub const fn tuning(&self) -> &SearchTuning {
        &self.tuning
    }

    /// Message text in use.
    #[must_use]
    pub const fn messages(&self) -> &SearchMessages {
        &self.messages
    }

    /// Multiplier applied to the base chance after `previous_attempts`.
    ///
    /// Floors at `minimum_chance / 100` instead of going negative.
    #[must_use]
    pub fn penalty_factor(&self, previous_attempts: u32) -> f64 {
        let raw = 1.0 - f64::from(previous_attempts) * self.tuning.per_attempt_penalty;
        raw.max(self.tuning.minimum_chance / 100.0)
    }

    /// Final chance in percent, within `[minimum_chance, 100]`.
    #[must_use]
    pub fn final_chance(&self, base_chance_percent: f64, previous_attempts: u32) -> f64 {
        let scaled = base_chance_percent * self.penalty_factor(previous_attempts);
        scaled.max(self.tuning.minimum_chance).min(100.0)
    }

    /// Total multiplicity of a candidate pool.
    #[must_use]
    pub fn pool_size(&self, candidates: &[Arc<ItemCatalogEntry>]) -> u32 {
        candidates
            .iter()
            .map(|item| self.weights.weight_of(item))
            .fold(0u32, u32::saturating_add)
    }

    /// Exact probability that `candidates[index]` is picked on success.
    ///
    /// Duplicated entries are counted per slot.
    #[must_use]
    pub fn pick_probability(&self, candidates: &[Arc<ItemCatalogEntry>], index: usize) -> f64 {
        let total = self.pool_size(candidates);
        match candidates.get(index) {
            Some(item) if total > 0 => f64::from(self.weights.weight_of(item)) / f64::from(total),
            _ => 0.0,
        }
    }

    /// Picks one candidate by rarity multiplicity.
    ///
    /// Returns `None` for an empty pool.
    pub fn select_item<D: SearchDraw + ?Sized>(
        &self,
        candidates: &[Arc<ItemCatalogEntry>],
        draw: &mut D,
    ) -> Option<Arc<ItemCatalogEntry>> {
        let total = self.pool_size(candidates);
        if total == 0 {
            return None;
        }

        let slot = draw.pick(total);
        let mut cumulative = 0u32;
        for item in candidates {
            cumulative = cumulative.saturating_add(self.weights.weight_of(item));
            if slot < cumulative {
                return Some(Arc::clone(item));
            }
        }

        candidates.last().cloned()
    }

    /// Resolves one search attempt.
    ///
    /// Always records the attempt in `ledger`, whatever the outcome.
    pub fn resolve<D: SearchDraw + ?Sized>(
        &self,
        area: &SearchArea,
        ledger: &mut SearchLedger,
        draw: &mut D,
    ) -> SearchOutcome {
        let previous_attempts = ledger.count(area.id());
        let chance = self.final_chance(area.base_chance_percent(), previous_attempts);
        ledger.record(area.id());

        let roll = draw.roll_percent();
        tracing::debug!(
            area = area.id(),
            name = area.name(),
            base = area.base_chance_percent(),
            previous_attempts,
            chance,
            roll,
            "search rolled"
        );

        if roll > chance {
            return SearchOutcome::failed(
                SearchFailure::NothingFound { roll, chance },
                self.messages.nothing_found.clone(),
            );
        }

        match self.select_item(area.candidates(), draw) {
            Some(item) => {
                tracing::info!(
                    area = area.id(),
                    item = item.id,
                    rarity = ?item.rarity,
                    "item found"
                );
                let message = self.messages.found(&item);
                SearchOutcome::found(item, message, chance)
            }
            None => {
                tracing::warn!(area = area.id(), name = area.name(), "roll hit but area has no candidate items");
                SearchOutcome::failed(
                    SearchFailure::EmptyCandidatePool,
                    self.messages.empty_pool.clone(),
                )
            }
        }
    }
}
