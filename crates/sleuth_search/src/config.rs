//! # Search Configuration
//!
//! Balance data for the search engine, loaded once at startup from TOML.
//! Every section has defaults matching the shipped tuning, so a config file
//! only needs to mention what it changes.
//!
//! ```toml
//! [tuning]
//! minimum_chance = 20.0
//! per_attempt_penalty = 0.15
//!
//! [weights]
//! common = 10
//! uncommon = 7
//! rare = 4
//!
//! [inventory]
//! capacity = 50        # -1 = unlimited
//! allow_duplicates = true
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::catalog::{ItemCatalogEntry, Rarity};
use crate::error::{SearchError, SearchResult};
use crate::limit::Limit;

/// Upper bound accepted for the per-attempt penalty.
pub const MAX_PER_ATTEMPT_PENALTY: f64 = 0.3;

/// Upper bound accepted for a single rarity weight. Keeps the summed pool
/// of any candidate list far below `u32::MAX`.
pub const MAX_RARITY_WEIGHT: u32 = 1_000;

/// Diminishing-returns tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchTuning {
    /// Floor for the final chance, in percent.
    pub minimum_chance: f64,
    /// Fraction of the base chance lost per previous attempt.
    pub per_attempt_penalty: f64,
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            minimum_chance: 20.0,
            per_attempt_penalty: 0.15,
        }
    }
}

impl SearchTuning {
    /// Checks the tuning ranges.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidConfig` when a value is out of range.
    pub fn validate(&self) -> SearchResult<()> {
        if !(0.0..=100.0).contains(&self.minimum_chance) {
            return Err(SearchError::InvalidConfig(format!(
                "minimum_chance must be within [0, 100], got {}",
                self.minimum_chance
            )));
        }
        if !(0.0..=MAX_PER_ATTEMPT_PENALTY).contains(&self.per_attempt_penalty) {
            return Err(SearchError::InvalidConfig(format!(
                "per_attempt_penalty must be within [0, {MAX_PER_ATTEMPT_PENALTY}], got {}",
                self.per_attempt_penalty
            )));
        }
        Ok(())
    }
}

/// Selection multiplicity per rarity tier.
///
/// Built only through validation, so every tier always has a positive
/// weight. A tier missing from a config file is an authoring error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Rarity, u32>", into = "BTreeMap<Rarity, u32>")]
pub struct RarityWeights {
    by_tier: [u32; Rarity::ALL.len()],
}

impl RarityWeights {
    /// Builds weights from a tier map.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::MissingRarityWeight` if a tier is absent and
    /// `SearchError::InvalidConfig` if a weight is zero or above
    /// [`MAX_RARITY_WEIGHT`].
    pub fn from_map(map: &BTreeMap<Rarity, u32>) -> SearchResult<Self> {
        let mut by_tier = [0u32; Rarity::ALL.len()];
        for rarity in Rarity::ALL {
            let weight = *map
                .get(&rarity)
                .ok_or(SearchError::MissingRarityWeight(rarity))?;
            if weight == 0 {
                return Err(SearchError::InvalidConfig(format!(
                    "weight for {rarity:?} must be positive"
                )));
            }
            if weight > MAX_RARITY_WEIGHT {
                return Err(SearchError::InvalidConfig(format!(
                    "weight for {rarity:?} must be <= {MAX_RARITY_WEIGHT}, got {weight}"
                )));
            }
            by_tier[rarity as usize] = weight;
        }
        Ok(Self { by_tier })
    }

    /// Weight for a tier.
    #[inline]
    #[must_use]
    pub const fn weight(&self, rarity: Rarity) -> u32 {
        self.by_tier[rarity as usize]
    }

    /// Weight of a specific item.
    #[inline]
    #[must_use]
    pub const fn weight_of(&self, item: &ItemCatalogEntry) -> u32 {
        self.weight(item.rarity)
    }
}

impl Default for RarityWeights {
    fn default() -> Self {
        Self {
            by_tier: [10, 7, 4],
        }
    }
}

impl TryFrom<BTreeMap<Rarity, u32>> for RarityWeights {
    type Error = SearchError;

    fn try_from(map: BTreeMap<Rarity, u32>) -> SearchResult<Self> {
        Self::from_map(&map)
    }
}

impl From<RarityWeights> for BTreeMap<Rarity, u32> {
    fn from(weights: RarityWeights) -> Self {
        Rarity::ALL
            .iter()
            .map(|&rarity| (rarity, weights.weight(rarity)))
            .collect()
    }
}

/// Player-facing message text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchMessages {
    /// Shown when the roll misses.
    pub nothing_found: String,
    /// Prefix before the item name on success.
    pub found_prefix: String,
    /// Suffix after the item name on success.
    pub found_suffix: String,
    /// Shown when the roll hits but the area has no items.
    pub empty_pool: String,
    /// Shown when no search service is available.
    pub configuration_missing: String,
    /// Shown when a found item does not fit in the inventory.
    pub inventory_full: String,
}

impl Default for SearchMessages {
    fn default() -> Self {
        Self {
            nothing_found: "You found nothing".to_owned(),
            found_prefix: "You found: ".to_owned(),
            found_suffix: "!".to_owned(),
            empty_pool: "There is nothing to find here".to_owned(),
            configuration_missing: "Search error".to_owned(),
            inventory_full: "Inventory full".to_owned(),
        }
    }
}

impl SearchMessages {
    /// Formats the success message for an item.
    #[must_use]
    pub fn found(&self, item: &ItemCatalogEntry) -> String {
        format!("{}{}{}", self.found_prefix, item.display_name, self.found_suffix)
    }
}

/// Inventory policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Maximum number of held items (`-1` = unlimited).
    pub capacity: Limit,
    /// Whether the same item may be held more than once.
    pub allow_duplicates: bool,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            capacity: Limit::AtMost(50),
            allow_duplicates: true,
        }
    }
}

/// Complete search configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Diminishing-returns tuning.
    pub tuning: SearchTuning,
    /// Rarity selection weights.
    pub weights: RarityWeights,
    /// Message text.
    pub messages: SearchMessages,
    /// Inventory policy.
    pub inventory: InventoryConfig,
    /// Delay before a one-shot area is removed after its last search.
    pub removal_delay_seconds: f64,
    /// Seed for the default random source.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tuning: SearchTuning::default(),
            weights: RarityWeights::default(),
            messages: SearchMessages::default(),
            inventory: InventoryConfig::default(),
            removal_delay_seconds: 1.5,
            seed: 0x5EA2_C4ED,
        }
    }
}

impl SearchConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Parse` for malformed TOML and
    /// `SearchError::InvalidConfig` for out-of-range values.
    pub fn from_toml_str(text: &str) -> SearchResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Io` if the file cannot be read, otherwise see
    /// [`SearchConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> SearchResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SearchError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidConfig` when a value is out of range.
    pub fn validate(&self) -> SearchResult<()> {
        self.tuning.validate()?;
        if !self.removal_delay_seconds.is_finite() || self.removal_delay_seconds < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "removal_delay_seconds must be >= 0, got {}",
                self.removal_delay_seconds
            )));
        }
        Ok(())
    }
}
