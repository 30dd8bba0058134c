//! # Search Error Types
//!
//! Two families live here:
//!
//! - [`SearchError`]: startup failures (bad config, broken content files).
//!   These are returned through `Result` and propagated with `?`.
//! - [`SearchFailure`] / [`GuardRejection`]: per-interaction failures. These
//!   are never errors in the `Result` sense; they ride inside a
//!   [`SearchOutcome`](crate::resolver::SearchOutcome) so the player always
//!   gets a message and the game keeps running.

use thiserror::Error;

use crate::area::AreaId;
use crate::catalog::{ItemId, Rarity};

/// Errors that can occur while loading or validating search data.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A rarity tier has no weight entry.
    #[error("rarity {0:?} has no selection weight")]
    MissingRarityWeight(Rarity),

    /// Two catalog entries share an id.
    #[error("duplicate item id {0} in catalog")]
    DuplicateItem(ItemId),

    /// Two search areas share an id.
    #[error("duplicate area id {0} in content")]
    DuplicateArea(AreaId),

    /// A TOML document could not be parsed.
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type for search data operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Why an area refused to be searched right now.
///
/// The `Display` text is shown to the player verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuardRejection {
    /// The area hit its search limit.
    #[error("This area has already been investigated")]
    Exhausted,

    /// The cooldown since the last search has not elapsed.
    #[error("Wait {remaining_seconds:.1} seconds before investigating again")]
    CoolingDown {
        /// Seconds left on the cooldown.
        remaining_seconds: f64,
    },

    /// The player is not close enough.
    #[error("You need to get closer")]
    OutOfRange,

    /// The player is moving and the router forbids searching on the move.
    ///
    /// Raised by the interaction router, never by `SearchArea::can_search`.
    #[error("You can't investigate while moving")]
    Moving,
}

/// Why a search did not produce an item.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchFailure {
    /// A guard rejected the attempt before any roll happened.
    #[error(transparent)]
    GuardRejected(#[from] GuardRejection),

    /// No resolver or ledger was available to run the search.
    #[error("search service is not configured")]
    ConfigurationMissing,

    /// The roll succeeded but the area has nothing to hand out.
    #[error("area has no candidate items")]
    EmptyCandidatePool,

    /// The roll missed.
    #[error("roll {roll:.1} missed chance {chance:.1}%")]
    NothingFound {
        /// The drawn roll in `[0, 100)`.
        roll: f64,
        /// The chance that had to be met.
        chance: f64,
    },
}

impl SearchFailure {
    /// Returns true if the attempt was resolved (a roll happened).
    #[must_use]
    pub const fn was_resolved(&self) -> bool {
        matches!(self, Self::EmptyCandidatePool | Self::NothingFound { .. })
    }
}
