//! # SLEUTH Search Engine
//!
//! Pure Rust search-and-discovery logic for SLEUTH.
//!
//! ## Design Principles
//!
//! 1. **Diminishing returns** - Every resolved attempt on an area lowers the
//!    odds of the next one, down to a configurable floor
//! 2. **Rarity by multiplicity** - Common, uncommon and rare items are picked
//!    in proportion to their weight, never by a second roll
//! 3. **Failures are values** - A search never panics and never returns
//!    `Err`; the player always gets a message
//! 4. **External configuration** - Tuning, weights and content live in TOML
//!
//! ## Example
//!
//! ```rust,ignore
//! use sleuth_search::{ContentPack, Inventory, SearchConfig, SearchService};
//!
//! let config = SearchConfig::load("data/config/search.toml")?;
//! let mut content = ContentPack::load("data/content/police_office.toml")?;
//! let mut service = SearchService::from_config(&config);
//! let mut inventory = Inventory::from_config(&config.inventory);
//!
//! let desk = &mut content.areas[0];
//! desk.set_player_in_range(true);
//! let outcome = service.search(desk, now);
//! if let Some(item) = &outcome.item {
//!     inventory.add(item.clone());
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod area;
pub mod catalog;
pub mod config;
pub mod content;
pub mod draw;
pub mod error;
pub mod events;
pub mod inventory;
pub mod ledger;
pub mod limit;
pub mod resolver;
pub mod service;

pub use area::{AreaId, AreaState, SearchArea, DEFAULT_PROMPT};
pub use catalog::{Catalog, ItemCatalogEntry, ItemId, ItemType, Rarity, RarityColor};
pub use config::{
    InventoryConfig, RarityWeights, SearchConfig, SearchMessages, SearchTuning, MAX_RARITY_WEIGHT,
};
pub use content::{AreaSpec, ContentFile, ContentPack};
pub use draw::{RngDraw, ScriptedDraw, SearchDraw};
pub use error::{GuardRejection, SearchError, SearchFailure, SearchResult};
pub use events::{EventBus, EventReceiver, InventoryEvent, SearchEvent};
pub use inventory::{Inventory, InventoryStats};
pub use ledger::SearchLedger;
pub use limit::Limit;
pub use resolver::{SearchOutcome, SearchResolver};
pub use service::{DefaultDraw, SearchService};
