//! # SLEUTH
//!
//! The main game crate, wiring the search engine into play.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                             SLEUTH                               │
//! ├──────────────────────────────────────────────────────────────────┤
//! │                                                                  │
//! │  proximity / input / clock                                       │
//! │            │                                                     │
//! │            v                                                     │
//! │  ┌───────────────────┐   search   ┌───────────────────────────┐  │
//! │  │ InteractionRouter │──────────> │ sleuth_search             │  │
//! │  │                   │            │  • SearchService          │  │
//! │  │  • nearby area    │ <───────── │  • SearchResolver         │  │
//! │  │  • removal timers │  outcome   │  • SearchLedger           │  │
//! │  └───┬──────────┬────┘            └───────────────────────────┘  │
//! │      │          │                                                │
//! │      v          v                                                │
//! │  Inventory     Hud            PlayerStateKeeper (scene changes)  │
//! │                                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `router`: Event-driven interaction handling
//! - `hud`: Prompt and message state
//! - `player_state`: Pose save/restore across minigames
//! - `settings`: Session settings file

pub mod error;
pub mod hud;
pub mod player_state;
pub mod router;
pub mod settings;

// Re-export the engine
pub use sleuth_search as search;

pub use error::{SessionError, SessionResult};
pub use hud::{Hud, HudMessage};
pub use player_state::{PlayerPose, PlayerStateKeeper};
pub use router::{InteractionEvent, InteractionRouter, Presentation};
pub use settings::{HudSettings, RouterSettings, SessionSettings};
