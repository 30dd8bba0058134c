//! # Session Settings
//!
//! Per-game knobs that sit outside the search engine's balance data.
//!
//! ```toml
//! return_scene_name = "Tutorial Level"
//!
//! [router]
//! prevent_search_while_moving = true
//! movement_threshold = 0.1
//!
//! [hud]
//! message_display_seconds = 2.5
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SessionError, SessionResult};

/// Interaction router behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
    /// Refuse searches while the player moves faster than the threshold.
    pub prevent_search_while_moving: bool,
    /// Horizontal speed above which the player counts as moving.
    pub movement_threshold: f32,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            prevent_search_while_moving: false,
            movement_threshold: 0.1,
        }
    }
}

/// Message display timing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudSettings {
    /// How long a result message stays on screen.
    pub message_display_seconds: f64,
}

impl Default for HudSettings {
    fn default() -> Self {
        Self {
            message_display_seconds: 2.5,
        }
    }
}

/// All session settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Scene to return to after a minigame.
    pub return_scene_name: String,
    /// Router behaviour.
    pub router: RouterSettings,
    /// HUD timing.
    pub hud: HudSettings,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            return_scene_name: "Tutorial Level".to_owned(),
            router: RouterSettings::default(),
            hud: HudSettings::default(),
        }
    }
}

impl SessionSettings {
    /// Parses and validates settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Parse` for malformed TOML and
    /// `SessionError::InvalidSettings` for out-of-range values.
    pub fn from_toml_str(text: &str) -> SessionResult<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from disk.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the file cannot be read, otherwise see
    /// [`SessionSettings::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> SessionResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidSettings` for a negative threshold or
    /// display time.
    pub fn validate(&self) -> SessionResult<()> {
        let threshold = self.router.movement_threshold;
        if threshold.is_nan() || threshold < 0.0 {
            return Err(SessionError::InvalidSettings(format!(
                "movement_threshold must be >= 0, got {threshold}"
            )));
        }
        let display = self.hud.message_display_seconds;
        if display.is_nan() || display < 0.0 {
            return Err(SessionError::InvalidSettings(format!(
                "message_display_seconds must be >= 0, got {display}"
            )));
        }
        Ok(())
    }
}
