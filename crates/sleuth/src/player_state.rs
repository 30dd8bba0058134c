//! # Player State Keeper
//!
//! Remembers where the player stood before a minigame so the level can put
//! them back on return. Lives for the whole process, like the inventory.
//!
//! ```text
//! save(pose) ──> [minigame] ──> restore() ──> should_restore() == false
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};

/// Player position and orientation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerPose {
    /// World position.
    pub position: [f32; 3],
    /// Orientation quaternion `(x, y, z, w)`.
    pub rotation: [f32; 4],
}

impl PlayerPose {
    /// Identity rotation.
    pub const IDENTITY_ROTATION: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    /// Creates a pose.
    #[must_use]
    pub const fn new(position: [f32; 3], rotation: [f32; 4]) -> Self {
        Self { position, rotation }
    }
}

/// Saved pose plus scene-transition flags.
#[derive(Clone, Debug)]
pub struct PlayerStateKeeper {
    saved: Option<PlayerPose>,
    return_scene: String,
    returned_from_minigame: bool,
}

impl PlayerStateKeeper {
    /// Creates an empty keeper that returns to `return_scene`.
    #[must_use]
    pub fn new(return_scene: impl Into<String>) -> Self {
        Self {
            saved: None,
            return_scene: return_scene.into(),
            returned_from_minigame: false,
        }
    }

    /// Scene to load when leaving a minigame.
    #[must_use]
    pub fn return_scene(&self) -> &str {
        &self.return_scene
    }

    /// Records the pose before leaving the level.
    pub fn save(&mut self, pose: PlayerPose) {
        self.saved = Some(pose);
        self.returned_from_minigame = false;
        tracing::debug!(position = ?pose.position, "player state saved");
    }

    /// Hands back the saved pose and marks the return as handled.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSavedState` if nothing was saved.
    pub fn restore(&mut self) -> SessionResult<PlayerPose> {
        let pose = self.saved.ok_or(SessionError::NoSavedState)?;
        self.returned_from_minigame = true;
        tracing::debug!(position = ?pose.position, "player state restored");
        Ok(pose)
    }

    /// Forgets the saved pose and flags.
    pub fn reset(&mut self) {
        self.saved = None;
        self.returned_from_minigame = false;
        tracing::debug!("player state reset");
    }

    /// Checks if a pose is saved.
    #[must_use]
    pub const fn has_saved_state(&self) -> bool {
        self.saved.is_some()
    }

    /// Checks if the last saved pose was already restored.
    #[must_use]
    pub const fn has_returned_from_minigame(&self) -> bool {
        self.returned_from_minigame
    }

    /// True when the level should move the player to the saved pose.
    #[must_use]
    pub const fn should_restore(&self) -> bool {
        !self.returned_from_minigame && self.has_saved_state()
    }
}

impl Default for PlayerStateKeeper {
    fn default() -> Self {
        Self::new("Tutorial Level")
    }
}
