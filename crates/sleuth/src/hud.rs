//! # Search HUD State
//!
//! What the presentation layer should currently draw: the interaction
//! prompt and the latest result message. Rendering lives elsewhere; this
//! only tracks text, colour and expiry against the game clock.

use sleuth_search::RarityColor;

/// A result message on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct HudMessage {
    /// Text to draw.
    pub text: String,
    /// Text colour.
    pub color: RarityColor,
    /// Clock time after which the message is hidden.
    pub expires_at: f64,
}

/// Prompt and message state.
#[derive(Clone, Debug, Default)]
pub struct Hud {
    prompt: Option<String>,
    message: Option<HudMessage>,
    display_seconds: f64,
}

impl Hud {
    /// Creates a HUD that keeps messages up for `display_seconds`.
    #[must_use]
    pub fn new(display_seconds: f64) -> Self {
        Self {
            prompt: None,
            message: None,
            display_seconds: display_seconds.max(0.0),
        }
    }

    /// Shows the interaction prompt.
    pub fn show_prompt(&mut self, text: impl Into<String>) {
        self.prompt = Some(text.into());
    }

    /// Hides the interaction prompt.
    pub fn hide_prompt(&mut self) {
        self.prompt = None;
    }

    /// Current prompt, if any.
    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// Shows a result message, replacing any previous one.
    pub fn show_message(&mut self, text: impl Into<String>, color: RarityColor, now: f64) {
        self.message = Some(HudMessage {
            text: text.into(),
            color,
            expires_at: now + self.display_seconds,
        });
    }

    /// Message visible at `now`, if any.
    #[must_use]
    pub fn message(&self, now: f64) -> Option<&HudMessage> {
        self.message.as_ref().filter(|message| now < message.expires_at)
    }

    /// Drops an expired message.
    pub fn tick(&mut self, now: f64) {
        if self.message.as_ref().is_some_and(|message| now >= message.expires_at) {
            self.message = None;
        }
    }
}
