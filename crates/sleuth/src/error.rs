//! Error types for session wiring.

use sleuth_search::{AreaId, SearchError};
use thiserror::Error;

/// Errors raised while setting up or driving a play session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Search data failed to load or validate.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Session settings could not be parsed.
    #[error("failed to parse session settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// A settings file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Invalid settings value.
    #[error("invalid session settings: {0}")]
    InvalidSettings(String),

    /// No area with this id is in the scene.
    #[error("no search area {0} in the scene")]
    UnknownArea(AreaId),

    /// Restore was requested before any pose was saved.
    #[error("no saved player state to restore")]
    NoSavedState,
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
