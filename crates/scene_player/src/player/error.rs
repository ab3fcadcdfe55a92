//! Player-level errors

use thiserror::Error;

use crate::scene::LoadError;
use crate::subsystem::{SubsystemError, SubsystemKind};

/// Errors surfaced by [`crate::Player::start`]
#[derive(Error, Debug)]
pub enum PlayerError {
    /// Scene data was not serialized text
    #[error("Invalid scene input: expected serialized scene text, got {0}")]
    InvalidInput(String),

    /// Scene text is not valid JSON
    #[error("Scene data could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    /// The loader rejected the scene document
    #[error("Scene could not be loaded: {0}")]
    SceneLoad(#[from] LoadError),

    /// A subsystem's asynchronous setup failed
    #[error("The {kind} subsystem failed to initialize: {source}")]
    SubsystemInit {
        /// Failing subsystem
        kind: SubsystemKind,
        /// Underlying failure
        #[source]
        source: SubsystemError,
    },
}
