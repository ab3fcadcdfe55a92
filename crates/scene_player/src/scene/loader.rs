//! Scene loading contract

use async_trait::async_trait;
use thiserror::Error;

use super::{AnimationClip, Scene, ScriptBinding};
use crate::render::Camera;

/// Render target settings requested by the scene; the player binds them to a surface
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTargetSettings {
    /// Width; container width when `None`
    pub width: Option<u32>,
    /// Height; container height when `None`
    pub height: Option<u32>,
    /// RGBA clear color
    pub clear_color: [f32; 4],
}

/// Everything the loader extracts from a scene document
///
/// Missing pieces are synthesized by the player during bootstrap.
#[derive(Debug, Clone, Default)]
pub struct LoadedScene {
    /// Scene graph
    pub scene: Option<Scene>,
    /// Camera
    pub camera: Option<Camera>,
    /// Render target settings
    pub render_target: Option<RenderTargetSettings>,
    /// Animation clips (handed to the animation subsystem)
    pub clips: Vec<AnimationClip>,
    /// Script bindings (handed to the event-handling subsystem)
    pub scripts: Vec<ScriptBinding>,
}

/// Loader errors
#[derive(Error, Debug)]
pub enum LoadError {
    /// Document does not match the scene schema
    #[error("Scene schema error: {0}")]
    Schema(#[from] serde_json::Error),

    /// Document is well-formed but semantically invalid
    #[error("Invalid scene: {0}")]
    Invalid(String),

    /// Asset could not be fetched
    #[error("Asset error: {0}")]
    Asset(String),
}

/// Turns a parsed scene document into a [`LoadedScene`]
///
/// Constructed once and reused across sessions; `dispose` must reset any
/// per-session state.
#[async_trait(?Send)]
pub trait SceneLoader {
    /// Build the scene; relative resources resolve against `server`
    async fn load(&mut self, document: serde_json::Value, server: &str) -> Result<LoadedScene, LoadError>;

    /// Release per-session state
    fn dispose(&mut self);
}
