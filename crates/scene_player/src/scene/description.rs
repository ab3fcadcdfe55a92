//! Serialized scene schema
//!
//! Every section is optional; a document of `{}` describes an empty scene
//! with no camera and no renderer, which the player completes with
//! defaults.

use serde::{Deserialize, Serialize};

/// Root of a serialized scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    /// Scene graph
    pub scene: Option<SceneSection>,
    /// Camera
    pub camera: Option<CameraSection>,
    /// Renderer / render target settings
    pub renderer: Option<RendererSection>,
    /// Keyframe animation clips
    pub animations: Vec<ClipSection>,
    /// Script bindings
    pub scripts: Vec<ScriptSection>,
}

/// Scene graph section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSection {
    /// Scene name
    pub name: Option<String>,
    /// Objects
    pub objects: Vec<ObjectSection>,
}

/// One scene object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSection {
    /// Unique name
    pub name: String,
    /// Position, defaults to the origin
    #[serde(default)]
    pub position: [f32; 3],
    /// Initial velocity
    #[serde(default)]
    pub velocity: [f32; 3],
    /// Mass; zero means static
    #[serde(default)]
    pub mass: f32,
    /// Asset URL, relative to the resource server unless absolute
    #[serde(default)]
    pub url: Option<String>,
    /// Visibility
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

/// Camera section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSection {
    /// Position
    pub position: [f32; 3],
    /// Look-at target
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near plane
    pub near: f32,
    /// Far plane
    pub far: f32,
}

impl Default for CameraSection {
    fn default() -> Self {
        Self {
            position: [0.0, 5.0, 10.0],
            target: [0.0, 0.0, 0.0],
            fov: crate::render::camera::DEFAULT_FOV_DEGREES,
            near: crate::render::camera::DEFAULT_NEAR,
            far: crate::render::camera::DEFAULT_FAR,
        }
    }
}

/// Renderer section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererSection {
    /// Drawing buffer width; container width when absent
    pub width: Option<u32>,
    /// Drawing buffer height; container height when absent
    pub height: Option<u32>,
    /// RGBA clear color
    pub clear_color: Option<[f32; 4]>,
}

/// Keyframe clip section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipSection {
    /// Clip name
    pub name: String,
    /// Animated object name
    pub target: String,
    /// Loop length; defaults to the last keyframe time
    #[serde(default)]
    pub duration: Option<f32>,
    /// Keyframes
    pub keyframes: Vec<KeyframeSection>,
}

/// One keyframe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeSection {
    /// Seconds from clip start
    pub time: f32,
    /// Position at `time`
    pub position: [f32; 3],
}

/// Script section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSection {
    /// Script name
    pub name: String,
    /// Source text
    #[serde(default)]
    pub source: String,
    /// Handled input events
    #[serde(default)]
    pub events: Vec<String>,
}
