//! Scene data handed from the loader to the player
//!
//! ## Organization
//!
//! - **Scene**: flat list of named objects (the scene graph stand-in)
//! - **Description**: serde schema of the serialized scene document
//! - **Loader**: the async contract that turns a document into a [`LoadedScene`]

pub mod description;
pub mod loader;

pub use loader::{LoadError, LoadedScene, SceneLoader, RenderTargetSettings};

use crate::foundation::math::Vec3;

/// Object placed in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Unique name, used by animation clips to address the object
    pub name: String,
    /// World position
    pub position: Vec3,
    /// Linear velocity (units / second)
    pub velocity: Vec3,
    /// Mass; objects with zero mass are static for physics
    pub mass: f32,
    /// Resolved asset URL, if the object references one
    pub url: Option<String>,
    /// Whether the renderer should draw this object
    pub visible: bool,
}

impl SceneObject {
    /// Static, visible object at `position`
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            velocity: Vec3::zeros(),
            mass: 0.0,
            url: None,
            visible: true,
        }
    }

    /// Whether physics integrates this object
    pub fn is_dynamic(&self) -> bool {
        self.mass > 0.0
    }
}

/// Scene graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Scene name
    pub name: String,
    /// Objects in insertion order
    pub objects: Vec<SceneObject>,
}

impl Scene {
    /// Empty scene
    pub fn empty() -> Self {
        Self {
            name: "Scene".to_string(),
            objects: Vec::new(),
        }
    }

    /// Add an object
    pub fn add(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Find an object by name
    pub fn find(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Find an object by name, mutably
    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    /// Remove every object whose name starts with `prefix`; returns how many
    pub fn remove_prefixed(&mut self, prefix: &str) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| !o.name.starts_with(prefix));
        before - self.objects.len()
    }
}

/// Position keyframe
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    /// Time in seconds from clip start
    pub time: f32,
    /// Object position at `time`
    pub position: Vec3,
}

/// Keyframe clip animating one object's position
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// Clip name
    pub name: String,
    /// Name of the animated [`SceneObject`]
    pub target: String,
    /// Loop length in seconds
    pub duration: f32,
    /// Keyframes sorted by time
    pub keyframes: Vec<Keyframe>,
}

/// Script attached to the scene, invoked for the input events it names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBinding {
    /// Script name
    pub name: String,
    /// Opaque source text
    pub source: String,
    /// Input event names the script handles (e.g. `"click"`)
    pub events: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_and_remove_prefixed() {
        let mut scene = Scene::empty();
        scene.add(SceneObject::new("box", Vec3::zeros()));
        scene.add(SceneObject::new("ball_0", Vec3::zeros()));
        scene.add(SceneObject::new("ball_1", Vec3::zeros()));

        assert!(scene.find("box").is_some());
        assert_eq!(scene.remove_prefixed("ball_"), 2);
        assert_eq!(scene.objects.len(), 1);
    }
}
