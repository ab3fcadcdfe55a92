//! Rendering context shared by all subsystems during a session
//!
//! The player owns the [`RenderContext`]; subsystems receive clones of its
//! handles in `create` and must drop them in `dispose`. Handles are
//! single-threaded (`Rc<RefCell<_>>`): mutation ordering is enforced by the
//! fixed frame-loop call order, not by locks.

pub mod camera;
pub mod target;

pub use camera::{AudioListener, Camera};
pub use target::RenderTarget;

use std::cell::RefCell;
use std::rc::Rc;

use crate::scene::Scene;

/// Single-threaded shared handle
pub type Shared<T> = Rc<RefCell<T>>;

/// Wrap a value in a [`Shared`] handle
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// The {scene, camera, render target, audio listener} tuple of one session
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Scene graph
    pub scene: Shared<Scene>,
    /// Active camera
    pub camera: Shared<Camera>,
    /// Rendering surface
    pub render_target: Shared<RenderTarget>,
    /// Listener attached to the camera
    pub audio_listener: Shared<AudioListener>,
}

impl RenderContext {
    /// Number of outstanding handles to the scene, including the player's own
    pub fn scene_handles(&self) -> usize {
        Rc::strong_count(&self.scene)
    }
}
