//! Subsystem trait and lifecycle contract
//!
//! Every cooperating concern of the player (input, control, audio,
//! rendering, animation, physics) implements [`Subsystem`]. Instances are
//! injected once at player construction and reused across sessions.

use async_trait::async_trait;
use thiserror::Error;

use crate::foundation::time::FrameClock;
use crate::render::RenderContext;
use crate::scene::{AnimationClip, ScriptBinding};

/// The six lifecycle subsystems, in creation and disposal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubsystemKind {
    /// Input / script event handling
    EventHandler,
    /// Camera control
    Controller,
    /// Audio
    Audio,
    /// Rendering
    Renderer,
    /// Keyframe animation
    Animation,
    /// Physics
    Physics,
}

impl SubsystemKind {
    /// Creation and disposal order
    pub const ALL: [Self; 6] = [
        Self::EventHandler,
        Self::Controller,
        Self::Audio,
        Self::Renderer,
        Self::Animation,
        Self::Physics,
    ];

    /// Per-frame update order: input before view, physics last
    pub const UPDATE_ORDER: [Self; 5] = [
        Self::EventHandler,
        Self::Controller,
        Self::Renderer,
        Self::Animation,
        Self::Physics,
    ];
}

impl std::fmt::Display for SubsystemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::EventHandler => "event handler",
            Self::Controller => "controller",
            Self::Audio => "audio",
            Self::Renderer => "renderer",
            Self::Animation => "animation",
            Self::Physics => "physics",
        };
        f.write_str(name)
    }
}

/// Per-subsystem payload passed to [`Subsystem::create`]
#[derive(Debug, Clone, Default)]
pub enum CreateExtra {
    /// Nothing beyond the render context
    #[default]
    None,
    /// Script bindings (event handler)
    Scripts(Vec<ScriptBinding>),
    /// Animation clips (animation system)
    Clips(Vec<AnimationClip>),
    /// Session physics options (physics system)
    Physics {
        /// Diagnostic ball throwing from the camera
        enable_throw_ball: bool,
    },
}

/// Subsystem errors
#[derive(Error, Debug)]
pub enum SubsystemError {
    /// Setup could not complete
    #[error("Setup failed: {0}")]
    Setup(String),

    /// A required device or resource was unavailable
    #[error("Resource unavailable: {0}")]
    Unavailable(String),
}

/// Uniform lifecycle of a player subsystem
///
/// Call sequence per session: `create` (concurrently with the other
/// subsystems) → `init` → `start` → `update`* → (`stop`) → `dispose`.
/// Only the event handler receives `stop`; everyone receives `dispose`,
/// which must also be safe when `create` never ran or failed.
#[async_trait(?Send)]
pub trait Subsystem {
    /// Which role this subsystem fills
    fn kind(&self) -> SubsystemKind;

    /// Asynchronous setup against the session's render context
    async fn create(&mut self, context: RenderContext, extra: CreateExtra) -> Result<(), SubsystemError>;

    /// Called once every subsystem has been created
    fn init(&mut self) {}

    /// Called after the frame clock starts
    fn start(&mut self) {}

    /// Per-frame update
    fn update(&mut self, clock: &FrameClock, delta_time: f32);

    /// Unregister input hooks; called before any disposal
    fn stop(&mut self) {}

    /// Release session state and context handles
    fn dispose(&mut self);
}

/// Fixed set of the six subsystems, one per [`SubsystemKind`]
pub struct SubsystemSet {
    event_handler: Box<dyn Subsystem>,
    controller: Box<dyn Subsystem>,
    audio: Box<dyn Subsystem>,
    renderer: Box<dyn Subsystem>,
    animation: Box<dyn Subsystem>,
    physics: Box<dyn Subsystem>,
}

impl SubsystemSet {
    /// Assemble the set, checking each subsystem sits in its own slot
    pub fn new(
        event_handler: Box<dyn Subsystem>,
        controller: Box<dyn Subsystem>,
        audio: Box<dyn Subsystem>,
        renderer: Box<dyn Subsystem>,
        animation: Box<dyn Subsystem>,
        physics: Box<dyn Subsystem>,
    ) -> Result<Self, SubsystemError> {
        let set = Self { event_handler, controller, audio, renderer, animation, physics };
        for kind in SubsystemKind::ALL {
            let actual = set.get(kind).kind();
            if actual != kind {
                return Err(SubsystemError::Setup(format!(
                    "{actual} subsystem supplied in the {kind} slot"
                )));
            }
        }
        Ok(set)
    }

    /// Subsystem filling `kind`
    pub fn get(&self, kind: SubsystemKind) -> &dyn Subsystem {
        match kind {
            SubsystemKind::EventHandler => self.event_handler.as_ref(),
            SubsystemKind::Controller => self.controller.as_ref(),
            SubsystemKind::Audio => self.audio.as_ref(),
            SubsystemKind::Renderer => self.renderer.as_ref(),
            SubsystemKind::Animation => self.animation.as_ref(),
            SubsystemKind::Physics => self.physics.as_ref(),
        }
    }

    /// Subsystem filling `kind`, mutably
    pub fn get_mut(&mut self, kind: SubsystemKind) -> &mut dyn Subsystem {
        match kind {
            SubsystemKind::EventHandler => self.event_handler.as_mut(),
            SubsystemKind::Controller => self.controller.as_mut(),
            SubsystemKind::Audio => self.audio.as_mut(),
            SubsystemKind::Renderer => self.renderer.as_mut(),
            SubsystemKind::Animation => self.animation.as_mut(),
            SubsystemKind::Physics => self.physics.as_mut(),
        }
    }

    /// All six, mutably, in [`SubsystemKind::ALL`] order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Subsystem>> {
        [
            &mut self.event_handler,
            &mut self.controller,
            &mut self.audio,
            &mut self.renderer,
            &mut self.animation,
            &mut self.physics,
        ]
        .into_iter()
    }
}
