//! Reference subsystems
//!
//! Self-contained implementations of every collaborator the player drives.
//! None of them touches a GPU or an audio device; together they make the
//! player runnable headless (tests, the demo binary, CI).

pub mod animation;
pub mod audio;
pub mod controller;
pub mod input;
pub mod loader;
pub mod physics;
pub mod renderer;

pub use animation::KeyframeAnimator;
pub use audio::ListenerAudio;
pub use controller::OrbitController;
pub use input::{InputEvent, InputQueue, ScriptEventHandler};
pub use loader::JsonSceneLoader;
pub use physics::{SimplePhysics, ThrowBallTrigger};
pub use renderer::{HeadlessRenderer, RenderReport};

use std::collections::HashMap;

use crate::render::Shared;
use crate::subsystem::{SubsystemError, SubsystemSet};

/// Handles into a [`reference_set`] that stay valid across sessions
#[derive(Debug, Clone)]
pub struct ReferenceHandles {
    /// Input hook point of the event handler
    pub input: InputQueue,
    /// Per-script invocation counts
    pub invocations: Shared<HashMap<String, u64>>,
    /// Ball throw requests
    pub throw_ball: ThrowBallTrigger,
    /// Renderer output
    pub render_report: Shared<RenderReport>,
}

/// Build the six reference subsystems
///
/// Session options such as ball throwing come from the player's resolved
/// configuration at create time.
pub fn reference_set(orbit_speed: f32) -> Result<(SubsystemSet, ReferenceHandles), SubsystemError> {
    let input = InputQueue::new();
    let event_handler = ScriptEventHandler::new(input.clone());
    let renderer = HeadlessRenderer::new();
    let physics = SimplePhysics::new();

    let handles = ReferenceHandles {
        input,
        invocations: event_handler.invocations(),
        throw_ball: physics.trigger(),
        render_report: renderer.report(),
    };

    let set = SubsystemSet::new(
        Box::new(event_handler),
        Box::new(OrbitController::new(orbit_speed)),
        Box::new(ListenerAudio::default()),
        Box::new(renderer),
        Box::new(KeyframeAnimator::new()),
        Box::new(physics),
    )?;
    Ok((set, handles))
}
