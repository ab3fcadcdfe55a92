//! # Scene Player
//!
//! Orchestrates the lifecycle of an embeddable 3D scene player: loading a
//! serialized scene, bringing up its subsystems concurrently, driving the
//! per-frame update loop and tearing everything down again.
//!
//! ## Features
//!
//! - **Async Startup Barrier**: all subsystems are created concurrently and
//!   the frame loop only starts once every one of them is ready
//! - **Fixed Frame Ordering**: input, control, rendering, animation, physics
//! - **Host Abstraction**: container, surface and frame scheduling come from
//!   a [`PlayerHost`]
//! - **Reference Subsystems**: headless implementations of every collaborator
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_player::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (subsystems, _handles) = reference_set(0.0)?;
//!     let mut player = Player::new(
//!         PlayerOptions::default(),
//!         HeadlessHost::default(),
//!         Box::new(JsonSceneLoader::new()),
//!         subsystems,
//!     );
//!     player.render();
//!
//!     futures::executor::block_on(player.start(r#"{"scene": {"objects": []}}"#))?;
//!     while player.host_mut().take_frame_request() {
//!         player.tick();
//!         if player.frame_count() == 60 {
//!             player.stop();
//!         }
//!     }
//!     player.dispose();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod events;
pub mod host;
pub mod render;
pub mod scene;
pub mod subsystem;
pub mod subsystems;
pub mod player;

pub use player::{Player, PlayerError, PlayerState};
pub use subsystem::{CreateExtra, Subsystem, SubsystemError, SubsystemKind, SubsystemSet};
pub use host::{Mountable, PlayerHost};

/// Common imports for player users
pub mod prelude {
    pub use crate::{
        Player, PlayerError, PlayerState,
        Subsystem, SubsystemError, SubsystemKind, SubsystemSet, CreateExtra,
        config::{Config, PlayerConfig, PlayerOptions},
        events::{ListenerId, PlayerEvent},
        foundation::{
            math::{Vec3, Mat4},
            time::{FrameClock, FrameStats},
        },
        host::{HeadlessHost, Mountable, PlayerHost, SurfaceId, SurfaceSignal},
        render::{AudioListener, Camera, RenderContext, RenderTarget},
        scene::{LoadError, LoadedScene, Scene, SceneLoader, SceneObject},
        subsystems::{reference_set, InputEvent, JsonSceneLoader, ReferenceHandles},
    };
}
