//! Player orchestration
//!
//! The [`Player`] coordinates all subsystems and drives the frame loop. It
//! owns:
//! - the state machine (`Stopped` / `Playing`)
//! - the asynchronous startup barrier over the six subsystems
//! - the per-frame update loop and its fixed ordering
//! - the rendering context of the current session
//!
//! The host drives the loop: every [`PlayerHost::request_frame`] is answered
//! by exactly one call to [`Player::tick`]. A tick that finds the player
//! stopped returns without rescheduling, which is how the loop ends.

mod error;
mod surface;


pub use error::PlayerError;
pub use surface::SurfaceObserver;

use futures::future::try_join_all;
use serde_json::Value;

use crate::config::{PlayerConfig, PlayerOptions};
use crate::events::{EventBus, ListenerId, PlayerEvent};
use crate::foundation::time::{FrameClock, FrameStats};
use crate::host::{Mountable, PlayerHost, SurfaceId, SurfaceSignal};
use crate::render::camera::aspect_ratio;
use crate::render::{shared, AudioListener, Camera, RenderContext, RenderTarget};
use crate::scene::{LoadedScene, RenderTargetSettings, Scene, SceneLoader};
use crate::subsystem::{CreateExtra, SubsystemKind, SubsystemSet};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// No session; initial state
    Stopped,
    /// A session is live
    Playing,
}

/// Scene player
///
/// Subsystems and the loader are injected at construction and reused for
/// every session. A session starts with [`Player::start`] and ends with
/// [`Player::stop`].
pub struct Player<H: PlayerHost> {
    config: PlayerConfig,
    host: H,
    loader: Box<dyn SceneLoader>,
    subsystems: SubsystemSet,
    events: EventBus<Player<H>>,
    observer: SurfaceObserver,
    clock: FrameClock,
    stats: Option<FrameStats>,
    context: Option<RenderContext>,
    is_playing: bool,
    mounted: bool,
    next_surface: u64,
    frame: u64,
}

impl<H: PlayerHost> Player<H> {
    /// Create a stopped player; configuration defaults are resolved here
    pub fn new(options: PlayerOptions, host: H, loader: Box<dyn SceneLoader>, subsystems: SubsystemSet) -> Self {
        let config = PlayerConfig::resolve(options, &host.origin());
        log::info!(
            "Player created (server: {}, throw ball: {}, stats: {})",
            config.server(),
            config.enable_throw_ball(),
            config.show_stats()
        );
        let stats = config.show_stats().then(FrameStats::default);

        Self {
            config,
            host,
            loader,
            subsystems,
            events: EventBus::new(),
            observer: SurfaceObserver::new(),
            clock: FrameClock::new(),
            stats,
            context: None,
            is_playing: false,
            mounted: false,
            next_surface: 0,
            frame: 0,
        }
    }

    /// Start a session from serialized scene data
    ///
    /// Only string values are accepted. Invalid input is reported to the
    /// user and leaves the player stopped. Calling `start` while playing is a
    /// no-op. Mounts the container first if [`Mountable::render`] has not
    /// run. A loader or subsystem failure rolls the session back and returns
    /// the error; the frame loop is never entered. Dropping the returned
    /// future before it completes rolls the session back as well.
    pub async fn start(&mut self, scene_data: impl Into<Value>) -> Result<(), PlayerError> {
        let document = match parse_scene_data(scene_data.into()) {
            Ok(document) => document,
            Err(err) => {
                log::warn!("Rejected scene data: {}", err);
                self.host.notify_user(&err.to_string());
                return Err(err);
            }
        };

        if self.is_playing {
            log::debug!("start() ignored: already playing");
            return Ok(());
        }

        if !self.mounted {
            log::debug!("start() before render(), mounting container");
            self.render();
        }

        self.is_playing = true;
        self.host.set_container_visible(true);
        log::info!("Starting scene session");

        let mut guard = BootstrapGuard { player: &mut *self, armed: true };
        let result = guard.player.bootstrap(document).await;
        guard.armed = false;
        drop(guard);

        if let Err(err) = result {
            log::error!("Scene session failed to start: {}", err);
            self.host.notify_user(&err.to_string());
            self.stop();
            return Err(err);
        }
        Ok(())
    }

    /// Load, build the context, notify, then run the create barrier
    async fn bootstrap(&mut self, document: Value) -> Result<(), PlayerError> {
        let LoadedScene { scene, camera, render_target, clips, scripts } =
            self.loader.load(document, self.config.server()).await?;

        let context = self.bootstrap_context(scene, camera, render_target);
        self.context = Some(context);
        self.emit(PlayerEvent::Init);

        // An Init listener is free to stop the session again.
        let Some(context) = self.context.clone() else {
            log::info!("Session stopped during init notification");
            return Ok(());
        };

        let enable_throw_ball = self.config.enable_throw_ball();
        let mut scripts = Some(scripts);
        let mut clips = Some(clips);
        let pending = self.subsystems.iter_mut().map(|subsystem| {
            let kind = subsystem.kind();
            let extra = match kind {
                SubsystemKind::EventHandler => scripts.take().map_or_else(CreateExtra::default, CreateExtra::Scripts),
                SubsystemKind::Animation => clips.take().map_or_else(CreateExtra::default, CreateExtra::Clips),
                SubsystemKind::Physics => CreateExtra::Physics { enable_throw_ball },
                _ => CreateExtra::None,
            };
            let context = context.clone();
            async move {
                log::debug!("Creating {} subsystem", kind);
                subsystem
                    .create(context, extra)
                    .await
                    .map_err(|source| PlayerError::SubsystemInit { kind, source })
            }
        });
        try_join_all(pending).await?;

        for subsystem in self.subsystems.iter_mut() {
            subsystem.init();
        }
        self.clock.start();
        for subsystem in self.subsystems.iter_mut() {
            subsystem.start();
        }
        if let Some(stats) = self.stats.as_mut() {
            stats.reset();
        }

        log::info!(
            "Scene '{}' playing ({} objects)",
            context.scene.borrow().name,
            context.scene.borrow().objects.len()
        );
        self.host.request_frame();
        Ok(())
    }

    /// Complete the loaded pieces with defaults sized to the container
    fn bootstrap_context(
        &mut self,
        scene: Option<Scene>,
        camera: Option<Camera>,
        settings: Option<RenderTargetSettings>,
    ) -> RenderContext {
        let width = self.host.client_width();
        let height = self.host.client_height();

        let mut camera = camera.unwrap_or_else(|| {
            log::debug!("No camera in scene, using default {}x{} perspective", width, height);
            Camera::for_viewport(width, height)
        });

        let surface = SurfaceId(self.next_surface);
        self.next_surface += 1;
        let render_target = match settings {
            Some(settings) => {
                let mut target = RenderTarget::new(
                    surface,
                    settings.width.unwrap_or(width),
                    settings.height.unwrap_or(height),
                );
                target.clear_color = settings.clear_color;
                target
            }
            None => RenderTarget::new(surface, width, height),
        };
        self.host.attach_surface(surface);

        camera.set_aspect_ratio(aspect_ratio(render_target.width(), render_target.height()));
        camera.update_projection_matrix();

        let audio_listener = shared(AudioListener::default());
        camera.attach_listener(audio_listener.clone());

        RenderContext {
            scene: shared(scene.unwrap_or_else(Scene::empty)),
            camera: shared(camera),
            render_target: shared(render_target),
            audio_listener,
        }
    }

    /// End the session
    ///
    /// No-op when stopped. The event handler is stopped before anything is
    /// disposed, then the loader and every subsystem are disposed in fixed
    /// order, and the rendering surface is detached before the context is
    /// dropped.
    pub fn stop(&mut self) {
        if !self.is_playing {
            return;
        }
        self.is_playing = false;

        self.subsystems.get_mut(SubsystemKind::EventHandler).stop();
        self.loader.dispose();
        for subsystem in self.subsystems.iter_mut() {
            subsystem.dispose();
        }

        self.host.set_container_visible(false);
        if let Some(context) = &self.context {
            let surface = context.render_target.borrow().surface();
            self.host.detach_surface(surface);
        }
        self.context = None;
        self.clock.stop();

        log::info!("Scene session stopped after {:.2}s", self.clock.elapsed());
    }

    /// Match the camera and render target to the container
    ///
    /// Without an active session this does nothing.
    pub fn resize(&mut self) {
        let Some(context) = &self.context else {
            return;
        };
        let width = self.host.client_width();
        let height = self.host.client_height();

        {
            let mut camera = context.camera.borrow_mut();
            camera.set_aspect_ratio(aspect_ratio(width, height));
            camera.update_projection_matrix();
        }
        context.render_target.borrow_mut().set_size(width, height);
    }

    /// Deliver a host surface signal
    pub fn handle_surface_signal(&mut self, signal: SurfaceSignal) {
        if self.observer.observes(signal) {
            self.resize();
        } else {
            log::trace!("Ignoring unobserved surface signal {:?}", signal);
        }
    }

    /// One frame of the update loop; called once per host frame callback
    pub fn tick(&mut self) {
        if !self.is_playing {
            log::trace!("Frame loop ended");
            return;
        }

        if let Some(stats) = self.stats.as_mut() {
            stats.begin();
        }

        let delta = self.clock.get_delta();
        for kind in SubsystemKind::UPDATE_ORDER {
            self.subsystems.get_mut(kind).update(&self.clock, delta);
        }

        if let Some(stats) = self.stats.as_mut() {
            stats.end();
        }

        self.frame += 1;
        self.host.request_frame();
    }

    /// Register a notification handler; it receives the player itself
    pub fn on(&mut self, event: PlayerEvent, handler: impl FnMut(&mut Self) + 'static) -> ListenerId {
        self.events.on(event, handler)
    }

    /// Unregister a notification handler
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    /// Handlers registered for `event`
    pub fn listener_count(&self, event: PlayerEvent) -> usize {
        self.events.listener_count(event)
    }

    fn emit(&mut self, event: PlayerEvent) {
        let mut listeners = self.events.detach(event);
        log::debug!("Broadcasting {:?} to {} listener(s)", event, listeners.len());
        for listener in &mut listeners {
            listener.call(self);
        }
        self.events.reattach(event, listeners);
    }

    /// Stop, unmount and drop every notification handler
    pub fn dispose(&mut self) {
        self.stop();
        self.unmount();
        self.events.clear();
    }

    /// Whether a session is live
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Current state
    pub fn state(&self) -> PlayerState {
        if self.is_playing {
            PlayerState::Playing
        } else {
            PlayerState::Stopped
        }
    }

    /// Resolved configuration
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Rendering context of the live session
    pub fn context(&self) -> Option<&RenderContext> {
        self.context.as_ref()
    }

    /// Session clock
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Frame statistics, when the overlay is enabled
    pub fn stats(&self) -> Option<&FrameStats> {
        self.stats.as_ref()
    }

    /// Frames ticked over the player's lifetime
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Embedding host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Embedding host, mutably
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: PlayerHost> Mountable for Player<H> {
    fn render(&mut self) {
        if !self.mounted {
            self.host.create_container();
            self.mounted = true;
        }
        self.observer.install(&mut self.host);
    }

    fn unmount(&mut self) {
        self.observer.uninstall(&mut self.host);
        if self.mounted {
            self.host.remove_container();
            self.mounted = false;
        }
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

/// Rolls a session back when the `start` future is dropped mid-bootstrap
struct BootstrapGuard<'a, H: PlayerHost> {
    player: &'a mut Player<H>,
    armed: bool,
}

impl<H: PlayerHost> Drop for BootstrapGuard<'_, H> {
    fn drop(&mut self) {
        if self.armed {
            log::warn!("Scene session start was cancelled, rolling back");
            self.player.stop();
        }
    }
}

/// Accept only serialized text and parse it as a JSON document
fn parse_scene_data(scene_data: Value) -> Result<Value, PlayerError> {
    match scene_data {
        Value::String(text) => Ok(serde_json::from_str(&text)?),
        other => Err(PlayerError::InvalidInput(value_kind(&other).to_string())),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
