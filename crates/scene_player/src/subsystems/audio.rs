//! Audio system
//!
//! Decoding and playback are out of scope; this subsystem owns the master
//! gain of the camera-attached listener. It is not part of the per-frame
//! update order.

use async_trait::async_trait;

use crate::foundation::time::FrameClock;
use crate::render::RenderContext;
use crate::subsystem::{CreateExtra, Subsystem, SubsystemError, SubsystemKind};

/// Applies a master gain to the session's audio listener
pub struct ListenerAudio {
    master_gain: f32,
    context: Option<RenderContext>,
}

impl ListenerAudio {
    /// Audio system with the given master gain (clamped to [0, 1])
    pub fn new(master_gain: f32) -> Self {
        Self {
            master_gain: master_gain.clamp(0.0, 1.0),
            context: None,
        }
    }
}

impl Default for ListenerAudio {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[async_trait(?Send)]
impl Subsystem for ListenerAudio {
    fn kind(&self) -> SubsystemKind {
        SubsystemKind::Audio
    }

    async fn create(&mut self, context: RenderContext, _extra: CreateExtra) -> Result<(), SubsystemError> {
        if context.camera.borrow().listener().is_none() {
            return Err(SubsystemError::Unavailable("camera has no audio listener".to_string()));
        }
        self.context = Some(context);
        Ok(())
    }

    fn start(&mut self) {
        if let Some(context) = &self.context {
            context.audio_listener.borrow_mut().gain = self.master_gain;
        }
    }

    fn update(&mut self, _clock: &FrameClock, _delta_time: f32) {}

    fn dispose(&mut self) {
        if let Some(context) = self.context.take() {
            context.audio_listener.borrow_mut().gain = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SurfaceId;
    use crate::render::{shared, AudioListener, Camera, RenderTarget};
    use crate::scene::Scene;
    use futures::executor::block_on;

    #[test]
    fn test_gain_applied_on_start_and_silenced_on_dispose() {
        let listener = shared(AudioListener::default());
        let mut camera = Camera::default();
        camera.attach_listener(listener.clone());
        let ctx = RenderContext {
            scene: shared(Scene::empty()),
            camera: shared(camera),
            render_target: shared(RenderTarget::new(SurfaceId(0), 8, 8)),
            audio_listener: listener.clone(),
        };

        let mut audio = ListenerAudio::new(0.4);
        block_on(audio.create(ctx, CreateExtra::None)).expect("create");
        audio.start();
        assert_eq!(listener.borrow().gain, 0.4);

        audio.dispose();
        assert_eq!(listener.borrow().gain, 0.0);
    }

    #[test]
    fn test_camera_without_listener_is_rejected() {
        let ctx = RenderContext {
            scene: shared(Scene::empty()),
            camera: shared(Camera::default()),
            render_target: shared(RenderTarget::new(SurfaceId(0), 8, 8)),
            audio_listener: shared(AudioListener::default()),
        };
        let mut audio = ListenerAudio::default();
        let result = block_on(audio.create(ctx, CreateExtra::None));
        assert!(matches!(result, Err(SubsystemError::Unavailable(_))));
    }
}
