//! Camera controller

use async_trait::async_trait;

use crate::foundation::math::Vec3;
use crate::foundation::time::FrameClock;
use crate::render::RenderContext;
use crate::subsystem::{CreateExtra, Subsystem, SubsystemError, SubsystemKind};

/// Orbits the camera around its target about the world Y axis
pub struct OrbitController {
    /// Angular speed in radians per second; zero disables auto-rotation
    pub speed: f32,
    context: Option<RenderContext>,
}

impl OrbitController {
    /// Controller rotating at `speed` radians per second
    pub fn new(speed: f32) -> Self {
        Self { speed, context: None }
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[async_trait(?Send)]
impl Subsystem for OrbitController {
    fn kind(&self) -> SubsystemKind {
        SubsystemKind::Controller
    }

    async fn create(&mut self, context: RenderContext, _extra: CreateExtra) -> Result<(), SubsystemError> {
        self.context = Some(context);
        Ok(())
    }

    fn update(&mut self, _clock: &FrameClock, delta_time: f32) {
        let Some(context) = &self.context else {
            return;
        };
        if self.speed == 0.0 {
            return;
        }
        let mut camera = context.camera.borrow_mut();
        let offset = camera.position - camera.target;
        let (sin, cos) = (self.speed * delta_time).sin_cos();
        let rotated = Vec3::new(
            offset.x * cos + offset.z * sin,
            offset.y,
            -offset.x * sin + offset.z * cos,
        );
        camera.position = camera.target + rotated;
    }

    fn dispose(&mut self) {
        self.context = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SurfaceId;
    use crate::render::{shared, AudioListener, Camera, RenderTarget};
    use crate::scene::Scene;
    use approx::assert_relative_eq;
    use futures::executor::block_on;

    fn context() -> RenderContext {
        RenderContext {
            scene: shared(Scene::empty()),
            camera: shared(Camera::perspective(Vec3::new(0.0, 1.0, 5.0), 50.0, 1.0, 0.1, 100.0)),
            render_target: shared(RenderTarget::new(SurfaceId(0), 10, 10)),
            audio_listener: shared(AudioListener::default()),
        }
    }

    #[test]
    fn test_orbit_preserves_distance_and_height() {
        let ctx = context();
        let mut controller = OrbitController::new(std::f32::consts::FRAC_PI_2);
        block_on(controller.create(ctx.clone(), CreateExtra::None)).expect("create");
        controller.update(&FrameClock::new(), 1.0);

        let camera = ctx.camera.borrow();
        assert_relative_eq!(camera.position, Vec3::new(5.0, 1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_dispose_releases_context() {
        let ctx = context();
        let mut controller = OrbitController::default();
        block_on(controller.create(ctx.clone(), CreateExtra::None)).expect("create");
        assert_eq!(ctx.scene_handles(), 2);
        controller.dispose();
        assert_eq!(ctx.scene_handles(), 1);
    }
}
