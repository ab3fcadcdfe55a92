//! Headless renderer
//!
//! Rasterization is out of scope. Each frame the renderer resolves which
//! objects fall inside the camera's depth range and presents one frame to
//! the render target.

use async_trait::async_trait;

use crate::foundation::math::Vec4;
use crate::foundation::time::FrameClock;
use crate::render::{shared, RenderContext, Shared};
use crate::subsystem::{CreateExtra, Subsystem, SubsystemError, SubsystemKind};

/// What the renderer drew
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Frames rendered this session
    pub frames: u64,
    /// Objects drawn in the last frame
    pub last_visible: usize,
}

/// Renderer that counts instead of drawing
pub struct HeadlessRenderer {
    report: Shared<RenderReport>,
    context: Option<RenderContext>,
}

impl HeadlessRenderer {
    /// Create a renderer
    pub fn new() -> Self {
        Self {
            report: shared(RenderReport::default()),
            context: None,
        }
    }

    /// Shared render report
    pub fn report(&self) -> Shared<RenderReport> {
        self.report.clone()
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl Subsystem for HeadlessRenderer {
    fn kind(&self) -> SubsystemKind {
        SubsystemKind::Renderer
    }

    async fn create(&mut self, context: RenderContext, _extra: CreateExtra) -> Result<(), SubsystemError> {
        {
            let target = context.render_target.borrow();
            if target.width() == 0 || target.height() == 0 {
                return Err(SubsystemError::Unavailable(format!(
                    "render target {:?} has zero size",
                    target.surface()
                )));
            }
        }
        *self.report.borrow_mut() = RenderReport::default();
        self.context = Some(context);
        Ok(())
    }

    fn update(&mut self, _clock: &FrameClock, _delta_time: f32) {
        let Some(context) = &self.context else {
            return;
        };
        let camera = context.camera.borrow();
        let view = camera.view_matrix();
        let visible = context
            .scene
            .borrow()
            .objects
            .iter()
            .filter(|o| o.visible)
            .filter(|o| {
                let p = o.position;
                let depth = -(view * Vec4::new(p.x, p.y, p.z, 1.0)).z;
                depth >= camera.near && depth <= camera.far
            })
            .count();

        context.render_target.borrow_mut().frames_presented += 1;
        let mut report = self.report.borrow_mut();
        report.frames += 1;
        report.last_visible = visible;
    }

    fn dispose(&mut self) {
        self.context = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::host::SurfaceId;
    use crate::render::{AudioListener, Camera, RenderTarget};
    use crate::scene::{Scene, SceneObject};
    use futures::executor::block_on;

    #[test]
    fn test_counts_objects_in_front_of_camera() {
        let mut scene = Scene::empty();
        scene.add(SceneObject::new("front", Vec3::new(0.0, 0.0, 0.0)));
        scene.add(SceneObject::new("behind", Vec3::new(0.0, 0.0, 20.0)));
        let mut hidden = SceneObject::new("hidden", Vec3::new(0.0, 0.0, 1.0));
        hidden.visible = false;
        scene.add(hidden);

        let ctx = RenderContext {
            scene: shared(scene),
            camera: shared(Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 50.0, 1.0, 0.1, 100.0)),
            render_target: shared(RenderTarget::new(SurfaceId(3), 64, 64)),
            audio_listener: shared(AudioListener::default()),
        };

        let mut renderer = HeadlessRenderer::new();
        block_on(renderer.create(ctx.clone(), CreateExtra::None)).expect("create");
        renderer.update(&FrameClock::new(), 0.016);

        let report = renderer.report();
        assert_eq!(report.borrow().frames, 1);
        assert_eq!(report.borrow().last_visible, 1);
        assert_eq!(ctx.render_target.borrow().frames_presented, 1);
    }

    #[test]
    fn test_zero_sized_target_fails_create() {
        let ctx = RenderContext {
            scene: shared(Scene::empty()),
            camera: shared(Camera::default()),
            render_target: shared(RenderTarget::new(SurfaceId(0), 0, 0)),
            audio_listener: shared(AudioListener::default()),
        };
        let mut renderer = HeadlessRenderer::new();
        let result = block_on(renderer.create(ctx, CreateExtra::None));
        assert!(matches!(result, Err(SubsystemError::Unavailable(_))));
    }
}
