//! Physics
//!
//! Explicit Euler integration of dynamic objects under gravity, with a
//! ground plane at `y = 0`. Optionally spawns balls thrown from the camera.

use async_trait::async_trait;
use std::cell::Cell;
use std::rc::Rc;

use crate::foundation::math::Vec3;
use crate::foundation::time::FrameClock;
use crate::render::RenderContext;
use crate::scene::SceneObject;
use crate::subsystem::{CreateExtra, Subsystem, SubsystemError, SubsystemKind};

/// Gravitational acceleration (units / s²)
pub const GRAVITY: f32 = -9.81;
/// Launch speed of a thrown ball
pub const THROW_SPEED: f32 = 12.0;
/// Name prefix of spawned balls
pub const BALL_PREFIX: &str = "ball_";

/// Requests a ball throw on the next physics step
#[derive(Debug, Clone, Default)]
pub struct ThrowBallTrigger {
    pending: Rc<Cell<u32>>,
}

impl ThrowBallTrigger {
    /// Request one throw
    pub fn fire(&self) {
        self.pending.set(self.pending.get() + 1);
    }

    /// Throws not yet processed
    pub fn pending(&self) -> u32 {
        self.pending.get()
    }

    fn take(&self) -> u32 {
        self.pending.replace(0)
    }
}

/// Physics subsystem
///
/// Ball throwing follows the player's `enable_throw_ball` option, delivered
/// through [`CreateExtra::Physics`] each session.
#[derive(Default)]
pub struct SimplePhysics {
    enable_throw_ball: bool,
    trigger: ThrowBallTrigger,
    spawned: u32,
    context: Option<RenderContext>,
}

impl SimplePhysics {
    /// Create idle physics; throwing stays disabled until a session enables it
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the current session spawns balls on trigger
    pub fn throw_ball_enabled(&self) -> bool {
        self.enable_throw_ball
    }

    /// Handle used to request throws
    pub fn trigger(&self) -> ThrowBallTrigger {
        self.trigger.clone()
    }

    fn throw_balls(&mut self, context: &RenderContext) {
        let requested = self.trigger.take();
        if requested == 0 {
            return;
        }
        if !self.enable_throw_ball {
            log::debug!("Ignoring {} throw request(s): throw ball disabled", requested);
            return;
        }

        let (origin, forward) = {
            let camera = context.camera.borrow();
            (camera.position, camera.forward())
        };
        let mut scene = context.scene.borrow_mut();
        for _ in 0..requested {
            let mut ball = SceneObject::new(format!("{}{}", BALL_PREFIX, self.spawned), origin + forward);
            ball.velocity = forward * THROW_SPEED;
            ball.mass = 1.0;
            scene.add(ball);
            self.spawned += 1;
        }
    }
}

#[async_trait(?Send)]
impl Subsystem for SimplePhysics {
    fn kind(&self) -> SubsystemKind {
        SubsystemKind::Physics
    }

    async fn create(&mut self, context: RenderContext, extra: CreateExtra) -> Result<(), SubsystemError> {
        self.enable_throw_ball = matches!(extra, CreateExtra::Physics { enable_throw_ball: true });
        self.spawned = 0;
        self.trigger.take();
        self.context = Some(context);
        Ok(())
    }

    fn update(&mut self, _clock: &FrameClock, delta_time: f32) {
        let Some(context) = self.context.clone() else {
            return;
        };
        self.throw_balls(&context);

        let gravity = Vec3::new(0.0, GRAVITY, 0.0);
        let mut scene = context.scene.borrow_mut();
        for object in scene.objects.iter_mut().filter(|o| o.is_dynamic()) {
            object.velocity += gravity * delta_time;
            object.position += object.velocity * delta_time;
            if object.position.y < 0.0 {
                object.position.y = 0.0;
                object.velocity.y = 0.0;
            }
        }
    }

    fn dispose(&mut self) {
        self.trigger.take();
        self.enable_throw_ball = false;
        self.spawned = 0;
        self.context = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SurfaceId;
    use crate::render::{shared, AudioListener, Camera, RenderTarget};
    use crate::scene::Scene;
    use futures::executor::block_on;

    fn context() -> RenderContext {
        RenderContext {
            scene: shared(Scene::empty()),
            camera: shared(Camera::perspective(Vec3::new(0.0, 2.0, 5.0), 50.0, 1.0, 0.1, 100.0)),
            render_target: shared(RenderTarget::new(SurfaceId(0), 8, 8)),
            audio_listener: shared(AudioListener::default()),
        }
    }

    #[test]
    fn test_throw_spawns_ball_when_enabled() {
        let ctx = context();
        let mut physics = SimplePhysics::new();
        block_on(physics.create(ctx.clone(), CreateExtra::Physics { enable_throw_ball: true })).expect("create");

        physics.trigger().fire();
        physics.update(&FrameClock::new(), 0.0);

        let scene = ctx.scene.borrow();
        let ball = scene.find("ball_0").expect("ball spawned");
        assert!(ball.is_dynamic());
        assert!(ball.velocity.norm() > 0.0);
    }

    #[test]
    fn test_throw_ignored_when_disabled() {
        let ctx = context();
        let mut physics = SimplePhysics::new();
        block_on(physics.create(ctx.clone(), CreateExtra::Physics { enable_throw_ball: false })).expect("create");

        let trigger = physics.trigger();
        trigger.fire();
        physics.update(&FrameClock::new(), 0.1);

        assert!(ctx.scene.borrow().objects.is_empty());
        assert_eq!(trigger.pending(), 0);
    }

    #[test]
    fn test_gravity_stops_at_ground() {
        let ctx = context();
        let mut falling = SceneObject::new("rock", Vec3::new(0.0, 1.0, 0.0));
        falling.mass = 2.0;
        ctx.scene.borrow_mut().add(falling);
        ctx.scene.borrow_mut().add(SceneObject::new("floor", Vec3::new(0.0, 0.5, 0.0)));

        let mut physics = SimplePhysics::new();
        block_on(physics.create(ctx.clone(), CreateExtra::None)).expect("create");
        for _ in 0..120 {
            physics.update(&FrameClock::new(), 1.0 / 60.0);
        }

        let scene = ctx.scene.borrow();
        assert_eq!(scene.find("rock").expect("rock").position.y, 0.0);
        assert_eq!(scene.find("floor").expect("floor").position.y, 0.5);
    }

    #[test]
    fn test_dispose_resets_session_options() {
        let mut physics = SimplePhysics::new();
        block_on(physics.create(context(), CreateExtra::Physics { enable_throw_ball: true })).expect("create");
        assert!(physics.throw_ball_enabled());
        physics.dispose();
        assert!(!physics.throw_ball_enabled());
    }
}
