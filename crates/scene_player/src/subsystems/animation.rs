//! Keyframe animation

use async_trait::async_trait;

use crate::foundation::math::{utils, Vec3};
use crate::foundation::time::FrameClock;
use crate::render::RenderContext;
use crate::scene::AnimationClip;
use crate::subsystem::{CreateExtra, Subsystem, SubsystemError, SubsystemKind};

/// Plays looping position clips against scene objects
#[derive(Default)]
pub struct KeyframeAnimator {
    clips: Vec<AnimationClip>,
    time: f32,
    context: Option<RenderContext>,
}

impl KeyframeAnimator {
    /// Create an idle animator
    pub fn new() -> Self {
        Self::default()
    }

    /// Playback time of the current session in seconds
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Number of clips bound to the current session
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }
}

/// Position of `clip` at `time`, looping over the clip duration
///
/// Before the first keyframe the first position holds, after the last
/// keyframe the last position holds.
pub fn sample(clip: &AnimationClip, time: f32) -> Option<Vec3> {
    let first = clip.keyframes.first()?;
    let last = clip.keyframes.last()?;
    let t = if clip.duration > 0.0 { time.rem_euclid(clip.duration) } else { 0.0 };

    if t <= first.time {
        return Some(first.position);
    }
    if t >= last.time {
        return Some(last.position);
    }

    let next = clip.keyframes.iter().position(|k| k.time > t)?;
    let (a, b) = (&clip.keyframes[next - 1], &clip.keyframes[next]);
    let span = b.time - a.time;
    if span <= f32::EPSILON {
        return Some(b.position);
    }
    Some(utils::lerp_vec3(&a.position, &b.position, (t - a.time) / span))
}

#[async_trait(?Send)]
impl Subsystem for KeyframeAnimator {
    fn kind(&self) -> SubsystemKind {
        SubsystemKind::Animation
    }

    async fn create(&mut self, context: RenderContext, extra: CreateExtra) -> Result<(), SubsystemError> {
        let clips = match extra {
            CreateExtra::Clips(clips) => clips,
            _ => Vec::new(),
        };
        {
            let scene = context.scene.borrow();
            for clip in &clips {
                if scene.find(&clip.target).is_none() {
                    log::warn!("Animation '{}' targets unknown object '{}'", clip.name, clip.target);
                }
            }
        }
        log::debug!("Animator bound {} clip(s)", clips.len());
        self.clips = clips;
        self.time = 0.0;
        self.context = Some(context);
        Ok(())
    }

    fn update(&mut self, _clock: &FrameClock, delta_time: f32) {
        let Some(context) = self.context.clone() else {
            return;
        };
        self.time += delta_time;

        let mut scene = context.scene.borrow_mut();
        for clip in &self.clips {
            let Some(position) = sample(clip, self.time) else {
                continue;
            };
            if let Some(object) = scene.find_mut(&clip.target) {
                object.position = position;
            }
        }
    }

    fn dispose(&mut self) {
        self.clips.clear();
        self.time = 0.0;
        self.context = None;
    }
}
