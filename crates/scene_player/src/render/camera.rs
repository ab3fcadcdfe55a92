//! # Perspective camera
//!
//! Camera state is plain data; the projection matrix is cached and only
//! recomputed by [`Camera::update_projection_matrix`], so callers that change
//! `fov`, `aspect`, `near` or `far` must call it afterwards (the player does
//! this on every resize).

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use crate::render::Shared;

/// Field of view (degrees) of the camera synthesized for scenes without one
pub const DEFAULT_FOV_DEGREES: f32 = 50.0;
/// Near plane of the synthesized camera
pub const DEFAULT_NEAR: f32 = 0.1;
/// Far plane of the synthesized camera
pub const DEFAULT_FAR: f32 = 1000.0;

/// Audio listener; its world position is the position of the camera it is attached to
#[derive(Debug, Clone, PartialEq)]
pub struct AudioListener {
    /// Master gain in [0, 1]
    pub gain: f32,
}

impl Default for AudioListener {
    fn default() -> Self {
        Self { gain: 1.0 }
    }
}

/// 3D perspective camera
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Field of view angle in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,

    projection: Mat4,
    listener: Option<Shared<AudioListener>>,
}

impl Camera {
    /// Create a new perspective camera looking at the origin
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Field of view angle in degrees
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
            projection: Mat4::identity(),
            listener: None,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Default camera for a viewport of the given size
    pub fn for_viewport(width: u32, height: u32) -> Self {
        Self::perspective(
            Vec3::new(0.0, 5.0, 10.0),
            DEFAULT_FOV_DEGREES,
            aspect_ratio(width, height),
            DEFAULT_NEAR,
            DEFAULT_FAR,
        )
    }

    /// Set the aspect ratio; call [`Camera::update_projection_matrix`] afterwards
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::debug!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Recompute the cached projection matrix
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective(self.fov, self.aspect, self.near, self.far);
    }

    /// Cached projection matrix
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    /// View matrix for the current position and target
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Unit vector from the camera towards its target
    pub fn forward(&self) -> Vec3 {
        let dir = self.target - self.position;
        if dir.norm_squared() > f32::EPSILON {
            dir.normalize()
        } else {
            Vec3::new(0.0, 0.0, -1.0)
        }
    }

    /// Attach an audio listener so it follows this camera
    pub fn attach_listener(&mut self, listener: Shared<AudioListener>) {
        self.listener = Some(listener);
    }

    /// Listener attached to this camera
    pub fn listener(&self) -> Option<&Shared<AudioListener>> {
        self.listener.as_ref()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::for_viewport(16, 9)
    }
}

/// width / height, falling back to 1.0 for a degenerate viewport
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_viewport_camera_aspect() {
        let camera = Camera::for_viewport(800, 600);
        assert_relative_eq!(camera.aspect, 800.0 / 600.0);
        assert_relative_eq!(camera.fov, utils::deg_to_rad(DEFAULT_FOV_DEGREES));
    }

    #[test]
    fn test_projection_is_cached_until_updated() {
        let mut camera = Camera::for_viewport(100, 100);
        let before = *camera.projection_matrix();
        camera.set_aspect_ratio(2.0);
        assert_eq!(*camera.projection_matrix(), before);
        camera.update_projection_matrix();
        assert_relative_eq!(camera.projection_matrix()[(0, 0)], before[(0, 0)] / 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_degenerate_viewport_aspect() {
        assert_eq!(aspect_ratio(0, 10), 1.0);
        assert_eq!(aspect_ratio(10, 0), 1.0);
    }

    #[test]
    fn test_forward_points_at_target() {
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 60.0, 1.0, 0.1, 10.0);
        assert_relative_eq!(camera.forward(), Vec3::new(0.0, 0.0, -1.0));
    }
}
