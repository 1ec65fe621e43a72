//! # Perspective Camera
//!
//! Viewpoint used by the visibility pass and handed to the renderer. The
//! camera itself is passive: an external input collaborator may move it
//! through [`Camera::set_position`] / [`Camera::look_at`] between frames.
//!
//! View space is right-handed and Y-up. The combined view-projection applies
//! the Y-down, Z-forward clip convention separately (`P * X * V`), which gives
//! depth in `[0, w]`.

use crate::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

use super::bounds::Frustum;

/// Perspective camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a perspective camera looking at the origin with +Y up
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Camera described by configuration
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::perspective(
            Vec3::from(config.position),
            config.fov_degrees,
            config.aspect,
            config.near,
            config.far,
        );
        camera.set_target(Vec3::from(config.target));
        camera
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Update the look-at point
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        log::trace!("Camera target updated to: {:?}", target);
    }

    /// Set target and up vector together
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.target = target;
        self.up = up;
    }

    /// Update the aspect ratio after a viewport change
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Perspective projection
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined view-projection: `P * X * V`
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * Mat4::vulkan_coordinate_transform() * self.view_matrix()
    }

    /// Current view volume
    pub fn frustum(&self) -> Frustum {
        Frustum::from_matrix(&self.view_projection_matrix())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::bounds::Aabb;

    #[test]
    fn test_default_camera_sees_its_target() {
        let camera = Camera::default();
        let frustum = camera.frustum();

        assert!(frustum.contains_point(Vec3::new(0.0, 4.0, 0.0)));
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_points_behind_or_beyond_are_culled() {
        let camera = Camera::default();
        let frustum = camera.frustum();

        // Behind the eye
        assert!(!frustum.contains_point(Vec3::new(6.0, 10.0, 20.0)));
        // Past the far plane along the view direction
        let direction = (camera.target - camera.position).normalize();
        assert!(!frustum.contains_point(camera.position + direction * 150.0));
        // Far off to the side
        let side = Aabb::from_center_extents(Vec3::new(200.0, 4.0, 0.0), Vec3::repeat(0.5));
        assert!(!frustum.intersects_aabb(&side));
    }
}
