//! Motion-state bridge between simulation poses and render transforms
//!
//! The simulation world never owns a render transform. It reads one through
//! [`MotionState::world_transform`] when a body is inserted or force-posed, or
//! when a kinematic body is driven, and writes the integrated pose back through
//! [`MotionState::set_world_transform`] after each step.

use crate::foundation::math::{self, Isometry, Mat4, Vec3};

/// Synchronizes one body's pose with one render transform
pub trait MotionState {
    /// Current render transform, as seen by the simulation
    fn world_transform(&self) -> Mat4;

    /// Store a pose produced by the simulation
    fn set_world_transform(&mut self, transform: Mat4);
}

/// Motion state owning the render transform of a single object instance
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceMotionState {
    transform: Mat4,
}

impl Default for InstanceMotionState {
    fn default() -> Self {
        Self::new(Mat4::identity())
    }
}

impl InstanceMotionState {
    /// Bridge starting at the given transform
    pub const fn new(transform: Mat4) -> Self {
        Self { transform }
    }

    /// Borrow the stored render transform
    pub const fn transform(&self) -> &Mat4 {
        &self.transform
    }

    /// Translation part of the stored transform
    pub fn translation(&self) -> Vec3 {
        math::translation_of(&self.transform)
    }

    /// Stored transform as a rigid pose for the physics engine
    pub fn isometry(&self) -> Isometry {
        math::matrix_to_isometry(&self.transform)
    }

    /// Store a rigid pose coming from the physics engine
    pub fn set_isometry(&mut self, pose: &Isometry) {
        self.set_world_transform(math::isometry_to_matrix(pose));
    }
}

impl MotionState for InstanceMotionState {
    fn world_transform(&self) -> Mat4 {
        self.transform
    }

    fn set_world_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_write_then_read_returns_same_transform() {
        let mut state = InstanceMotionState::default();
        let transform = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));

        state.set_world_transform(transform);

        assert_eq!(state.world_transform(), transform);
        assert_eq!(state.translation(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_isometry_roundtrip() {
        let rotation = math::rotation_from_euler_degrees(10.0, 20.0, 30.0);
        let pose = Isometry::from_parts(Vec3::new(0.5, 9.0, -1.5).into(), rotation);

        let mut state = InstanceMotionState::default();
        state.set_isometry(&pose);

        let back = state.isometry();
        assert_relative_eq!(back.translation.vector, pose.translation.vector, epsilon = 1e-5);
        assert_relative_eq!(back.rotation.angle_to(&pose.rotation), 0.0, epsilon = 1e-3);
    }
}
