//! Math utilities and types
//!
//! Provides the nalgebra aliases shared by the render side (4x4 matrices) and
//! the physics side (isometries), plus conversions between the two.

pub use nalgebra::{
    Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Rigid pose (rotation + translation) as used by the physics engine
pub type Isometry = nalgebra::Isometry3<f32>;

/// Decomposed affine transform: position, rotation and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Decompose an affine matrix into position, rotation and scale.
    ///
    /// Degenerate (zero-length) basis columns keep a unit scale so the
    /// rotation extraction never divides by zero.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let position = translation_of(matrix);

        let column_scale = |x: f32, y: f32, z: f32| {
            let length = Vec3::new(x, y, z).magnitude();
            if length > f32::EPSILON { length } else { 1.0 }
        };
        let scale_x = column_scale(matrix.m11, matrix.m21, matrix.m31);
        let scale_y = column_scale(matrix.m12, matrix.m22, matrix.m32);
        let scale_z = column_scale(matrix.m13, matrix.m23, matrix.m33);

        let rotation_matrix = Mat3::new(
            matrix.m11 / scale_x, matrix.m12 / scale_y, matrix.m13 / scale_z,
            matrix.m21 / scale_x, matrix.m22 / scale_y, matrix.m23 / scale_z,
            matrix.m31 / scale_x, matrix.m32 / scale_y, matrix.m33 / scale_z,
        );

        Self {
            position,
            rotation: Quat::from_matrix(&rotation_matrix),
            scale: Vec3::new(scale_x, scale_y, scale_z),
        }
    }

    /// Rigid part of this transform (scale is discarded)
    pub fn to_isometry(&self) -> Isometry {
        Isometry::from_parts(self.position.into(), self.rotation)
    }
}

/// Translation column of an affine matrix
pub fn translation_of(matrix: &Mat4) -> Vec3 {
    Vec3::new(matrix.m14, matrix.m24, matrix.m34)
}

/// Overwrite the translation column of an affine matrix, keeping its basis
pub fn set_translation(matrix: &mut Mat4, translation: Vec3) {
    matrix.m14 = translation.x;
    matrix.m24 = translation.y;
    matrix.m34 = translation.z;
}

/// Render matrix -> physics pose
pub fn matrix_to_isometry(matrix: &Mat4) -> Isometry {
    Transform::from_matrix(matrix).to_isometry()
}

/// Physics pose -> render matrix
pub fn isometry_to_matrix(pose: &Isometry) -> Mat4 {
    pose.to_homogeneous()
}

/// Rotation from yaw/pitch/roll given in degrees (yaw about Y, pitch about X, roll about Z)
pub fn rotation_from_euler_degrees(yaw: f32, pitch: f32, roll: f32) -> Quat {
    Quat::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(yaw))
        * Quat::from_axis_angle(&Vec3::x_axis(), utils::deg_to_rad(pitch))
        * Quat::from_axis_angle(&Vec3::z_axis(), utils::deg_to_rad(roll))
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Sine of an angle given in degrees
    pub fn sin_deg(degrees: f32) -> f32 {
        deg_to_rad(degrees).sin()
    }
}

/// Extension trait for Mat4 with camera helpers
pub trait Mat4Ext {
    /// Create a perspective projection matrix (depth mapped to [0, 1])
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Axis flip from Y-up view space to Y-down, Z-forward clip conventions
    fn vulkan_coordinate_transform() -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = far / (far - near);
        result[(2, 3)] = -(near * far) / (far - near);
        result[(3, 2)] = 1.0;
        result
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalize();
        let right = forward.cross(&up).normalize();
        let camera_up = right.cross(&forward);

        let translation = Mat4::new(
            1.0, 0.0, 0.0, -eye.x,
            0.0, 1.0, 0.0, -eye.y,
            0.0, 0.0, 1.0, -eye.z,
            0.0, 0.0, 0.0, 1.0,
        );

        let rotation = Mat4::new(
            right.x, right.y, right.z, 0.0,
            camera_up.x, camera_up.y, camera_up.z, 0.0,
            -forward.x, -forward.y, -forward.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        rotation * translation
    }

    fn vulkan_coordinate_transform() -> Mat4 {
        Mat4::new(
            1.0,  0.0,  0.0, 0.0,
            0.0, -1.0,  0.0, 0.0,
            0.0,  0.0, -1.0, 0.0,
            0.0,  0.0,  0.0, 1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_matrix_isometry_roundtrip_keeps_pose() {
        let rotation = rotation_from_euler_degrees(30.0, 45.0, 60.0);
        let position = Vec3::new(1.0, 9.0, -2.0);
        let matrix = Transform::from_position_rotation(position, rotation).to_matrix();

        let pose = matrix_to_isometry(&matrix);
        assert_relative_eq!(pose.translation.vector, position, epsilon = 1e-5);
        assert_relative_eq!(isometry_to_matrix(&pose), matrix, epsilon = 1e-5);
    }

    #[test]
    fn test_set_translation_keeps_rotation() {
        let rotation = rotation_from_euler_degrees(90.0, 0.0, 0.0);
        let mut matrix = rotation.to_homogeneous();
        set_translation(&mut matrix, Vec3::new(0.0, 2.5, 0.0));

        assert_relative_eq!(translation_of(&matrix), Vec3::new(0.0, 2.5, 0.0));
        assert_relative_eq!(matrix.m11, rotation.to_homogeneous().m11);
    }

    #[test]
    fn test_sin_deg() {
        assert_relative_eq!(utils::sin_deg(90.0), 1.0, epsilon = 1e-6);
        assert_relative_eq!(utils::sin_deg(0.0), 0.0);
    }
}
