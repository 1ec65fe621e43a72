//! Bounding volumes and frustum tests for visibility culling

use crate::foundation::math::{Mat4, Vec3, Vec4};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new box from min and max points
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a box centered at a point with given half extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Get the center of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the half extents of the box
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this box contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }
}

/// Plane defined by a unit normal and signed offset from the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normal vector (normalized, pointing into the kept half-space)
    pub normal: Vec3,
    /// Offset along the normal
    pub distance: f32,
}

impl Plane {
    /// Create a plane from a normal and offset, normalizing both
    ///
    /// A zero normal yields a plane that keeps everything.
    pub fn new(normal: Vec3, distance: f32) -> Self {
        let length = normal.magnitude();
        if length > f32::EPSILON {
            Self {
                normal: normal / length,
                distance: distance / length,
            }
        } else {
            Self {
                normal: Vec3::zeros(),
                distance: 0.0,
            }
        }
    }

    /// Plane from homogeneous coefficients `(a, b, c, d)` of `ax + by + cz + d = 0`
    pub fn from_coefficients(coefficients: Vec4) -> Self {
        Self::new(coefficients.xyz(), coefficients.w)
    }

    /// Signed distance from the plane to a point (positive on the kept side)
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) + self.distance
    }
}

/// Six-plane view volume
#[derive(Debug, Clone, PartialEq)]
pub struct Frustum {
    /// Planes in order left, right, bottom, top, near, far; normals point inwards
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Create a frustum from six planes
    pub const fn new(planes: [Plane; 6]) -> Self {
        Self { planes }
    }

    /// Extract the frustum from a view-projection matrix (Gribb-Hartmann)
    ///
    /// Expects clip space with `-w <= x, y <= w` and depth `0 <= z <= w`.
    pub fn from_matrix(view_projection: &Mat4) -> Self {
        let row = |i: usize| -> Vec4 { view_projection.row(i).transpose() };
        let (r1, r2, r3, r4) = (row(0), row(1), row(2), row(3));

        Self::new([
            Plane::from_coefficients(r4 + r1),
            Plane::from_coefficients(r4 - r1),
            Plane::from_coefficients(r4 + r2),
            Plane::from_coefficients(r4 - r2),
            Plane::from_coefficients(r3),
            Plane::from_coefficients(r4 - r3),
        ])
    }

    /// Check if a box is inside or intersects the frustum
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        self.planes.iter().all(|plane| {
            // Corner furthest along the plane normal
            let mut p = aabb.min;
            if plane.normal.x >= 0.0 { p.x = aabb.max.x; }
            if plane.normal.y >= 0.0 { p.y = aabb.max.y; }
            if plane.normal.z >= 0.0 { p.z = aabb.max.z; }

            plane.distance_to_point(p) >= 0.0
        })
    }

    /// Check if a point lies inside the frustum
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.distance_to_point(point) >= 0.0)
    }
}
