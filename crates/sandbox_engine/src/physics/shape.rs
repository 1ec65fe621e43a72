//! Collision shape descriptors
//!
//! Shapes are stored as plain descriptors in model space and turned into a
//! shared engine shape once, when a template is registered. Every body built
//! from the template clones the `SharedShape` handle (reference counted), so
//! the geometry itself outlives all instances constructed from it.

use rapier3d::prelude::SharedShape;

use crate::foundation::math::Vec3;

/// Collision shape types (stored in MODEL SPACE, centered on the origin)
///
/// Upright shapes (cone, capsule, cylinder) are aligned with the local Y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionShape {
    /// Axis-aligned box given by its half extents
    Box {
        /// Half extents along X, Y and Z
        half_extents: Vec3,
    },
    /// Sphere
    Sphere {
        /// Radius
        radius: f32,
    },
    /// Cone with its apex pointing up
    Cone {
        /// Base radius
        radius: f32,
        /// Total height, base to apex
        height: f32,
    },
    /// Capsule: a cylinder capped by two hemispheres
    Capsule {
        /// Radius of the caps and the cylinder
        radius: f32,
        /// Height of the cylindrical section only
        cylinder_height: f32,
    },
    /// Cylinder
    Cylinder {
        /// Radius
        radius: f32,
        /// Total height
        height: f32,
    },
}

impl CollisionShape {
    /// Box from full dimensions
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Box {
            half_extents: Vec3::new(width, height, depth) * 0.5,
        }
    }

    /// Sphere from its radius
    pub const fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Cone from base radius and height
    pub const fn cone(radius: f32, height: f32) -> Self {
        Self::Cone { radius, height }
    }

    /// Capsule from radius and the height of its cylindrical section
    pub const fn capsule(radius: f32, cylinder_height: f32) -> Self {
        Self::Capsule { radius, cylinder_height }
    }

    /// Cylinder from radius and total height
    pub const fn cylinder(radius: f32, height: f32) -> Self {
        Self::Cylinder { radius, height }
    }

    /// Build the engine-side shape
    pub fn to_shared_shape(&self) -> SharedShape {
        match *self {
            Self::Box { half_extents } => SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z),
            Self::Sphere { radius } => SharedShape::ball(radius),
            Self::Cone { radius, height } => SharedShape::cone(height * 0.5, radius),
            Self::Capsule { radius, cylinder_height } => SharedShape::capsule_y(cylinder_height * 0.5, radius),
            Self::Cylinder { radius, height } => SharedShape::cylinder(height * 0.5, radius),
        }
    }

    /// Half extents of the shape's local axis-aligned bounds
    pub fn local_half_extents(&self) -> Vec3 {
        match *self {
            Self::Box { half_extents } => half_extents,
            Self::Sphere { radius } => Vec3::repeat(radius),
            Self::Cone { radius, height } | Self::Cylinder { radius, height } => {
                Vec3::new(radius, height * 0.5, radius)
            }
            Self::Capsule { radius, cylinder_height } => {
                Vec3::new(radius, cylinder_height * 0.5 + radius, radius)
            }
        }
    }

    /// Principal moments of inertia for a body of the given mass
    ///
    /// Zero (or negative) mass yields a zero vector: such bodies are static
    /// or kinematic and never rotate under contact impulses.
    pub fn local_inertia(&self, shape: &SharedShape, mass: f32) -> Vec3 {
        if mass <= 0.0 {
            return Vec3::zeros();
        }

        // Inertia scales linearly with mass at uniform density.
        let unit = shape.mass_properties(1.0);
        let unit_mass = unit.mass();
        if unit_mass <= f32::EPSILON {
            return Vec3::zeros();
        }
        unit.principal_inertia() * (mass / unit_mass)
    }
}
