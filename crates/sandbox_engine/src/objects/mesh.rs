//! Shared mesh geometry
//!
//! Only vertex positions are kept: the core needs them to derive bounding
//! volumes. Everything else about a mesh belongs to the external renderer,
//! which identifies meshes by name.

use std::sync::Arc;

use crate::foundation::math::Vec3;

/// Model-space geometry shared by every instance built from one template
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// Name the renderer knows this mesh by
    pub name: String,
    /// Vertex positions in model space
    pub positions: Vec<Vec3>,
}

/// Reference-counted mesh handle
pub type MeshRef = Arc<MeshData>;

impl MeshData {
    /// Create mesh data from a name and model-space positions
    pub fn new(name: impl Into<String>, positions: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            positions,
        }
    }

    /// Wrap into a shared handle
    pub fn shared(self) -> MeshRef {
        Arc::new(self)
    }

    /// Axis-aligned bounds as (min, max); an empty mesh has zero-size bounds at the origin
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut iter = self.positions.iter();
        let Some(first) = iter.next() else {
            return (Vec3::zeros(), Vec3::zeros());
        };

        iter.fold((*first, *first), |(min, max), p| (min.inf(p), max.sup(p)))
    }

    /// Center and half extents of the axis-aligned bounds
    pub fn center_and_half_extents(&self) -> (Vec3, Vec3) {
        let (min, max) = self.bounds();
        ((min + max) * 0.5, (max - min) * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_of_offset_points() {
        let mesh = MeshData::new(
            "test",
            vec![Vec3::new(1.0, -2.0, 0.0), Vec3::new(3.0, 2.0, 4.0), Vec3::new(2.0, 0.0, 1.0)],
        );

        let (center, half) = mesh.center_and_half_extents();
        assert_eq!(center, Vec3::new(2.0, 0.0, 2.0));
        assert_eq!(half, Vec3::new(1.0, 2.0, 2.0));
    }

    #[test]
    fn test_empty_mesh_has_degenerate_bounds() {
        let mesh = MeshData::new("empty", Vec::new());
        assert_eq!(mesh.center_and_half_extents(), (Vec3::zeros(), Vec3::zeros()));
    }
}
