//! Default scene content
//!
//! Builds the stock shape templates: a 5x1x5 ground slab and five unit-sized
//! falling shapes. Meshes carry vertex positions only, tessellated just
//! finely enough for their bounds to match what a renderer would draw.

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::foundation::math::Vec3;
use crate::objects::{Material, MeshData, TemplateError, TemplateRegistry};
use crate::physics::CollisionShape;

/// Name of the reserved ground template (always registered first)
pub const GROUND: &str = "ground";

/// Segments around the axis of round meshes
const DIVISIONS: u32 = 10;

/// Axis-aligned box centered on the origin
pub fn box_mesh(name: &str, width: f32, height: f32, depth: f32) -> MeshData {
    let half = Vec3::new(width, height, depth) * 0.5;
    let positions = (0..8)
        .map(|corner| {
            Vec3::new(
                if corner & 1 == 0 { -half.x } else { half.x },
                if corner & 2 == 0 { -half.y } else { half.y },
                if corner & 4 == 0 { -half.z } else { half.z },
            )
        })
        .collect();
    MeshData::new(name, positions)
}

/// Horizontal ring of `DIVISIONS` points at height `y`
fn ring(radius: f32, y: f32) -> impl Iterator<Item = Vec3> {
    (0..DIVISIONS).map(move |i| {
        let angle = TAU * i as f32 / DIVISIONS as f32;
        Vec3::new(radius * angle.cos(), y, radius * angle.sin())
    })
}

/// UV sphere
pub fn sphere_mesh(name: &str, radius: f32) -> MeshData {
    let mut positions = Vec::new();
    for j in 0..=DIVISIONS {
        let latitude = -FRAC_PI_2 + std::f32::consts::PI * j as f32 / DIVISIONS as f32;
        positions.extend(ring(radius * latitude.cos(), radius * latitude.sin()));
    }
    MeshData::new(name, positions)
}

/// Cone with its base at `-height / 2` and apex at `+height / 2`
pub fn cone_mesh(name: &str, radius: f32, height: f32) -> MeshData {
    let half = height * 0.5;
    let mut positions: Vec<Vec3> = ring(radius, -half).collect();
    positions.push(Vec3::new(0.0, -half, 0.0));
    positions.push(Vec3::new(0.0, half, 0.0));
    MeshData::new(name, positions)
}

/// Closed cylinder along Y
pub fn cylinder_mesh(name: &str, radius: f32, height: f32) -> MeshData {
    let half = height * 0.5;
    let positions = ring(radius, -half).chain(ring(radius, half)).collect();
    MeshData::new(name, positions)
}

/// Capsule along Y; `height` includes both caps
pub fn capsule_mesh(name: &str, radius: f32, height: f32) -> MeshData {
    let cylinder_half = (height * 0.5 - radius).max(0.0);
    let mut positions: Vec<Vec3> = ring(radius, -cylinder_half).chain(ring(radius, cylinder_half)).collect();
    for j in 1..=DIVISIONS / 2 {
        let latitude = std::f32::consts::PI * j as f32 / DIVISIONS as f32;
        let (y, r) = (radius * latitude.sin(), radius * latitude.cos());
        positions.extend(ring(r, cylinder_half + y));
        positions.extend(ring(r, -cylinder_half - y));
    }
    MeshData::new(name, positions)
}

/// Register the stock templates, ground first
pub fn register_defaults(templates: &mut TemplateRegistry) -> Result<(), TemplateError> {
    templates.register(
        GROUND,
        box_mesh(GROUND, 5.0, 1.0, 5.0).shared(),
        CollisionShape::cuboid(5.0, 1.0, 5.0),
        0.0,
        Material::diffuse(1.0, 0.0, 0.0),
    )?;
    templates.register(
        "sphere",
        sphere_mesh("sphere", 0.5).shared(),
        CollisionShape::sphere(0.5),
        1.0,
        Material::diffuse(0.0, 1.0, 0.0),
    )?;
    templates.register(
        "box",
        box_mesh("box", 1.0, 1.0, 1.0).shared(),
        CollisionShape::cuboid(1.0, 1.0, 1.0),
        1.0,
        Material::diffuse(0.0, 0.0, 1.0),
    )?;
    templates.register(
        "cone",
        cone_mesh("cone", 0.5, 2.0).shared(),
        CollisionShape::cone(0.5, 2.0),
        1.0,
        Material::diffuse(1.0, 1.0, 0.0),
    )?;
    templates.register(
        "capsule",
        capsule_mesh("capsule", 0.5, 2.0).shared(),
        CollisionShape::capsule(0.5, 1.0),
        1.0,
        Material::diffuse(0.0, 1.0, 1.0),
    )?;
    templates.register(
        "cylinder",
        cylinder_mesh("cylinder", 0.5, 2.0).shared(),
        CollisionShape::cylinder(0.5, 2.0),
        1.0,
        Material::diffuse(1.0, 0.0, 1.0),
    )?;
    Ok(())
}

/// Fresh registry holding the stock templates
pub fn default_templates() -> Result<TemplateRegistry, TemplateError> {
    let mut templates = TemplateRegistry::new();
    register_defaults(&mut templates)?;
    Ok(templates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::BodyKind;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_templates_order() {
        let templates = default_templates().unwrap();
        let names: Vec<_> = templates.names().collect();

        assert_eq!(names, vec!["ground", "sphere", "box", "cone", "capsule", "cylinder"]);
        assert_eq!(templates.spawnable_count(), 5);
    }

    #[test]
    fn test_registering_defaults_twice_fails() {
        let mut templates = default_templates().unwrap();
        assert_eq!(
            register_defaults(&mut templates),
            Err(TemplateError::Duplicate(GROUND.to_string()))
        );
    }

    #[test]
    fn test_ground_bounds_and_kind() {
        let templates = default_templates().unwrap();
        let ground = templates.construct(GROUND).unwrap();

        assert_eq!(ground.kind(), BodyKind::Kinematic);
        assert_eq!(ground.bounding_center(), Vec3::zeros());
        assert_eq!(ground.bounding_extents(), Vec3::new(2.5, 0.5, 2.5));
    }

    #[test]
    fn test_round_meshes_fit_their_shapes() {
        let templates = default_templates().unwrap();
        for name in ["sphere", "cone", "capsule", "cylinder"] {
            let template = templates.get(name).unwrap();
            let (center, half) = template.mesh().center_and_half_extents();
            let expected = template.shape().local_half_extents();

            assert_relative_eq!(center.y, 0.0, epsilon = 1e-5);
            assert_relative_eq!(half.y, expected.y, epsilon = 1e-5);
            assert_relative_eq!(half.x, expected.x, epsilon = 1e-5);
            assert!(half.z <= expected.z + 1e-5);
            assert_eq!(template.mass(), 1.0);
        }
    }
}
