//! Shape templates: reusable (shape, mass, mesh) triples
//!
//! The registry is ordered. Index 0 holds the ground template and is never
//! picked by the spawner; every later entry is spawnable.

use std::collections::HashMap;

use rapier3d::prelude::{ColliderBuilder, MassProperties, RigidBodyBuilder, SharedShape};
use thiserror::Error;

use crate::foundation::math::{Point3, Vec3};
use crate::physics::body::{BodyKind, BodySlot};
use crate::physics::shape::CollisionShape;

use super::instance::ObjectInstance;
use super::material::Material;
use super::mesh::MeshRef;

/// Template registration and lookup failures
///
/// These signal a mistake in content setup and are fatal to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A template with this name already exists
    #[error("template '{0}' is already registered")]
    Duplicate(String),

    /// No template with this name
    #[error("unknown template '{0}'")]
    Unknown(String),

    /// Index lookup past the end of the registry
    #[error("template index {index} out of range (registry holds {len})")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of registered templates
        len: usize,
    },

    /// Nothing besides the reserved ground template is registered
    #[error("no spawnable templates registered")]
    NoSpawnable,
}

/// An immutable recipe for object instances
#[derive(Clone)]
pub struct ShapeTemplate {
    name: String,
    shape: CollisionShape,
    shared_shape: SharedShape,
    mass: f32,
    mesh: MeshRef,
    material: Material,
}

impl ShapeTemplate {
    /// Template name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Collision shape descriptor
    pub const fn shape(&self) -> &CollisionShape {
        &self.shape
    }

    /// Mass given to constructed bodies
    pub const fn mass(&self) -> f32 {
        self.mass
    }

    /// Shared mesh
    pub const fn mesh(&self) -> &MeshRef {
        &self.mesh
    }

    /// Material each instance starts with
    pub const fn material(&self) -> &Material {
        &self.material
    }

    /// Build a new, independent instance
    fn instantiate(&self) -> ObjectInstance {
        let kind = BodyKind::from_mass(self.mass);
        let mass = self.mass.max(0.0);
        let local_inertia: Vec3 = self.shape.local_inertia(&self.shared_shape, mass);

        let body = match kind {
            BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
            BodyKind::Kinematic => RigidBodyBuilder::kinematic_position_based().can_sleep(false),
        }
        .build();

        let collider = ColliderBuilder::new(self.shared_shape.clone())
            .mass_properties(MassProperties::new(Point3::origin(), mass, local_inertia))
            .build();

        ObjectInstance::new(
            &self.name,
            kind,
            mass,
            local_inertia,
            MeshRef::clone(&self.mesh),
            self.material,
            BodySlot::detached(body, collider),
        )
    }
}

impl std::fmt::Debug for ShapeTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeTemplate")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("mass", &self.mass)
            .field("mesh", &self.mesh.name)
            .field("material", &self.material)
            .finish_non_exhaustive()
    }
}

/// Named, ordered catalog of shape templates
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: Vec<ShapeTemplate>,
    by_name: HashMap<String, usize>,
}

impl TemplateRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under a unique name
    pub fn register(
        &mut self,
        name: &str,
        mesh: MeshRef,
        shape: CollisionShape,
        mass: f32,
        material: Material,
    ) -> Result<(), TemplateError> {
        if self.by_name.contains_key(name) {
            return Err(TemplateError::Duplicate(name.to_string()));
        }

        log::debug!("Registered template '{}' ({:?}, mass {})", name, shape, mass);
        self.by_name.insert(name.to_string(), self.templates.len());
        self.templates.push(ShapeTemplate {
            name: name.to_string(),
            shared_shape: shape.to_shared_shape(),
            shape,
            mass,
            mesh,
            material,
        });
        Ok(())
    }

    /// Look a template up by name
    pub fn get(&self, name: &str) -> Option<&ShapeTemplate> {
        self.by_name.get(name).map(|&index| &self.templates[index])
    }

    /// Build a fresh instance from the named template
    pub fn construct(&self, name: &str) -> Result<ObjectInstance, TemplateError> {
        self.get(name)
            .map(ShapeTemplate::instantiate)
            .ok_or_else(|| TemplateError::Unknown(name.to_string()))
    }

    /// Build a fresh instance from the template at `index`
    pub fn construct_at(&self, index: usize) -> Result<ObjectInstance, TemplateError> {
        self.templates
            .get(index)
            .map(ShapeTemplate::instantiate)
            .ok_or(TemplateError::IndexOutOfRange {
                index,
                len: self.templates.len(),
            })
    }

    /// Number of templates the spawner may pick from (all but index 0)
    pub fn spawnable_count(&self) -> usize {
        self.templates.len().saturating_sub(1)
    }

    /// Template names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.name.as_str())
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether no template is registered
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Drop every template, releasing the shared shapes and meshes
    pub fn clear(&mut self) -> usize {
        let count = self.templates.len();
        self.templates.clear();
        self.by_name.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::mesh::MeshData;

    fn cube_mesh(size: f32) -> MeshRef {
        let h = size * 0.5;
        MeshData::new("cube", vec![Vec3::new(-h, -h, -h), Vec3::new(h, h, h)]).shared()
    }

    fn registry() -> TemplateRegistry {
        let mut registry = TemplateRegistry::new();
        registry
            .register("ground", cube_mesh(5.0), CollisionShape::cuboid(5.0, 1.0, 5.0), 0.0, Material::diffuse(1.0, 0.0, 0.0))
            .unwrap();
        registry
            .register("box", cube_mesh(1.0), CollisionShape::cuboid(1.0, 1.0, 1.0), 1.0, Material::diffuse(0.0, 0.0, 1.0))
            .unwrap();
        registry
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = registry();
        let result = registry.register("box", cube_mesh(1.0), CollisionShape::sphere(0.5), 1.0, Material::default());

        assert_eq!(result, Err(TemplateError::Duplicate("box".to_string())));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unknown_name_rejected() {
        let registry = registry();
        assert!(matches!(registry.construct("teapot"), Err(TemplateError::Unknown(name)) if name == "teapot"));
        assert!(matches!(registry.construct_at(7), Err(TemplateError::IndexOutOfRange { index: 7, len: 2 })));
    }

    #[test]
    fn test_bounds_come_from_mesh() {
        let mut registry = TemplateRegistry::new();
        let mesh = MeshData::new("offset", vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0)]).shared();
        registry
            .register("offset", mesh, CollisionShape::cuboid(2.0, 4.0, 6.0), 1.0, Material::default())
            .unwrap();

        let instance = registry.construct("offset").unwrap();
        assert_eq!(instance.bounding_center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(instance.bounding_extents(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_zero_mass_builds_kinematic_body() {
        let registry = registry();
        let ground = registry.construct("ground").unwrap();

        assert_eq!(ground.kind(), BodyKind::Kinematic);
        assert_eq!(ground.local_inertia(), Vec3::zeros());
        assert_eq!(registry.construct("box").unwrap().kind(), BodyKind::Dynamic);
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let registry = registry();
        let mut first = registry.construct("box").unwrap();
        let second = registry.construct("box").unwrap();

        first.set_diffuse(Material::HIGHLIGHT);
        first.set_transform(crate::foundation::math::Mat4::new_translation(&Vec3::new(0.0, 9.0, 0.0)));

        assert_eq!(second.material().diffuse, [0.0, 0.0, 1.0]);
        assert_eq!(second.translation(), Vec3::zeros());
        assert!(MeshRef::ptr_eq(first.mesh(), second.mesh()));
    }

    #[test]
    fn test_spawnable_count_excludes_ground() {
        let mut registry = registry();
        assert_eq!(registry.spawnable_count(), 1);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["ground", "box"]);

        assert_eq!(registry.clear(), 2);
        assert_eq!(registry.spawnable_count(), 0);
    }
}
