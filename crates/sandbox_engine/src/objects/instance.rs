//! Live objects: a render transform, a rigid body and cached bounds

use std::fmt;

use crate::foundation::math::{Mat4, Vec3};
use crate::physics::body::{BodyKind, BodySlot};
use crate::physics::motion_state::{InstanceMotionState, MotionState};
use crate::scene::bounds::Aabb;

use super::material::Material;
use super::mesh::MeshRef;

/// Stable handle of an object instance
///
/// Equal to the instance's insertion position in the
/// [`InstanceRegistry`](super::registry::InstanceRegistry). The same value is
/// stored as the collider's user data, so contact reports resolve straight
/// back to the instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u32);

impl InstanceId {
    /// Handle from a raw registry index
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Registry index
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw value
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Encoding stored in engine user data
    pub const fn to_user_data(self) -> u128 {
        self.0 as u128
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One simulated, renderable object
///
/// Built by [`TemplateRegistry::construct`](super::template::TemplateRegistry::construct).
/// Owns its body (until the world takes it), its motion-state bridge and its
/// material; shares mesh and collision geometry with its template.
#[derive(Debug)]
pub struct ObjectInstance {
    identity: Option<InstanceId>,
    template: String,
    kind: BodyKind,
    mass: f32,
    local_inertia: Vec3,
    motion_state: InstanceMotionState,
    bounding_center: Vec3,
    bounding_extents: Vec3,
    mesh: MeshRef,
    material: Material,
    pub(crate) body: BodySlot,
}

impl ObjectInstance {
    pub(crate) fn new(
        template: &str,
        kind: BodyKind,
        mass: f32,
        local_inertia: Vec3,
        mesh: MeshRef,
        material: Material,
        body: BodySlot,
    ) -> Self {
        let (bounding_center, bounding_extents) = mesh.center_and_half_extents();
        Self {
            identity: None,
            template: template.to_string(),
            kind,
            mass,
            local_inertia,
            motion_state: InstanceMotionState::default(),
            bounding_center,
            bounding_extents,
            mesh,
            material,
            body,
        }
    }

    /// Handle assigned by the registry, `None` until inserted
    pub const fn identity(&self) -> Option<InstanceId> {
        self.identity
    }

    pub(crate) fn assign_identity(&mut self, identity: InstanceId) {
        self.identity = Some(identity);
    }

    /// Name of the template this instance was built from
    pub fn template_name(&self) -> &str {
        &self.template
    }

    /// Dynamic or kinematic
    pub const fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Body mass
    pub const fn mass(&self) -> f32 {
        self.mass
    }

    /// Principal moments of inertia computed at construction
    pub const fn local_inertia(&self) -> Vec3 {
        self.local_inertia
    }

    /// Current render transform
    pub fn transform(&self) -> Mat4 {
        self.motion_state.world_transform()
    }

    /// Translation of the render transform
    pub fn translation(&self) -> Vec3 {
        self.motion_state.translation()
    }

    /// Overwrite the render transform
    ///
    /// For a body that is not in a world yet this also becomes its initial
    /// pose when it is added. Kinematic bodies pick it up on the next drive.
    pub fn set_transform(&mut self, transform: Mat4) {
        self.motion_state.set_world_transform(transform);
    }

    /// Motion-state bridge
    pub const fn motion_state(&self) -> &InstanceMotionState {
        &self.motion_state
    }

    /// Motion-state bridge, mutably
    pub fn motion_state_mut(&mut self) -> &mut InstanceMotionState {
        &mut self.motion_state
    }

    /// Center of the mesh bounds, relative to the transform origin
    pub const fn bounding_center(&self) -> Vec3 {
        self.bounding_center
    }

    /// Half extents of the mesh bounds
    pub const fn bounding_extents(&self) -> Vec3 {
        self.bounding_extents
    }

    /// World-space box used for visibility: cached bounds moved by the current translation
    pub fn world_bounds(&self) -> Aabb {
        Aabb::from_center_extents(self.translation() + self.bounding_center, self.bounding_extents)
    }

    /// Shared mesh
    pub const fn mesh(&self) -> &MeshRef {
        &self.mesh
    }

    /// This instance's material
    pub const fn material(&self) -> &Material {
        &self.material
    }

    /// Replace the diffuse color
    pub fn set_diffuse(&mut self, diffuse: [f32; 3]) {
        self.material.diffuse = diffuse;
    }

    /// Whether the body currently lives in a simulation world
    pub const fn is_simulated(&self) -> bool {
        self.body.is_attached()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_data_and_display() {
        let id = InstanceId::new(42);
        assert_eq!(id.to_user_data(), 42);
        assert_eq!(id.to_string(), "#42");
    }
}
