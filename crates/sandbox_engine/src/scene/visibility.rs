//! Per-frame visibility pass and the renderer input it produces

use crate::foundation::math::Mat4;
use crate::objects::{InstanceId, InstanceRegistry, Material, MeshRef, ObjectInstance};

use super::bounds::Frustum;
use super::camera::Camera;

/// Whether any part of the instance's cached bounds lies in the frustum
pub fn is_visible(instance: &ObjectInstance, frustum: &Frustum) -> bool {
    frustum.intersects_aabb(&instance.world_bounds())
}

/// One instance submitted for drawing
#[derive(Debug, Clone)]
pub struct RenderItem {
    /// Instance this item was produced from
    pub identity: InstanceId,
    /// Model matrix
    pub transform: Mat4,
    /// Shared mesh
    pub mesh: MeshRef,
    /// Material at the time of the pass
    pub material: Material,
}

/// Everything the renderer consumes for one frame
#[derive(Debug, Clone)]
pub struct RenderList {
    /// Camera view-projection matrix
    pub view_projection: Mat4,
    /// Visible instances in identity order
    pub items: Vec<RenderItem>,
}

impl RenderList {
    /// Number of submitted instances
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is visible
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Evaluate visibility for every registered instance
pub fn collect_visible(registry: &InstanceRegistry, camera: &Camera) -> RenderList {
    let view_projection = camera.view_projection_matrix();
    let frustum = Frustum::from_matrix(&view_projection);

    let items = registry
        .iter()
        .filter(|instance| is_visible(instance, &frustum))
        .filter_map(|instance| {
            instance.identity().map(|identity| RenderItem {
                identity,
                transform: instance.transform(),
                mesh: MeshRef::clone(instance.mesh()),
                material: *instance.material(),
            })
        })
        .collect();

    RenderList { view_projection, items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::objects::{MeshData, TemplateRegistry};
    use crate::physics::shape::CollisionShape;

    fn templates() -> TemplateRegistry {
        let mut templates = TemplateRegistry::new();
        let centered = MeshData::new("box", vec![Vec3::repeat(-0.5), Vec3::repeat(0.5)]).shared();
        let offset = MeshData::new("far", vec![Vec3::new(299.5, -0.5, -0.5), Vec3::new(300.5, 0.5, 0.5)]).shared();
        templates
            .register("box", centered, CollisionShape::cuboid(1.0, 1.0, 1.0), 1.0, Material::default())
            .unwrap();
        templates
            .register("far", offset, CollisionShape::cuboid(1.0, 1.0, 1.0), 1.0, Material::default())
            .unwrap();
        templates
    }

    fn at(templates: &TemplateRegistry, name: &str, position: Vec3) -> ObjectInstance {
        let mut instance = templates.construct(name).unwrap();
        instance.set_transform(Mat4::new_translation(&position));
        instance
    }

    #[test]
    fn test_visibility_follows_translation() {
        let templates = templates();
        let frustum = Camera::default().frustum();

        assert!(is_visible(&at(&templates, "box", Vec3::new(0.0, 4.0, 0.0)), &frustum));
        assert!(!is_visible(&at(&templates, "box", Vec3::new(200.0, 4.0, 0.0)), &frustum));
    }

    #[test]
    fn test_visibility_uses_bounding_center() {
        let templates = templates();
        let frustum = Camera::default().frustum();

        // Transform origin is in view but the mesh itself sits far to the side.
        let instance = at(&templates, "far", Vec3::new(0.0, 4.0, 0.0));
        assert!(!is_visible(&instance, &frustum));
    }

    #[test]
    fn test_collect_visible_keeps_identity_order() {
        let templates = templates();
        let mut registry = InstanceRegistry::new();
        registry.insert(at(&templates, "box", Vec3::new(0.0, 4.0, 0.0)));
        registry.insert(at(&templates, "box", Vec3::new(-500.0, 0.0, 0.0)));
        registry.insert(at(&templates, "box", Vec3::new(1.0, 2.0, 0.0)));

        let camera = Camera::default();
        let list = collect_visible(&registry, &camera);

        let ids: Vec<u32> = list.items.iter().map(|item| item.identity.raw()).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(list.view_projection, camera.view_projection_matrix());
    }
}
