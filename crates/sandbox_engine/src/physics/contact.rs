//! Contact reporting and the highlight response
//!
//! The world reports qualifying contacts to a [`ContactListener`] from inside
//! [`SimulationWorld::step`](super::world::SimulationWorld::step). The stock
//! listener, [`ContactResponse`], only queues what it hears; the visual change
//! is applied by [`ContactResponse::flush`] once the step has returned.

use crate::objects::{InstanceId, InstanceRegistry, Material};

/// One side of a reported contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactParty {
    /// Identity stored on the collider
    pub identity: InstanceId,
    /// Sub-shape of the collider involved (0 for simple shapes)
    pub part: u32,
    /// Contact manifold index within the colliding pair
    pub index: u32,
    /// Whether this side's callback filter accepted the other side's flag
    pub matched: bool,
}

/// Receives contact reports during a simulation step
pub trait ContactListener {
    /// Called once per qualifying contact manifold per executed sub-step
    ///
    /// The return value is informational: contacts are never suppressed.
    fn on_contact_added(&mut self, a: ContactParty, b: ContactParty) -> bool;
}

impl<F> ContactListener for F
where
    F: FnMut(ContactParty, ContactParty) -> bool,
{
    fn on_contact_added(&mut self, a: ContactParty, b: ContactParty) -> bool {
        self(a, b)
    }
}

/// Highlights instances that touched the ground
#[derive(Debug)]
pub struct ContactResponse {
    highlight: [f32; 3],
    pending: Vec<InstanceId>,
    total_reports: u64,
}

impl Default for ContactResponse {
    fn default() -> Self {
        Self::new(Material::HIGHLIGHT)
    }
}

impl ContactResponse {
    /// Response painting matched instances with `highlight`
    pub const fn new(highlight: [f32; 3]) -> Self {
        Self {
            highlight,
            pending: Vec::new(),
            total_reports: 0,
        }
    }

    /// Queued highlight changes not yet applied
    pub fn pending(&self) -> &[InstanceId] {
        &self.pending
    }

    /// Contact reports received since creation
    pub const fn total_reports(&self) -> u64 {
        self.total_reports
    }

    /// Apply queued highlight changes, returning how many instances were painted
    ///
    /// Identities the registry cannot resolve are skipped.
    pub fn flush(&mut self, registry: &mut InstanceRegistry) -> usize {
        let mut applied = 0;
        for identity in self.pending.drain(..) {
            match registry.get_mut(identity) {
                Some(instance) => {
                    instance.set_diffuse(self.highlight);
                    applied += 1;
                }
                None => log::debug!("Skipping contact highlight for stale instance {}", identity),
            }
        }
        applied
    }
}

impl ContactListener for ContactResponse {
    fn on_contact_added(&mut self, a: ContactParty, b: ContactParty) -> bool {
        self.total_reports += 1;
        for party in [a, b] {
            if party.matched {
                self.pending.push(party.identity);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::objects::{MeshData, TemplateRegistry};
    use crate::physics::shape::CollisionShape;

    fn party(identity: u32, matched: bool) -> ContactParty {
        ContactParty {
            identity: InstanceId::new(identity),
            part: 0,
            index: 0,
            matched,
        }
    }

    fn registry_with(count: usize) -> InstanceRegistry {
        let mut templates = TemplateRegistry::new();
        let mesh = MeshData::new("ball", vec![Vec3::repeat(-0.5), Vec3::repeat(0.5)]).shared();
        templates
            .register("ball", mesh, CollisionShape::sphere(0.5), 1.0, Material::diffuse(0.0, 1.0, 0.0))
            .unwrap();

        let mut registry = InstanceRegistry::new();
        for _ in 0..count {
            registry.insert(templates.construct("ball").unwrap());
        }
        registry
    }

    #[test]
    fn test_only_matched_sides_are_painted() {
        let mut registry = registry_with(2);
        let mut response = ContactResponse::default();

        assert!(response.on_contact_added(party(0, false), party(1, true)));
        assert_eq!(response.pending(), &[InstanceId::new(1)]);

        assert_eq!(response.flush(&mut registry), 1);
        assert_eq!(registry.get(InstanceId::new(0)).unwrap().material().diffuse, [0.0, 1.0, 0.0]);
        assert!(registry.get(InstanceId::new(1)).unwrap().material().is_highlighted());
    }

    #[test]
    fn test_stale_identity_is_skipped() {
        let mut registry = registry_with(1);
        let mut response = ContactResponse::default();

        response.on_contact_added(party(0, true), party(17, true));

        assert_eq!(response.flush(&mut registry), 1);
        assert!(response.pending().is_empty());
        assert!(registry.get(InstanceId::new(0)).unwrap().material().is_highlighted());
    }

    #[test]
    fn test_highlight_persists_after_unmatched_contact() {
        let mut registry = registry_with(2);
        let mut response = ContactResponse::default();

        response.on_contact_added(party(0, false), party(1, true));
        response.flush(&mut registry);

        // A later object-object style report with no matched side changes nothing.
        response.on_contact_added(party(1, false), party(0, false));
        assert_eq!(response.flush(&mut registry), 0);
        assert!(registry.get(InstanceId::new(1)).unwrap().material().is_highlighted());

        // Repeated contacts repaint the same color.
        response.on_contact_added(party(0, false), party(1, true));
        response.flush(&mut registry);
        assert!(registry.get(InstanceId::new(1)).unwrap().material().is_highlighted());
        assert_eq!(response.total_reports(), 3);
    }
}
