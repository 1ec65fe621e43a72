//! Rigid body ownership for object instances
//!
//! A freshly constructed instance owns its body and collider outright. When
//! the instance is added to the simulation world they move into the engine's
//! sets and the instance keeps only the handles. Teardown removes them again.

use rapier3d::prelude::{Collider, ColliderHandle, RigidBody, RigidBodyHandle};

/// How the simulation treats a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Integrated by the solver under gravity and contact impulses
    Dynamic,
    /// Pose supplied from outside every step; never moved by the solver
    Kinematic,
}

impl BodyKind {
    /// Zero mass selects a kinematic body, anything else is dynamic
    pub fn from_mass(mass: f32) -> Self {
        if mass > 0.0 {
            Self::Dynamic
        } else {
            Self::Kinematic
        }
    }
}

/// Body and collider not yet owned by a world
#[derive(Clone)]
pub struct DetachedBody {
    /// Rigid body
    pub body: RigidBody,
    /// Collider attached to the body when inserted
    pub collider: Collider,
}

/// Engine handles of an inserted body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachedBody {
    /// Rigid body handle
    pub body: RigidBodyHandle,
    /// Collider handle
    pub collider: ColliderHandle,
}

/// Where an instance's body currently lives
pub enum BodySlot {
    /// Owned by the instance, not simulated
    Detached(Box<DetachedBody>),
    /// Owned by the simulation world
    Attached(AttachedBody),
    /// Removed from the world at teardown
    Released,
}

impl BodySlot {
    /// Wrap a freshly built body and collider
    pub fn detached(body: RigidBody, collider: Collider) -> Self {
        Self::Detached(Box::new(DetachedBody { body, collider }))
    }

    /// Engine handles, if the body is in a world
    pub const fn attached(&self) -> Option<AttachedBody> {
        match self {
            Self::Attached(handles) => Some(*handles),
            _ => None,
        }
    }

    /// Whether the body is in a world
    pub const fn is_attached(&self) -> bool {
        matches!(self, Self::Attached(_))
    }
}

impl std::fmt::Debug for BodySlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Detached(_) => f.write_str("Detached"),
            Self::Attached(handles) => f.debug_tuple("Attached").field(handles).finish(),
            Self::Released => f.write_str("Released"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_mass() {
        assert_eq!(BodyKind::from_mass(0.0), BodyKind::Kinematic);
        assert_eq!(BodyKind::from_mass(1.0), BodyKind::Dynamic);
    }
}
