//! Append-only store of live object instances
//!
//! Identities are positions in insertion order and are never reused during a
//! session. Removing or reordering entries would break contact lookups, so the
//! only way out is [`InstanceRegistry::drain`] at teardown.

use super::instance::{InstanceId, ObjectInstance};

/// Ordered collection of every live instance
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    instances: Vec<ObjectInstance>,
}

impl InstanceRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity the next insertion will receive
    pub fn next_id(&self) -> InstanceId {
        InstanceId::new(self.instances.len() as u32)
    }

    /// Append an instance and return its identity (the previous length)
    pub fn insert(&mut self, mut instance: ObjectInstance) -> InstanceId {
        let identity = self.next_id();
        instance.assign_identity(identity);
        self.instances.push(instance);
        identity
    }

    /// Look an instance up; unknown or stale identities yield `None`
    pub fn get(&self, identity: InstanceId) -> Option<&ObjectInstance> {
        self.instances.get(identity.index())
    }

    /// Mutable lookup; unknown or stale identities yield `None`
    pub fn get_mut(&mut self, identity: InstanceId) -> Option<&mut ObjectInstance> {
        self.instances.get_mut(identity.index())
    }

    /// Instances in identity order
    pub fn iter(&self) -> impl Iterator<Item = &ObjectInstance> {
        self.instances.iter()
    }

    /// Mutable instances in identity order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ObjectInstance> {
        self.instances.iter_mut()
    }

    /// Number of instances
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Remove every instance for teardown, newest first
    pub fn drain(&mut self) -> impl Iterator<Item = ObjectInstance> + '_ {
        self.instances.drain(..).rev()
    }
}
