//! Rigid-body simulation world
//!
//! Wraps the rapier pipeline (broad phase, narrow phase, island manager and
//! sequential-impulse solver) behind the operations the sandbox needs:
//! inserting instance bodies with collision filtering, driving kinematic
//! bodies from their render transform, fixed sub-step integration and
//! writing integrated poses back through each instance's motion state.
//!
//! ## Stepping
//!
//! `step(delta)` accumulates `delta` and runs whole fixed sub-steps out of the
//! accumulator, carrying the fractional remainder over. At most
//! `max_sub_steps` are executed per call. When more are due, the surplus and
//! the remainder are both dropped, so one call never advances simulated time
//! by more than `max_sub_steps * fixed_sub_step` and a long stall leaves no
//! backlog. Non-finite deltas count as zero.

use std::collections::HashMap;
use std::mem;

use rapier3d::prelude::{
    BroadPhase, CCDSolver, ColliderHandle, ColliderSet, ImpulseJointSet, IntegrationParameters,
    IslandManager, MultibodyJointSet, NarrowPhase, PhysicsPipeline, QueryPipeline, RigidBody, RigidBodySet,
};
use thiserror::Error;

use crate::config::PhysicsConfig;
use crate::foundation::math::Vec3;
use crate::objects::{InstanceId, InstanceRegistry, ObjectInstance};

use super::body::{AttachedBody, BodyKind, BodySlot, DetachedBody};
use super::collision_layers::{BodyFilter, CollisionGroups};
use super::contact::{ContactListener, ContactParty};

/// Slack added before flooring the sub-step count, absorbing f32 rounding
const SUB_STEP_EPSILON: f32 = 1e-4;

/// Simulation world errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// The instance's body is already in a world
    #[error("instance {0} is already simulated")]
    AlreadyAttached(InstanceId),

    /// The instance's body was released at teardown
    #[error("instance {0} has no body left to simulate")]
    BodyReleased(InstanceId),
}

/// Outcome of one [`SimulationWorld::step`] call
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepReport {
    /// Fixed sub-steps executed
    pub sub_steps: u32,
    /// Whole sub-steps discarded because of the per-call cap
    pub dropped_sub_steps: u32,
    /// Simulated seconds advanced by this call
    pub simulated: f32,
    /// Contact reports delivered to the listener
    pub contacts_reported: u32,
}

/// Per-collider data needed while dispatching contacts
#[derive(Debug, Clone, Copy)]
struct ColliderEntry {
    identity: InstanceId,
    filter: BodyFilter,
}

/// Owns every rigid body of the session and advances them in time
pub struct SimulationWorld {
    gravity: Vec3,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,

    entries: HashMap<ColliderHandle, ColliderEntry>,
    handles: HashMap<InstanceId, AttachedBody>,

    max_sub_steps: u32,
    fixed_sub_step: f32,
    local_time: f32,
    simulated_time: f64,
}

impl SimulationWorld {
    /// Create an empty world from physics settings
    pub fn new(config: &PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.fixed_sub_step;

        log::info!(
            "Simulation world: gravity {:?}, {} x {:.4}s sub-steps",
            config.gravity,
            config.max_sub_steps,
            config.fixed_sub_step
        );

        Self {
            gravity: config.gravity_vector(),
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            entries: HashMap::new(),
            handles: HashMap::new(),
            max_sub_steps: config.max_sub_steps,
            fixed_sub_step: config.fixed_sub_step,
            local_time: 0.0,
            simulated_time: 0.0,
        }
    }

    /// Move an instance's body into the world
    ///
    /// The body starts at the pose currently held by the instance's motion
    /// state. `identity` becomes the collider's user value and the key of every
    /// contact report involving it.
    pub fn add_body(
        &mut self,
        instance: &mut ObjectInstance,
        identity: InstanceId,
        filter: BodyFilter,
    ) -> Result<(), WorldError> {
        let detached = match mem::replace(&mut instance.body, BodySlot::Released) {
            BodySlot::Detached(detached) => detached,
            BodySlot::Attached(handles) => {
                instance.body = BodySlot::Attached(handles);
                return Err(WorldError::AlreadyAttached(identity));
            }
            BodySlot::Released => return Err(WorldError::BodyReleased(identity)),
        };
        let DetachedBody { mut body, mut collider } = *detached;

        body.set_position(instance.motion_state().isometry(), true);
        body.user_data = identity.to_user_data();

        collider.set_collision_groups(CollisionGroups::interaction_groups(filter.category, filter.mask));
        collider.user_data = identity.to_user_data();

        let body_handle = self.bodies.insert(body);
        let collider_handle = self
            .colliders
            .insert_with_parent(collider, body_handle, &mut self.bodies);

        let handles = AttachedBody {
            body: body_handle,
            collider: collider_handle,
        };
        self.entries.insert(collider_handle, ColliderEntry { identity, filter });
        self.handles.insert(identity, handles);
        instance.body = BodySlot::Attached(handles);

        log::debug!(
            "Added body {} ('{}', {:?}, category {:?})",
            identity,
            instance.template_name(),
            instance.kind(),
            filter.category
        );
        Ok(())
    }

    /// Push a kinematic instance's render transform into its body
    ///
    /// Returns `false` for dynamic or unattached instances.
    pub fn drive_kinematic(&mut self, instance: &ObjectInstance) -> bool {
        if instance.kind() != BodyKind::Kinematic {
            return false;
        }
        let Some(handles) = instance.body.attached() else {
            return false;
        };
        let Some(body) = self.bodies.get_mut(handles.body) else {
            return false;
        };

        body.set_next_kinematic_position(instance.motion_state().isometry());
        true
    }

    /// Advance the simulation by `delta` seconds of frame time
    pub fn step<L>(&mut self, delta: f32, listener: &mut L) -> StepReport
    where
        L: ContactListener + ?Sized,
    {
        if delta.is_finite() {
            self.local_time += delta.max(0.0);
        } else {
            log::warn!("Ignoring non-finite frame delta {}", delta);
        }

        let whole = (self.local_time / self.fixed_sub_step + SUB_STEP_EPSILON).floor();
        #[allow(clippy::cast_sign_loss)]
        let (sub_steps, dropped_sub_steps) = if whole > self.max_sub_steps as f32 {
            self.local_time = 0.0;
            let dropped = (whole - self.max_sub_steps as f32) as u32;
            log::warn!(
                "Frame delta {:.3}s exceeds the sub-step cap, dropping {} sub-steps",
                delta,
                dropped
            );
            (self.max_sub_steps, dropped)
        } else {
            self.local_time = (self.local_time - whole * self.fixed_sub_step).max(0.0);
            (whole as u32, 0)
        };

        let mut contacts_reported = 0;
        for _ in 0..sub_steps {
            self.pipeline.step(
                &self.gravity,
                &self.integration_parameters,
                &mut self.islands,
                &mut self.broad_phase,
                &mut self.narrow_phase,
                &mut self.bodies,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                &mut self.ccd_solver,
                Some(&mut self.query_pipeline),
                &(),
                &(),
            );
            contacts_reported += self.report_contacts(listener);
        }

        let simulated = sub_steps as f32 * self.fixed_sub_step;
        self.simulated_time += f64::from(simulated);

        log::trace!("Stepped {} sub-steps, {} contact reports", sub_steps, contacts_reported);
        StepReport {
            sub_steps,
            dropped_sub_steps,
            simulated,
            contacts_reported,
        }
    }

    /// Dispatch every qualifying manifold of the last sub-step
    fn report_contacts<L>(&self, listener: &mut L) -> u32
    where
        L: ContactListener + ?Sized,
    {
        let mut reported = 0;
        for pair in self.narrow_phase.contact_pairs() {
            if !pair.has_any_active_contact {
                continue;
            }
            let (Some(a), Some(b)) = (self.entries.get(&pair.collider1), self.entries.get(&pair.collider2)) else {
                continue;
            };
            if !a.filter.collides_with(&b.filter) {
                continue;
            }
            let Some((matched_a, matched_b)) = a.filter.callback_match(&b.filter) else {
                continue;
            };

            for (index, manifold) in pair.manifolds.iter().enumerate() {
                if manifold.data.solver_contacts.is_empty() {
                    continue;
                }
                let index = index as u32;
                listener.on_contact_added(
                    ContactParty {
                        identity: a.identity,
                        part: manifold.subshape1,
                        index,
                        matched: matched_a,
                    },
                    ContactParty {
                        identity: b.identity,
                        part: manifold.subshape2,
                        index,
                        matched: matched_b,
                    },
                );
                reported += 1;
            }
        }
        reported
    }

    /// Copy integrated poses of dynamic bodies into their instances' motion states
    pub fn write_back(&self, registry: &mut InstanceRegistry) -> usize {
        let mut written = 0;
        for instance in registry.iter_mut() {
            if instance.kind() != BodyKind::Dynamic {
                continue;
            }
            let Some(body) = instance.body.attached().and_then(|h| self.bodies.get(h.body)) else {
                continue;
            };
            let pose = *body.position();
            instance.motion_state_mut().set_isometry(&pose);
            written += 1;
        }
        written
    }

    /// Take an instance's body out of the world for good
    ///
    /// Returns `false` when the body was not in this world.
    pub fn remove_body(&mut self, instance: &mut ObjectInstance) -> bool {
        let Some(handles) = instance.body.attached() else {
            return false;
        };

        self.bodies.remove(
            handles.body,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        if let Some(entry) = self.entries.remove(&handles.collider) {
            self.handles.remove(&entry.identity);
        }
        instance.body = BodySlot::Released;
        true
    }

    /// Current translation of the body registered under `identity`
    pub fn body_translation(&self, identity: InstanceId) -> Option<Vec3> {
        let handles = self.handles.get(&identity)?;
        self.bodies.get(handles.body).map(|body| *body.translation())
    }

    /// Whether the body registered under `identity` is asleep
    pub fn is_body_sleeping(&self, identity: InstanceId) -> Option<bool> {
        let handles = self.handles.get(&identity)?;
        self.bodies.get(handles.body).map(RigidBody::is_sleeping)
    }

    /// Filtering the body registered under `identity` was added with
    pub fn body_filter(&self, identity: InstanceId) -> Option<BodyFilter> {
        let handles = self.handles.get(&identity)?;
        self.entries.get(&handles.collider).map(|entry| entry.filter)
    }

    /// Number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Total simulated seconds
    pub const fn simulated_time(&self) -> f64 {
        self.simulated_time
    }

    /// Frame time accumulated but not yet simulated
    pub const fn pending_time(&self) -> f32 {
        self.local_time
    }

    /// Gravity vector
    pub const fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Fixed sub-step length
    pub const fn fixed_sub_step(&self) -> f32 {
        self.fixed_sub_step
    }

    /// Sub-step cap per call
    pub const fn max_sub_steps(&self) -> u32 {
        self.max_sub_steps
    }
}
