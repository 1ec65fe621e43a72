//! Rigid-body simulation
//!
//! Collision filtering, shapes, the motion-state bridge, the rapier-backed
//! simulation world and contact reporting.

pub mod body;
pub mod collision_layers;
pub mod contact;
pub mod motion_state;
pub mod shape;
pub mod world;

pub use body::{BodyKind, BodySlot};
pub use collision_layers::{BodyFilter, CollisionGroups};
pub use contact::{ContactListener, ContactParty, ContactResponse};
pub use motion_state::{InstanceMotionState, MotionState};
pub use shape::CollisionShape;
pub use world::{SimulationWorld, StepReport, WorldError};
