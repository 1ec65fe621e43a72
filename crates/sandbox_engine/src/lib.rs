//! # Sandbox Engine
//!
//! Core of a small real-time rigid-body sandbox: a kinematic ground slab
//! bobbing up and down while randomly posed shapes rain onto it.
//!
//! ## Features
//!
//! - **Motion-state bridge**: simulation poses flow into render transforms every step
//! - **Template and instance registries**: cheap construction, stable identities for contact lookups
//! - **Fixed sub-step simulation**: rapier-backed world with a bounded per-frame cost
//! - **Collision filtering**: category/mask groups plus callback flags for ground contacts
//! - **Visibility pass**: frustum culling against cached bounds, producing renderer input
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sandbox_engine::prelude::*;
//!
//! fn main() -> Result<(), SandboxError> {
//!     let mut sandbox = Sandbox::init(SandboxConfig::default())?;
//!     for _ in 0..600 {
//!         let output = sandbox.frame(1.0 / 60.0)?;
//!         log::info!("Visible: {}", output.stats.visible_count);
//!     }
//!     sandbox.shutdown();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod content;
pub mod foundation;
pub mod objects;
pub mod physics;
pub mod sandbox;
pub mod scene;

/// Common imports for sandbox hosts
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, SandboxConfig},
        foundation::{
            math::{Mat4, Vec3, Transform},
            time::FrameClock,
        },
        objects::{InstanceId, InstanceRegistry, Material, ObjectInstance, TemplateRegistry},
        physics::{BodyFilter, CollisionGroups, ContactListener, ContactParty, SimulationWorld},
        sandbox::{FrameOutput, FrameStats, Sandbox, SandboxError, ShutdownReport},
        scene::{Camera, RenderItem, RenderList},
    };
}
