//! Spawn scheduling and random placement of falling objects

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SpawnConfig;
use crate::foundation::math::{self, Mat4, Transform, Vec3};
use crate::objects::{InstanceId, InstanceRegistry, TemplateError, TemplateRegistry};
use crate::physics::{BodyFilter, SimulationWorld};

use super::session::SandboxError;

/// Countdown timer deciding when to spawn
///
/// The countdown starts at zero, so the first tick with a positive delta
/// fires. After firing it resets to `period`; with the default period of zero
/// every such tick fires.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnScheduler {
    countdown: f32,
    period: f32,
}

impl SpawnScheduler {
    /// Scheduler that re-arms to `period` after each spawn
    pub const fn new(period: f32) -> Self {
        Self { countdown: 0.0, period }
    }

    /// Consume `delta` seconds; returns `true` when a spawn is due
    pub fn tick(&mut self, delta: f32) -> bool {
        self.countdown -= delta;
        if self.countdown < 0.0 {
            self.countdown = self.period;
            true
        } else {
            false
        }
    }

    /// Seconds left before the next spawn
    pub const fn countdown(&self) -> f32 {
        self.countdown
    }
}

/// Creates randomly posed objects from the spawnable templates
#[derive(Debug)]
pub struct Spawner {
    scheduler: SpawnScheduler,
    rng: StdRng,
    height: f32,
    spread: f32,
    spawned: u64,
}

impl Spawner {
    /// Spawner described by configuration; seeded from entropy when no seed is set
    pub fn new(config: &SpawnConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            scheduler: SpawnScheduler::new(config.period),
            rng,
            height: config.height,
            spread: config.spread,
            spawned: 0,
        }
    }

    /// Advance the schedule; returns `true` when a spawn is due
    pub fn tick(&mut self, delta: f32) -> bool {
        self.scheduler.tick(delta)
    }

    /// Schedule state
    pub const fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    /// Objects spawned so far
    pub const fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Uniformly pick a spawnable template index (never the reserved index 0)
    pub fn pick_template(&mut self, templates: &TemplateRegistry) -> Result<usize, TemplateError> {
        if templates.spawnable_count() == 0 {
            return Err(TemplateError::NoSpawnable);
        }
        Ok(self.rng.gen_range(1..templates.len()))
    }

    /// Random orientation at the drop height, horizontally within the spread
    pub fn random_pose(&mut self) -> Mat4 {
        let rotation = math::rotation_from_euler_degrees(
            self.rng.gen_range(0.0..360.0),
            self.rng.gen_range(0.0..360.0),
            self.rng.gen_range(0.0..360.0),
        );
        let position = Vec3::new(
            self.rng.gen_range(-self.spread..=self.spread),
            self.height,
            self.rng.gen_range(-self.spread..=self.spread),
        );
        Transform::from_position_rotation(position, rotation).to_matrix()
    }

    /// Build, pose and register one new falling object
    ///
    /// The instance enters the world and the registry under the same identity,
    /// with `OBJECT` filtering that reports contacts against ground.
    pub fn spawn(
        &mut self,
        templates: &TemplateRegistry,
        registry: &mut InstanceRegistry,
        world: &mut SimulationWorld,
    ) -> Result<InstanceId, SandboxError> {
        let index = self.pick_template(templates)?;
        let mut instance = templates.construct_at(index)?;
        instance.set_transform(self.random_pose());

        let identity = registry.next_id();
        world.add_body(&mut instance, identity, BodyFilter::object())?;

        log::debug!(
            "Spawned {} '{}' at {:?}",
            identity,
            instance.template_name(),
            instance.translation()
        );
        let inserted = registry.insert(instance);
        debug_assert_eq!(inserted, identity);

        self.spawned += 1;
        Ok(inserted)
    }
}
