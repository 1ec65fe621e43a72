//! Sandbox session: the `init` / `frame` / `shutdown` surface for hosts
//!
//! One frame runs, in order:
//! 1. clamp the frame delta,
//! 2. spawn scheduler tick (and spawn when due),
//! 3. ground oscillation, pushed into the kinematic ground body,
//! 4. fixed sub-step simulation, with contacts queued,
//! 5. integrated poses written back through the motion states,
//! 6. queued contact highlights applied,
//! 7. visibility pass producing the render list.

use thiserror::Error;

use crate::config::{ConfigError, SandboxConfig};
use crate::content;
use crate::objects::{InstanceId, InstanceRegistry, TemplateError, TemplateRegistry};
use crate::physics::{BodyFilter, ContactResponse, SimulationWorld, WorldError};
use crate::scene::{collect_visible, Camera, RenderList};

use super::ground::GroundOscillator;
use super::spawner::Spawner;

/// Anything that can go wrong while setting up or running a session
#[derive(Error, Debug)]
pub enum SandboxError {
    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Template setup or lookup failure
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Simulation world failure
    #[error("world error: {0}")]
    World(#[from] WorldError),
}

/// Counters describing one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStats {
    /// Instances that passed the visibility test
    pub visible_count: usize,
    /// Instances alive in the session
    pub instance_count: usize,
    /// Fixed sub-steps executed this frame
    pub sub_steps: u32,
    /// Contact reports received this frame
    pub contacts_reported: u32,
    /// Delta actually fed to the simulation after clamping
    pub delta: f32,
}

/// Result of one frame
#[derive(Debug, Clone)]
pub struct FrameOutput {
    /// Renderer input
    pub render: RenderList,
    /// Frame counters
    pub stats: FrameStats,
}

/// What teardown released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShutdownReport {
    /// Instances dropped
    pub instances: usize,
    /// Bodies removed from the world before it was dropped
    pub bodies: usize,
    /// Templates dropped after the world
    pub templates: usize,
    /// Frames run during the session
    pub frames: u64,
}

/// A running falling-shapes simulation
pub struct Sandbox {
    config: SandboxConfig,
    templates: TemplateRegistry,
    world: SimulationWorld,
    registry: InstanceRegistry,
    response: ContactResponse,
    spawner: Spawner,
    ground: GroundOscillator,
    ground_id: InstanceId,
    camera: Camera,
    frames: u64,
}

impl Sandbox {
    /// Build the stock templates and world, then place the ground
    pub fn init(config: SandboxConfig) -> Result<Self, SandboxError> {
        config.validate()?;
        let templates = content::default_templates()?;
        Self::with_templates(config, templates)
    }

    /// Start a session over caller-supplied templates
    ///
    /// The template at index 0 becomes the kinematic ground; at least one more
    /// template must be registered for spawning.
    pub fn with_templates(config: SandboxConfig, templates: TemplateRegistry) -> Result<Self, SandboxError> {
        config.validate()?;
        if templates.spawnable_count() == 0 {
            return Err(TemplateError::NoSpawnable.into());
        }

        let mut world = SimulationWorld::new(&config.physics);
        let mut registry = InstanceRegistry::new();

        let mut ground = templates.construct_at(0)?;
        let ground_id = registry.next_id();
        world.add_body(&mut ground, ground_id, BodyFilter::ground())?;
        registry.insert(ground);

        log::info!(
            "Sandbox initialized with {} templates ({} spawnable)",
            templates.len(),
            templates.spawnable_count()
        );

        Ok(Self {
            spawner: Spawner::new(&config.spawn),
            ground: GroundOscillator::from_config(&config.ground),
            camera: Camera::from_config(&config.camera),
            response: ContactResponse::default(),
            config,
            templates,
            world,
            registry,
            ground_id,
            frames: 0,
        })
    }

    /// Advance the session by one frame of `delta` seconds
    pub fn frame(&mut self, delta: f32) -> Result<FrameOutput, SandboxError> {
        let delta = delta.clamp(0.0, self.config.frame.max_delta);

        if self.spawner.tick(delta) {
            self.spawner.spawn(&self.templates, &mut self.registry, &mut self.world)?;
        }

        self.ground.advance(delta);
        if let Some(ground) = self.registry.get_mut(self.ground_id) {
            self.ground.apply(ground);
            self.world.drive_kinematic(ground);
        }

        let report = self.world.step(delta, &mut self.response);
        self.world.write_back(&mut self.registry);
        self.response.flush(&mut self.registry);

        let render = collect_visible(&self.registry, &self.camera);
        let stats = FrameStats {
            visible_count: render.len(),
            instance_count: self.registry.len(),
            sub_steps: report.sub_steps,
            contacts_reported: report.contacts_reported,
            delta,
        };

        self.frames += 1;
        log::trace!("Frame {}: {:?}", self.frames, stats);
        Ok(FrameOutput { render, stats })
    }

    /// Release instances and their bodies, then the world, then the templates
    pub fn shutdown(self) -> ShutdownReport {
        let Self {
            mut registry,
            mut world,
            mut templates,
            frames,
            ..
        } = self;

        let mut report = ShutdownReport {
            frames,
            ..ShutdownReport::default()
        };
        for mut instance in registry.drain() {
            if world.remove_body(&mut instance) {
                report.bodies += 1;
            }
            report.instances += 1;
        }
        drop(world);
        report.templates = templates.clear();

        log::info!(
            "Sandbox shut down after {} frames: {} instances, {} templates released",
            report.frames,
            report.instances,
            report.templates
        );
        report
    }

    /// Live instances
    pub const fn registry(&self) -> &InstanceRegistry {
        &self.registry
    }

    /// Simulation world
    pub const fn world(&self) -> &SimulationWorld {
        &self.world
    }

    /// Registered templates
    pub const fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    /// Identity of the ground instance
    pub const fn ground_id(&self) -> InstanceId {
        self.ground_id
    }

    /// Ground oscillation state
    pub const fn ground(&self) -> &GroundOscillator {
        &self.ground
    }

    /// Viewpoint used by the visibility pass
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Viewpoint, for an external input collaborator to move
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Active configuration
    pub const fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Frames run so far
    pub const fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::objects::{Material, MeshData};
    use crate::physics::CollisionShape;
    use approx::assert_relative_eq;

    fn seeded_config() -> SandboxConfig {
        let mut config = SandboxConfig::default();
        config.spawn.seed = Some(1234);
        config
    }

    #[test]
    fn test_init_places_only_ground() {
        let sandbox = Sandbox::init(seeded_config()).unwrap();

        assert_eq!(sandbox.registry().len(), 1);
        assert_eq!(sandbox.ground_id(), InstanceId::new(0));
        assert_eq!(sandbox.world().body_count(), 1);
        assert_eq!(sandbox.templates().len(), 6);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = seeded_config();
        config.physics.max_sub_steps = 0;
        assert!(matches!(Sandbox::init(config), Err(SandboxError::Config(_))));
    }

    #[test]
    fn test_ground_only_templates_are_rejected() {
        let mut templates = TemplateRegistry::new();
        let mesh = MeshData::new("slab", vec![Vec3::zeros(), Vec3::repeat(1.0)]).shared();
        templates
            .register("ground", mesh, CollisionShape::cuboid(1.0, 1.0, 1.0), 0.0, Material::default())
            .unwrap();

        assert!(matches!(
            Sandbox::with_templates(seeded_config(), templates),
            Err(SandboxError::Template(TemplateError::NoSpawnable))
        ));
    }

    #[test]
    fn test_every_frame_spawns_one_object() {
        let mut sandbox = Sandbox::init(seeded_config()).unwrap();

        let first = sandbox.frame(1.0 / 60.0).unwrap();
        assert_eq!(first.stats.instance_count, 2);
        assert_eq!(first.stats.sub_steps, 1);

        let second = sandbox.frame(1.0 / 60.0).unwrap();
        assert_eq!(second.stats.instance_count, 3);
        assert_eq!(sandbox.world().body_count(), 3);
        assert!(second.stats.visible_count <= second.stats.instance_count);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut sandbox = Sandbox::init(seeded_config()).unwrap();
        let output = sandbox.frame(1.0).unwrap();

        assert_relative_eq!(output.stats.delta, 1.0 / 30.0);
        assert_eq!(output.stats.sub_steps, 2);
        assert_relative_eq!(sandbox.ground().angle(), 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_ground_follows_oscillation() {
        let mut sandbox = Sandbox::init(seeded_config()).unwrap();
        for _ in 0..30 {
            sandbox.frame(1.0 / 30.0).unwrap();
        }

        let ground = sandbox.registry().get(sandbox.ground_id()).unwrap();
        let expected = sandbox.ground().height();
        assert_relative_eq!(ground.translation().y, expected, epsilon = 1e-5);
        assert_relative_eq!(
            sandbox.world().body_translation(sandbox.ground_id()).unwrap().y,
            expected,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_falling_objects_get_highlighted_on_ground() {
        let mut sandbox = Sandbox::init(seeded_config()).unwrap();
        for _ in 0..150 {
            sandbox.frame(1.0 / 60.0).unwrap();
        }

        let registry = sandbox.registry();
        assert!(!registry.get(sandbox.ground_id()).unwrap().material().is_highlighted());
        assert!(registry
            .iter()
            .skip(1)
            .any(|instance| instance.material().is_highlighted()));
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let mut sandbox = Sandbox::init(seeded_config()).unwrap();
        for _ in 0..3 {
            sandbox.frame(1.0 / 60.0).unwrap();
        }

        let report = sandbox.shutdown();
        assert_eq!(
            report,
            ShutdownReport {
                instances: 4,
                bodies: 4,
                templates: 6,
                frames: 3,
            }
        );
    }
}
