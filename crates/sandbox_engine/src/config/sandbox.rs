//! # Sandbox Configuration
//!
//! Tunables for the simulation session. Defaults reproduce the reference
//! scene: gravity (0, -10, 0), five 1/60 s sub-steps per frame, objects
//! dropped from y = 9 within a 5x5 footprint, ground bobbing 2.5 units at
//! 90 degrees per second, camera at (3, 7, 10) looking at (0, 4, 0).

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::Vec3;

/// Top-level sandbox configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Default log filter (`error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,
    /// Simulation world settings
    pub physics: PhysicsConfig,
    /// Spawn scheduler settings
    pub spawn: SpawnConfig,
    /// Kinematic ground oscillation
    pub ground: GroundConfig,
    /// Viewpoint used by the visibility pass
    pub camera: CameraConfig,
    /// Frame loop settings
    pub frame: FrameConfig,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            physics: PhysicsConfig::default(),
            spawn: SpawnConfig::default(),
            ground: GroundConfig::default(),
            camera: CameraConfig::default(),
            frame: FrameConfig::default(),
        }
    }
}

impl Config for SandboxConfig {}

impl SandboxConfig {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physics.validate()?;

        if self.spawn.spread.is_nan() || self.spawn.spread < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "spawn spread must be non-negative, got {}",
                self.spawn.spread
            )));
        }
        if self.spawn.period.is_nan() || self.spawn.period < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "spawn period must be non-negative, got {}",
                self.spawn.period
            )));
        }
        if self.frame.max_delta.is_nan() || self.frame.max_delta <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "frame max_delta must be positive, got {}",
                self.frame.max_delta
            )));
        }

        self.camera.validate()
    }
}

/// Simulation world settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration in m/s^2
    pub gravity: [f32; 3],
    /// Upper bound on fixed sub-steps executed by one `step` call
    pub max_sub_steps: u32,
    /// Fixed sub-step length in seconds
    pub fixed_sub_step: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -10.0, 0.0],
            max_sub_steps: 5,
            fixed_sub_step: 1.0 / 60.0,
        }
    }
}

impl PhysicsConfig {
    /// Gravity as a vector
    pub fn gravity_vector(&self) -> Vec3 {
        Vec3::from(self.gravity)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_sub_steps == 0 {
            return Err(ConfigError::Invalid("max_sub_steps must be at least 1".to_string()));
        }
        if self.fixed_sub_step.is_nan() || self.fixed_sub_step <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "fixed_sub_step must be positive, got {}",
                self.fixed_sub_step
            )));
        }
        Ok(())
    }
}

/// Spawn scheduler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Countdown reset value after a spawn. Zero spawns on every tick.
    pub period: f32,
    /// Drop height of new objects
    pub height: f32,
    /// Half-width of the square horizontal spawn area
    pub spread: f32,
    /// RNG seed; `None` seeds from system entropy
    pub seed: Option<u64>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            period: 0.0,
            height: 9.0,
            spread: 2.5,
            seed: None,
        }
    }
}

/// Kinematic ground oscillation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Peak vertical displacement
    pub amplitude: f32,
    /// Angular speed of the oscillation in degrees per second
    pub speed_degrees: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            amplitude: 2.5,
            speed_degrees: 90.0,
        }
    }
}

/// Camera placement and projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position
    pub position: [f32; 3],
    /// Look-at target
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Viewport width / height
    pub aspect: f32,
    /// Near clipping distance
    pub near: f32,
    /// Far clipping distance
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [3.0, 7.0, 10.0],
            target: [0.0, 4.0, 0.0],
            fov_degrees: 67.0,
            aspect: 4.0 / 3.0,
            near: 1.0,
            far: 100.0,
        }
    }
}

impl CameraConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.near.is_nan() || self.far.is_nan() || self.near <= 0.0 || self.far <= self.near {
            return Err(ConfigError::Invalid(format!(
                "camera planes must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        if self.fov_degrees.is_nan() || self.fov_degrees <= 0.0 || self.fov_degrees >= 180.0 {
            return Err(ConfigError::Invalid(format!(
                "camera fov must be in (0, 180), got {}",
                self.fov_degrees
            )));
        }
        if self.aspect.is_nan() || self.aspect <= 0.0 {
            return Err(ConfigError::Invalid(format!("camera aspect must be positive, got {}", self.aspect)));
        }
        Ok(())
    }
}

/// Frame loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Frame deltas above this are clamped before they reach the simulation
    pub max_delta: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { max_delta: 1.0 / 30.0 }
    }
}
