//! Kinematic ground oscillation

use crate::config::GroundConfig;
use crate::foundation::math::{self, utils, Vec3};
use crate::objects::ObjectInstance;

/// Drives the ground slab up and down along a sine of a degree accumulator
#[derive(Debug, Clone, PartialEq)]
pub struct GroundOscillator {
    amplitude: f32,
    speed_degrees: f32,
    angle: f32,
}

impl GroundOscillator {
    /// Oscillator at angle zero
    pub const fn new(amplitude: f32, speed_degrees: f32) -> Self {
        Self {
            amplitude,
            speed_degrees,
            angle: 0.0,
        }
    }

    /// Oscillator described by configuration
    pub const fn from_config(config: &GroundConfig) -> Self {
        Self::new(config.amplitude, config.speed_degrees)
    }

    /// Advance the angle by `delta` seconds and return the new height
    pub fn advance(&mut self, delta: f32) -> f32 {
        self.angle = (self.angle + delta * self.speed_degrees) % 360.0;
        self.height()
    }

    /// Current angle in degrees, in `[0, 360)`
    pub const fn angle(&self) -> f32 {
        self.angle
    }

    /// Current height: `amplitude * sin(angle)`
    pub fn height(&self) -> f32 {
        self.amplitude * utils::sin_deg(self.angle)
    }

    /// Move the ground instance's transform to the current height
    ///
    /// Only the translation is replaced; horizontal position is pinned to the origin.
    pub fn apply(&self, ground: &mut ObjectInstance) {
        let mut transform = ground.transform();
        math::set_translation(&mut transform, Vec3::new(0.0, self.height(), 0.0));
        ground.set_transform(transform);
    }
}

impl Default for GroundOscillator {
    fn default() -> Self {
        Self::from_config(&GroundConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quarter_turn_reaches_amplitude() {
        let mut ground = GroundOscillator::default();
        assert_relative_eq!(ground.advance(1.0), 2.5, epsilon = 1e-6);
        assert_eq!(ground.angle(), 90.0);
    }

    #[test]
    fn test_four_seconds_wraps_to_zero() {
        let mut ground = GroundOscillator::default();
        for _ in 0..4 {
            ground.advance(1.0);
        }
        assert_eq!(ground.angle(), 0.0);
        assert_eq!(ground.height(), 0.0);

        let mut single = GroundOscillator::default();
        single.advance(4.0);
        assert_eq!(single.angle(), 0.0);
        assert_eq!(single.height(), 0.0);
    }

    #[test]
    fn test_small_steps_stay_in_range() {
        let mut ground = GroundOscillator::default();
        for _ in 0..1000 {
            let height = ground.advance(1.0 / 60.0);
            assert!((0.0..360.0).contains(&ground.angle()));
            assert!(height.abs() <= 2.5 + 1e-5);
        }
    }
}
