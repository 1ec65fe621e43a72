//! Session driver: spawn scheduling, ground oscillation and the frame loop

pub mod ground;
pub mod session;
pub mod spawner;

pub use ground::GroundOscillator;
pub use session::{FrameOutput, FrameStats, Sandbox, SandboxError, ShutdownReport};
pub use spawner::{SpawnScheduler, Spawner};
