//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the sandbox:
//! - Math types and render/physics pose conversions
//! - Frame timing
//! - Logging setup

pub mod math;
pub mod time;
pub mod logging;
