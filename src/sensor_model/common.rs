//! Common utilities module
//!
//! This module contains the error type and the time representation shared
//! by the gain and timing components.

pub mod duration;
pub mod error;

pub use duration::Duration;
pub use error::{Result, SensorModelError};

/// Largest value a sensor blanking / frame-length register can hold.
pub const REGISTER_MAX: u32 = u16::MAX as u32;
