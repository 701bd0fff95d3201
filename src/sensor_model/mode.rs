//! Sensor mode module
//!
//! The mode descriptor carries the resolution, bit depth, pixel clock and
//! hardware line/frame limits that parameterize every timing computation.

pub mod types;


pub use types::{SensorModeDescriptor, SensorModeDescriptorBuilder};
