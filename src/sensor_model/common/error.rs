use thiserror::Error;

use crate::sensor_model::common::duration::Duration;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SensorModelError {
    #[error("Invalid mode dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("Invalid pixel rate: {0} Hz")]
    InvalidPixelRate(u64),

    #[error("Invalid line length range: min={min}, max={max}")]
    InvalidLineLength { min: Duration, max: Duration },

    #[error("{field} value {value} does not fit the {limit} register limit")]
    RegisterOverflow {
        field: &'static str,
        value: u64,
        limit: u32,
    },

    #[error("Invalid timing configuration: {0}")]
    InvalidConfig(String),

    #[error("Line length computed as zero")]
    ZeroLineLength,

    #[error("Frame length {frame_length} lines is shorter than active height {height}")]
    FrameShorterThanActive { frame_length: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, SensorModelError>;
