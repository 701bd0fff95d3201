//! Sensor timing and gain model
//!
//! This module translates auto-exposure requests into sensor register
//! quantities, with separate modules for the mode descriptor, the gain
//! codec, the blanking computation and a per-sensor helper tying them
//! together.

pub mod common;
pub mod gain;
pub mod helper;
pub mod mode;
pub mod observer;
pub mod timing;

pub use common::{Duration, REGISTER_MAX, Result, SensorModelError};

pub use mode::{SensorModeDescriptor, SensorModeDescriptorBuilder};

pub use gain::{GainCode, GainCodec, MilliDecibelCodec};

pub use observer::{NoopObserver, TimingObserver, TracingObserver};

pub use timing::{
    BlankingPolicy, BlankingResult, BlankingTrace, HmaxTable, PixelRateTiming, PolicyKind,
    PolicySelection, TimingConfig, TimingConfigBuilder, TimingModel,
};

pub use helper::CameraHelper;
