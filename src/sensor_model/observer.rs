//! Diagnostic hooks for the gain and timing computations.
//!
//! The computations themselves never log. They report their inputs and
//! intermediate values to a [`TimingObserver`], and the default
//! [`TracingObserver`] turns those reports into `tracing` events.

use std::sync::Arc;

use tracing::{debug, info};

use crate::sensor_model::gain::GainCode;
use crate::sensor_model::mode::SensorModeDescriptor;
use crate::sensor_model::timing::{BlankingTrace, PolicyKind};

pub trait TimingObserver {
    fn mode_switched(&self, _mode: &SensorModeDescriptor, _policy: PolicyKind) {}

    fn gain_encoded(&self, _gain: f64, _code: GainCode) {}

    fn blanking_computed(&self, _trace: &BlankingTrace) {}
}

/// Logs mode switches at `info` and per-frame values at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TimingObserver for TracingObserver {
    fn mode_switched(&self, mode: &SensorModeDescriptor, policy: PolicyKind) {
        info!(
            width = mode.width,
            height = mode.height,
            bit_depth = mode.bit_depth,
            pixel_rate = mode.pixel_rate,
            ?policy,
            "Sensor mode applied"
        );
    }

    fn gain_encoded(&self, gain: f64, code: GainCode) {
        debug!(gain, code = code.value(), "Gain encoded");
    }

    fn blanking_computed(&self, trace: &BlankingTrace) {
        debug!(
            policy = ?trace.policy,
            line_length = %trace.line_length,
            frame_length_min = trace.frame_length_min,
            frame_length_max = trace.frame_length_max,
            frame_length_lines = trace.frame_length_lines,
            "Frame length resolved"
        );
        debug!(
            vblank = trace.result.vertical_blank_lines,
            hblank = trace.result.horizontal_blank_lines,
            exposure = %trace.exposure,
            exposure_lines = trace.exposure_lines,
            "Blanking computed"
        );
    }
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TimingObserver for NoopObserver {}

impl<T: TimingObserver + ?Sized> TimingObserver for &T {
    fn mode_switched(&self, mode: &SensorModeDescriptor, policy: PolicyKind) {
        (**self).mode_switched(mode, policy)
    }

    fn gain_encoded(&self, gain: f64, code: GainCode) {
        (**self).gain_encoded(gain, code)
    }

    fn blanking_computed(&self, trace: &BlankingTrace) {
        (**self).blanking_computed(trace)
    }
}

impl<T: TimingObserver + ?Sized> TimingObserver for Arc<T> {
    fn mode_switched(&self, mode: &SensorModeDescriptor, policy: PolicyKind) {
        (**self).mode_switched(mode, policy)
    }

    fn gain_encoded(&self, gain: f64, code: GainCode) {
        (**self).gain_encoded(gain, code)
    }

    fn blanking_computed(&self, trace: &BlankingTrace) {
        (**self).blanking_computed(trace)
    }
}
