//! Per-sensor facade used by the control loop.
//!
//! Bundles the timing model and gain codec for one sensor, together with
//! the static facts the control loop asks about at mode switches.

use crate::sensor_model::common::{Duration, Result};
use crate::sensor_model::gain::{GainCode, GainCodec, MilliDecibelCodec};
use crate::sensor_model::mode::SensorModeDescriptor;
use crate::sensor_model::observer::{TimingObserver, TracingObserver};
use crate::sensor_model::timing::{BlankingResult, TimingConfig, TimingModel};

/// Frames to discard after a mode switch; the first metadata frame after a
/// switch is occasionally bogus.
const MISTRUST_FRAMES_MODE_SWITCH: u32 = 1;

pub struct CameraHelper<C: GainCodec = MilliDecibelCodec, O: TimingObserver = TracingObserver> {
    timing: TimingModel<O>,
    codec: C,
}

impl CameraHelper {
    /// Helper with the default sensor constants and tracing diagnostics.
    pub fn new(mode: SensorModeDescriptor) -> Result<Self> {
        Self::with_config(mode, TimingConfig::default())
    }

    pub fn with_config(mode: SensorModeDescriptor, config: TimingConfig) -> Result<Self> {
        Ok(Self {
            timing: TimingModel::new(mode, config)?,
            codec: MilliDecibelCodec::new(),
        })
    }
}

impl<C: GainCodec, O: TimingObserver> CameraHelper<C, O> {
    pub fn with_parts(timing: TimingModel<O>, codec: C) -> Self {
        Self { timing, codec }
    }

    pub fn gain_code(&self, gain: f64) -> GainCode {
        self.codec.encode(gain)
    }

    pub fn gain(&self, code: GainCode) -> f64 {
        self.codec.decode(code)
    }

    pub fn get_blanking(
        &self,
        exposure: &mut Duration,
        min_frame_duration: Duration,
        max_frame_duration: Duration,
    ) -> Result<BlankingResult> {
        self.timing
            .compute_blanking(exposure, min_frame_duration, max_frame_duration)
    }

    pub fn switch_mode(&mut self, mode: SensorModeDescriptor) -> Result<()> {
        self.timing.switch_mode(mode)
    }

    pub fn mistrust_frames_mode_switch(&self) -> u32 {
        MISTRUST_FRAMES_MODE_SWITCH
    }

    pub fn mistrust_frames_startup(&self) -> u32 {
        0
    }

    /// Gain and exposure come from register reads, not embedded data lines.
    pub fn sensor_embedded_data_present(&self) -> bool {
        false
    }

    pub fn frame_integration_diff(&self) -> u32 {
        self.timing.frame_integration_diff()
    }

    pub fn timing(&self) -> &TimingModel<O> {
        &self.timing
    }

    pub fn mode(&self) -> &SensorModeDescriptor {
        self.timing.mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor_model::common::REGISTER_MAX;
    use crate::sensor_model::observer::NoopObserver;
    use crate::sensor_model::timing::PolicyKind;

    fn mode() -> SensorModeDescriptor {
        SensorModeDescriptor::builder()
            .resolution(1920, 1080)
            .bit_depth(10)
            .pixel_rate(148_500_000)
            .max_frame_length(REGISTER_MAX)
            .build()
            .unwrap()
    }

    fn quiet_helper() -> CameraHelper<MilliDecibelCodec<NoopObserver>, NoopObserver> {
        let timing =
            TimingModel::with_observer(mode(), TimingConfig::default(), NoopObserver).unwrap();
        CameraHelper::with_parts(timing, MilliDecibelCodec::with_observer(NoopObserver))
    }

    #[test]
    fn static_sensor_properties() {
        let helper = quiet_helper();
        assert_eq!(helper.mistrust_frames_mode_switch(), 1);
        assert_eq!(helper.mistrust_frames_startup(), 0);
        assert!(!helper.sensor_embedded_data_present());
        assert_eq!(helper.frame_integration_diff(), 4);
    }

    #[test]
    fn gain_round_trip_through_helper() {
        let helper = quiet_helper();
        let code = helper.gain_code(4.0);
        assert_eq!(code, GainCode(12_041));
        assert!((helper.gain(code) - 4.0).abs() < 1e-3);
    }

    #[test]
    fn blanking_through_helper() {
        let helper = quiet_helper();
        assert_eq!(helper.timing().policy().kind(), PolicyKind::LineWidth);

        // 1920 clocks at 148.5 MHz is 12929.292 ns per line
        let mut exposure = Duration::from_millis(5);
        let window = Duration::from_micros(33_333);
        let result = helper.get_blanking(&mut exposure, window, window).unwrap();

        assert_eq!(result.horizontal_blank_lines, 0);
        assert_eq!(result.vertical_blank_lines, 2578 - 1080);
        assert_eq!(exposure, Duration::from_picos(386 * 12_929_292));
    }

    #[test]
    fn default_helper_uses_tracing_observer() {
        let helper = CameraHelper::new(mode()).unwrap();
        assert_eq!(helper.mode().width, 1920);
    }
}
