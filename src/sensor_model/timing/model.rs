use crate::sensor_model::common::{Duration, Result};
use crate::sensor_model::mode::SensorModeDescriptor;
use crate::sensor_model::observer::{TimingObserver, TracingObserver};
use crate::sensor_model::timing::policy::BlankingPolicy;
use crate::sensor_model::timing::types::{BlankingResult, TimingConfig};

/// Translates exposure and frame-rate requests into blanking register
/// values for one sensor mode.
///
/// The model holds only the validated mode, its resolved policy and the
/// sensor constants; no value carries over from one call to the next.
#[derive(Debug, Clone)]
pub struct TimingModel<O: TimingObserver = TracingObserver> {
    mode: SensorModeDescriptor,
    config: TimingConfig,
    policy: BlankingPolicy,
    observer: O,
}

impl TimingModel<TracingObserver> {
    pub fn new(mode: SensorModeDescriptor, config: TimingConfig) -> Result<Self> {
        Self::with_observer(mode, config, TracingObserver)
    }
}

impl<O: TimingObserver> TimingModel<O> {
    pub fn with_observer(
        mode: SensorModeDescriptor,
        config: TimingConfig,
        observer: O,
    ) -> Result<Self> {
        config.validate()?;
        let policy = Self::prepare(&mode, &config)?;
        observer.mode_switched(&mode, policy.kind());
        Ok(Self {
            mode,
            config,
            policy,
            observer,
        })
    }

    fn prepare(mode: &SensorModeDescriptor, config: &TimingConfig) -> Result<BlankingPolicy> {
        mode.validate()?;
        let policy = BlankingPolicy::resolve(&config.policy, mode);
        policy.check_mode(mode)?;
        Ok(policy)
    }

    /// Replaces the mode wholesale.
    ///
    /// On error the previous mode stays in effect.
    pub fn switch_mode(&mut self, mode: SensorModeDescriptor) -> Result<()> {
        let policy = Self::prepare(&mode, &self.config)?;
        self.observer.mode_switched(&mode, policy.kind());
        self.mode = mode;
        self.policy = policy;
        Ok(())
    }

    /// Computes the blanking for one frame.
    ///
    /// `exposure` is rewritten to the exposure the sensor will actually
    /// deliver once quantized to whole lines and limited by the frame length.
    pub fn compute_blanking(
        &self,
        exposure: &mut Duration,
        min_frame_duration: Duration,
        max_frame_duration: Duration,
    ) -> Result<BlankingResult> {
        let trace = self.policy.solve(
            &self.mode,
            self.config.frame_integration_diff,
            *exposure,
            min_frame_duration,
            max_frame_duration,
        )?;
        self.observer.blanking_computed(&trace);
        *exposure = trace.exposure;
        Ok(trace.result)
    }

    pub fn mode(&self) -> &SensorModeDescriptor {
        &self.mode
    }

    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    pub fn policy(&self) -> &BlankingPolicy {
        &self.policy
    }

    pub fn frame_integration_diff(&self) -> u32 {
        self.config.frame_integration_diff
    }
}
