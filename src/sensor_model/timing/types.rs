//! Timing model configuration and result types

use crate::sensor_model::common::{Duration, Result, SensorModelError};

/// Smallest gap, in lines, the sensor needs between frame length and
/// integration time.
pub const DEFAULT_FRAME_INTEGRATION_DIFF: u32 = 4;

/// CSI-2 data lanes driven by the sensor.
pub const DEFAULT_LANE_COUNT: u32 = 4;

/// Modes wider than this use the pixel-rate aware derivation under
/// [`PolicySelection::ByWidth`].
pub const DEFAULT_WIDE_MODE_THRESHOLD: u32 = 4000;

/// Intrinsic minimum line length, in sensor clocks, per output bit depth.
pub const DEFAULT_HMAX_BASE: [(u32, u32); 3] = [(8, 366), (10, 440), (12, 550)];

/// Blanking values to program for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BlankingResult {
    pub vertical_blank_lines: u32,
    pub horizontal_blank_lines: u32,
}

/// Which derivation produced a [`BlankingTrace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    LineWidth,
    PixelRateAware,
}

/// Intermediate values of one blanking computation, reported to the
/// observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankingTrace {
    pub policy: PolicyKind,
    /// Line length the frame was finally solved with
    pub line_length: Duration,
    pub frame_length_min: u32,
    pub frame_length_max: u32,
    pub frame_length_lines: u32,
    pub exposure_lines: u32,
    /// Exposure after quantization to whole lines
    pub exposure: Duration,
    pub result: BlankingResult,
}

/// Per-bit-depth table of intrinsic line lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HmaxTable {
    entries: Vec<(u32, u32)>,
}

impl HmaxTable {
    pub fn new(entries: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let mut table = Self { entries: Vec::new() };
        for (bit_depth, hmax) in entries {
            table = table.with_entry(bit_depth, hmax);
        }
        table
    }

    /// Adds or replaces the entry for `bit_depth`.
    pub fn with_entry(mut self, bit_depth: u32, hmax: u32) -> Self {
        match self.entries.iter_mut().find(|(depth, _)| *depth == bit_depth) {
            Some(entry) => entry.1 = hmax,
            None => self.entries.push((bit_depth, hmax)),
        }
        self
    }

    pub fn lookup(&self, bit_depth: u32) -> Option<u32> {
        self.entries
            .iter()
            .find(|(depth, _)| *depth == bit_depth)
            .map(|&(_, hmax)| hmax)
    }
}

impl Default for HmaxTable {
    fn default() -> Self {
        Self::new(DEFAULT_HMAX_BASE)
    }
}

/// Device constants for the pixel-rate aware derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelRateTiming {
    pub lane_count: u32,
    pub hmax_base: HmaxTable,
}

impl Default for PixelRateTiming {
    fn default() -> Self {
        Self {
            lane_count: DEFAULT_LANE_COUNT,
            hmax_base: HmaxTable::default(),
        }
    }
}

impl PixelRateTiming {
    /// Base line length for `bit_depth`, or `width` for an unlisted depth.
    pub fn hmax_base_for(&self, bit_depth: u32, width: u32) -> u32 {
        self.hmax_base.lookup(bit_depth).unwrap_or(width)
    }

    /// Per-lane sensor clock: `pixel_rate / (2 * lane_count)`.
    pub fn sensor_pixel_rate(&self, pixel_rate: u64) -> u64 {
        pixel_rate / (2 * u64::from(self.lane_count.max(1)))
    }
}

/// How a [`TimingModel`](crate::sensor_model::timing::TimingModel) picks its
/// derivation for a given mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySelection {
    /// Always derive line length from the mode width
    LineWidth,
    /// Always use the bit-depth / pixel-rate aware derivation
    PixelRateAware(PixelRateTiming),
    /// Pixel-rate aware for modes wider than `wide_threshold`, width-driven
    /// otherwise
    ByWidth {
        wide_threshold: u32,
        pixel_rate_timing: PixelRateTiming,
    },
}

impl Default for PolicySelection {
    fn default() -> Self {
        Self::ByWidth {
            wide_threshold: DEFAULT_WIDE_MODE_THRESHOLD,
            pixel_rate_timing: PixelRateTiming::default(),
        }
    }
}

/// Named, overridable constants for one sensor variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingConfig {
    /// Minimum line gap between frame length and integration time
    pub frame_integration_diff: u32,
    /// Derivation to use per mode
    pub policy: PolicySelection,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            frame_integration_diff: DEFAULT_FRAME_INTEGRATION_DIFF,
            policy: PolicySelection::default(),
        }
    }
}

impl TimingConfig {
    pub fn builder() -> TimingConfigBuilder {
        TimingConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        let pixel_rate_timing = match &self.policy {
            PolicySelection::LineWidth => None,
            PolicySelection::PixelRateAware(timing) => Some(timing),
            PolicySelection::ByWidth {
                pixel_rate_timing, ..
            } => Some(pixel_rate_timing),
        };

        if let Some(timing) = pixel_rate_timing {
            if timing.lane_count == 0 {
                return Err(SensorModelError::InvalidConfig(
                    "lane count must be at least 1".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Builder for TimingConfig
#[derive(Default)]
pub struct TimingConfigBuilder {
    frame_integration_diff: Option<u32>,
    policy: Option<PolicySelection>,
}

impl TimingConfigBuilder {
    pub fn frame_integration_diff(mut self, lines: u32) -> Self {
        self.frame_integration_diff = Some(lines);
        self
    }

    pub fn policy(mut self, policy: PolicySelection) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn build(self) -> Result<TimingConfig> {
        let default = TimingConfig::default();
        let config = TimingConfig {
            frame_integration_diff: self
                .frame_integration_diff
                .unwrap_or(default.frame_integration_diff),
            policy: self.policy.unwrap_or(default.policy),
        };
        config.validate()?;
        Ok(config)
    }
}
