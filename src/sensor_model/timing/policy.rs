//! The blanking derivations, one per sensor family.
//!
//! Both are pure functions of (mode, exposure, frame-duration window). They
//! return a [`BlankingTrace`] holding the result, the quantized exposure and
//! every intermediate value, and leave reporting to the caller.

use crate::sensor_model::common::{Duration, REGISTER_MAX, Result, SensorModelError};
use crate::sensor_model::mode::SensorModeDescriptor;
use crate::sensor_model::timing::types::{
    BlankingResult, BlankingTrace, PixelRateTiming, PolicyKind, PolicySelection,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlankingPolicy {
    /// Line length is exactly `width` pixel clocks; horizontal blanking is
    /// always zero and frame rate is controlled with vertical blanking only.
    LineWidth,
    /// Line length starts at the mode minimum and is stretched when the
    /// requested frame cannot fit in `max_frame_length` lines.
    PixelRateAware(PixelRateTiming),
}

impl BlankingPolicy {
    pub fn resolve(selection: &PolicySelection, mode: &SensorModeDescriptor) -> Self {
        match selection {
            PolicySelection::LineWidth => Self::LineWidth,
            PolicySelection::PixelRateAware(timing) => Self::PixelRateAware(timing.clone()),
            PolicySelection::ByWidth {
                wide_threshold,
                pixel_rate_timing,
            } => {
                if mode.width > *wide_threshold {
                    Self::PixelRateAware(pixel_rate_timing.clone())
                } else {
                    Self::LineWidth
                }
            }
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            Self::LineWidth => PolicyKind::LineWidth,
            Self::PixelRateAware(_) => PolicyKind::PixelRateAware,
        }
    }

    /// Rejects modes whose blanking could leave the register range.
    pub fn check_mode(&self, mode: &SensorModeDescriptor) -> Result<()> {
        match self {
            // vblank <= max_frame_length - height, already bounded by the mode
            Self::LineWidth => Ok(()),
            Self::PixelRateAware(timing) => {
                let sensor_rate = timing.sensor_pixel_rate(mode.pixel_rate);
                let hmax = mode.max_line_length.to_pixel_clocks(sensor_rate);
                let base = u64::from(timing.hmax_base_for(mode.bit_depth, mode.width));
                let worst = hmax
                    .saturating_sub(base)
                    .saturating_mul(u64::from(timing.lane_count));
                if worst > u64::from(REGISTER_MAX) {
                    return Err(SensorModelError::RegisterOverflow {
                        field: "horizontal_blank",
                        value: worst,
                        limit: REGISTER_MAX,
                    });
                }
                Ok(())
            }
        }
    }

    pub fn solve(
        &self,
        mode: &SensorModeDescriptor,
        frame_integration_diff: u32,
        exposure: Duration,
        min_frame_duration: Duration,
        max_frame_duration: Duration,
    ) -> Result<BlankingTrace> {
        match self {
            Self::LineWidth => solve_line_width(
                mode,
                frame_integration_diff,
                exposure,
                min_frame_duration,
                max_frame_duration,
            ),
            Self::PixelRateAware(timing) => solve_pixel_rate_aware(
                timing,
                mode,
                frame_integration_diff,
                exposure,
                min_frame_duration,
                max_frame_duration,
            ),
        }
    }
}

/// Whole lines of `line_length` in `duration`, saturating at `u32::MAX`.
pub fn exposure_lines(duration: Duration, line_length: Duration) -> u32 {
    let lines = duration.lines_in(line_length).unwrap_or(0);
    u32::try_from(lines).unwrap_or(u32::MAX)
}

/// Duration of `lines` lines of `line_length`.
pub fn exposure_from_lines(lines: u32, line_length: Duration) -> Duration {
    line_length.saturating_mul(u64::from(lines))
}

struct FrameWindow {
    min: u32,
    max: u32,
}

impl FrameWindow {
    /// An inverted window is treated as the single frame length `min`.
    fn new(
        min_frame_duration: Duration,
        max_frame_duration: Duration,
        line_length: Duration,
    ) -> Self {
        let min = exposure_lines(min_frame_duration, line_length);
        let max = exposure_lines(max_frame_duration, line_length).max(min);
        Self { min, max }
    }

    fn capped(self, limit: u32) -> Self {
        Self {
            min: self.min.min(limit),
            max: self.max.min(limit),
        }
    }

    /// Frame length that fits `lines` of integration plus the margin.
    fn fit(&self, lines: u32, frame_integration_diff: u32) -> u32 {
        lines
            .saturating_add(frame_integration_diff)
            .clamp(self.min, self.max)
    }
}

fn requested_lines(exposure: Duration, line_length: Duration, frame_integration_diff: u32) -> u32 {
    // Keep lines + frame_integration_diff from overflowing
    exposure_lines(exposure, line_length).min(u32::MAX - frame_integration_diff)
}

fn solve_line_width(
    mode: &SensorModeDescriptor,
    frame_integration_diff: u32,
    exposure: Duration,
    min_frame_duration: Duration,
    max_frame_duration: Duration,
) -> Result<BlankingTrace> {
    let line_length = mode.line_length_pck_to_duration(mode.width);
    if line_length.is_zero() {
        return Err(SensorModelError::ZeroLineLength);
    }

    let window = FrameWindow::new(min_frame_duration, max_frame_duration, line_length)
        .capped(mode.max_frame_length);
    let integration_lines = requested_lines(exposure, line_length, frame_integration_diff);
    let frame_length_lines = window.fit(integration_lines, frame_integration_diff);

    if frame_length_lines < mode.height {
        return Err(SensorModelError::FrameShorterThanActive {
            frame_length: frame_length_lines,
            height: mode.height,
        });
    }

    Ok(BlankingTrace {
        policy: PolicyKind::LineWidth,
        line_length,
        frame_length_min: window.min,
        frame_length_max: window.max,
        frame_length_lines,
        exposure_lines: integration_lines,
        exposure: exposure_from_lines(integration_lines, line_length),
        result: BlankingResult {
            vertical_blank_lines: frame_length_lines - mode.height,
            horizontal_blank_lines: 0,
        },
    })
}

fn solve_pixel_rate_aware(
    timing: &PixelRateTiming,
    mode: &SensorModeDescriptor,
    frame_integration_diff: u32,
    exposure: Duration,
    min_frame_duration: Duration,
    max_frame_duration: Duration,
) -> Result<BlankingTrace> {
    let hmax_base = timing.hmax_base_for(mode.bit_depth, mode.width);
    let sensor_pixel_rate = timing.sensor_pixel_rate(mode.pixel_rate);

    let mut line_length = mode.min_line_length;
    if line_length.is_zero() {
        return Err(SensorModelError::ZeroLineLength);
    }

    // Frame limits are measured at the shortest line so the line is only
    // stretched when the frame length alone cannot reach the request.
    let window = FrameWindow::new(min_frame_duration, max_frame_duration, line_length);
    let requested = requested_lines(exposure, line_length, frame_integration_diff);
    let mut frame_length_lines = window.fit(requested, frame_integration_diff);

    if frame_length_lines > mode.max_frame_length {
        let stretched = line_length
            .mul_ratio(u64::from(frame_length_lines), u64::from(mode.max_frame_length))
            .unwrap_or(mode.max_line_length);
        line_length = mode.max_line_length.min(stretched);
        frame_length_lines = mode.max_frame_length;
    }

    let hmax_overwrite = line_length.to_pixel_clocks(sensor_pixel_rate);
    let horizontal_blank = if hmax_overwrite > u64::from(hmax_base) {
        (hmax_overwrite - u64::from(hmax_base)).saturating_mul(u64::from(timing.lane_count))
    } else {
        0
    };

    let integration_lines = frame_length_lines
        .saturating_sub(frame_integration_diff)
        .min(exposure_lines(exposure, line_length));

    Ok(BlankingTrace {
        policy: PolicyKind::PixelRateAware,
        line_length,
        frame_length_min: window.min,
        frame_length_max: window.max,
        frame_length_lines,
        exposure_lines: integration_lines,
        exposure: exposure_from_lines(integration_lines, line_length),
        result: BlankingResult {
            vertical_blank_lines: frame_length_lines.saturating_sub(mode.height),
            horizontal_blank_lines: u32::try_from(horizontal_blank).unwrap_or(u32::MAX),
        },
    })
}
