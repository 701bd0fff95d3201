//! Fixed-precision time values for line, frame and exposure durations.

use std::fmt;

const PICOS_PER_NANO: u64 = 1_000;
const PICOS_PER_MICRO: u64 = 1_000_000;
const PICOS_PER_MILLI: u64 = 1_000_000_000;
const PICOS_PER_SEC: u64 = 1_000_000_000_000;

/// Unsigned time value with picosecond resolution.
///
/// A line length of a few microseconds rarely lands on a whole nanosecond,
/// and it gets multiplied by thousands of lines per frame. Keeping
/// picoseconds means the product stays within a nanosecond of the exact
/// value over the microseconds-to-seconds operating range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    picos: u64,
}

impl Duration {
    pub const ZERO: Self = Self { picos: 0 };
    pub const MAX: Self = Self { picos: u64::MAX };

    pub const fn from_picos(picos: u64) -> Self {
        Self { picos }
    }

    pub const fn from_nanos(nanos: u64) -> Self {
        Self::from_picos(nanos.saturating_mul(PICOS_PER_NANO))
    }

    pub const fn from_micros(micros: u64) -> Self {
        Self::from_picos(micros.saturating_mul(PICOS_PER_MICRO))
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self::from_picos(millis.saturating_mul(PICOS_PER_MILLI))
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self::from_picos(secs.saturating_mul(PICOS_PER_SEC))
    }

    /// Negative and NaN inputs become zero, overlarge ones saturate.
    pub fn from_secs_f64(secs: f64) -> Self {
        // `as` on f64 saturates and maps NaN to 0
        Self::from_picos((secs * PICOS_PER_SEC as f64).round() as u64)
    }

    /// Duration of `pixels` pixel clocks at `pixel_rate` Hz.
    ///
    /// Returns `None` for a zero pixel rate.
    pub fn from_pixel_clocks(pixels: u64, pixel_rate: u64) -> Option<Self> {
        if pixel_rate == 0 {
            return None;
        }
        let picos = u128::from(pixels) * u128::from(PICOS_PER_SEC) / u128::from(pixel_rate);
        Some(Self::from_picos(saturate_u64(picos)))
    }

    /// Whole pixel clocks at `pixel_rate` Hz that fit in this duration.
    pub fn to_pixel_clocks(self, pixel_rate: u64) -> u64 {
        let clocks = u128::from(self.picos) * u128::from(pixel_rate) / u128::from(PICOS_PER_SEC);
        saturate_u64(clocks)
    }

    pub const fn as_picos(self) -> u64 {
        self.picos
    }

    /// Truncates to whole nanoseconds.
    pub const fn as_nanos(self) -> u64 {
        self.picos / PICOS_PER_NANO
    }

    pub fn as_secs_f64(self) -> f64 {
        self.picos as f64 / PICOS_PER_SEC as f64
    }

    pub fn as_millis_f64(self) -> f64 {
        self.picos as f64 / PICOS_PER_MILLI as f64
    }

    pub const fn is_zero(self) -> bool {
        self.picos == 0
    }

    /// Number of whole `unit` periods contained in `self` (floor division).
    ///
    /// Returns `None` when `unit` is zero.
    pub const fn lines_in(self, unit: Duration) -> Option<u64> {
        if unit.picos == 0 {
            return None;
        }
        Some(self.picos / unit.picos)
    }

    pub const fn saturating_mul(self, n: u64) -> Self {
        Self::from_picos(self.picos.saturating_mul(n))
    }

    pub const fn saturating_add(self, other: Duration) -> Self {
        Self::from_picos(self.picos.saturating_add(other.picos))
    }

    pub const fn saturating_sub(self, other: Duration) -> Self {
        Self::from_picos(self.picos.saturating_sub(other.picos))
    }

    /// `self * num / den`, truncated, with a 128-bit intermediate.
    ///
    /// Returns `None` when `den` is zero.
    pub fn mul_ratio(self, num: u64, den: u64) -> Option<Self> {
        if den == 0 {
            return None;
        }
        let picos = u128::from(self.picos) * u128::from(num) / u128::from(den);
        Some(Self::from_picos(saturate_u64(picos)))
    }
}

fn saturate_u64(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:03}ns",
            self.picos / PICOS_PER_NANO,
            self.picos % PICOS_PER_NANO
        )
    }
}

impl From<std::time::Duration> for Duration {
    fn from(d: std::time::Duration) -> Self {
        let picos = d.as_nanos().saturating_mul(u128::from(PICOS_PER_NANO));
        Self::from_picos(saturate_u64(picos))
    }
}

impl From<Duration> for std::time::Duration {
    fn from(d: Duration) -> Self {
        std::time::Duration::from_nanos(d.as_nanos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_clock_round_trip_keeps_sub_nanosecond_precision() {
        let line = Duration::from_pixel_clocks(3280, 182_400_000).unwrap();
        assert_eq!(line.as_picos(), 17_982_456);
        assert_eq!(line.as_nanos(), 17_982);
        assert_eq!(line.to_pixel_clocks(182_400_000), 3279);

        // 556 lines accumulate well under a nanosecond of error per line
        let exposure = line.saturating_mul(556);
        assert_eq!(exposure.as_picos(), 9_998_245_536);
    }

    #[test]
    fn zero_rates_and_units_are_rejected() {
        assert_eq!(Duration::from_pixel_clocks(100, 0), None);
        assert_eq!(Duration::from_millis(10).lines_in(Duration::ZERO), None);
        assert_eq!(Duration::from_millis(10).mul_ratio(3, 0), None);
    }

    #[test]
    fn lines_in_floors() {
        let line = Duration::from_nanos(3_704);
        assert_eq!(Duration::from_millis(10).lines_in(line), Some(2699));
        assert_eq!(Duration::ZERO.lines_in(line), Some(0));
    }

    #[test]
    fn mul_ratio_uses_wide_intermediate() {
        let line = Duration::from_nanos(3_704);
        let stretched = line.mul_ratio(8999, 8000).unwrap();
        assert_eq!(stretched.as_picos(), 4_166_537);

        let huge = Duration::MAX.mul_ratio(2, 1).unwrap();
        assert_eq!(huge, Duration::MAX);
    }

    #[test]
    fn float_seconds_clamp_degenerate_input() {
        assert_eq!(Duration::from_secs_f64(-0.5), Duration::ZERO);
        assert_eq!(Duration::from_secs_f64(f64::NAN), Duration::ZERO);
        assert_eq!(Duration::from_secs_f64(0.0333), Duration::from_micros(33_300));
    }

    #[test]
    fn std_duration_conversions() {
        let d: Duration = std::time::Duration::from_micros(1500).into();
        assert_eq!(d, Duration::from_micros(1500));
        let back: std::time::Duration = Duration::from_picos(17_982_456).into();
        assert_eq!(back, std::time::Duration::from_nanos(17_982));
    }

    #[test]
    fn display_shows_fractional_nanoseconds() {
        assert_eq!(Duration::from_picos(17_982_456).to_string(), "17982.456ns");
        assert_eq!(Duration::from_nanos(5).to_string(), "5.000ns");
    }
}
