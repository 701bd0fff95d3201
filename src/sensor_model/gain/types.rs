//! Gain code types

use std::fmt;

/// Register value for analog gain, in milli-decibels.
///
/// Monotonically non-decreasing with linear gain; zero is unity gain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GainCode(pub u32);

impl GainCode {
    pub const UNITY: Self = Self(0);

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<GainCode> for u32 {
    fn from(code: GainCode) -> Self {
        code.0
    }
}

impl fmt::Display for GainCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mdB", self.0)
    }
}
