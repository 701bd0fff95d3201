//! Gain codec for sensors that take gain as a milli-decibel code.

use crate::sensor_model::gain::codec::GainCodec;
use crate::sensor_model::gain::types::GainCode;
use crate::sensor_model::observer::{TimingObserver, TracingObserver};

/// Smallest linear gain fed to the logarithm; anything at or below zero is
/// raised to this.
pub const GAIN_FLOOR: f64 = 1e-9;

/// 20 dB per decade of amplitude gain, expressed in milli-decibels.
pub const MILLI_DB_PER_DECADE: f64 = 20_000.0;

/// `code = round(20000 * log10(gain))`, clamped at zero.
///
/// Gains below unity would produce negative codes, which this register
/// format cannot hold, so they all encode to [`GainCode::UNITY`].
#[derive(Debug, Clone, Default)]
pub struct MilliDecibelCodec<O: TimingObserver = TracingObserver> {
    observer: O,
}

impl MilliDecibelCodec<TracingObserver> {
    pub fn new() -> Self {
        Self {
            observer: TracingObserver,
        }
    }
}

impl<O: TimingObserver> MilliDecibelCodec<O> {
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }
}

impl<O: TimingObserver> GainCodec for MilliDecibelCodec<O> {
    fn encode(&self, gain: f64) -> GainCode {
        // f64::max ignores a NaN operand, so NaN lands on the floor too
        let g = gain.max(GAIN_FLOOR);
        let mdb = (MILLI_DB_PER_DECADE * g.log10()).round();
        let code = GainCode(mdb.clamp(0.0, f64::from(u32::MAX)) as u32);
        self.observer.gain_encoded(gain, code);
        code
    }

    fn decode(&self, code: GainCode) -> f64 {
        10f64.powf(f64::from(code.value()) / MILLI_DB_PER_DECADE)
    }
}
