//! Gain codec module
//!
//! Converts between linear analog gain and the logarithmic gain code the
//! sensor's gain register expects.

mod codec;
mod milli_decibel_codec;
pub mod types;

pub use codec::GainCodec;
pub use milli_decibel_codec::{GAIN_FLOOR, MILLI_DB_PER_DECADE, MilliDecibelCodec};
pub use types::GainCode;
