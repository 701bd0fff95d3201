//! Blanking and exposure timing module
//!
//! Turns an exposure request and a frame-duration window into the vertical
//! and horizontal blanking a sensor must be programmed with, and reports
//! the exposure the sensor will really deliver.

mod model;
mod policy;
pub mod types;


pub use model::TimingModel;
pub use policy::{BlankingPolicy, exposure_from_lines, exposure_lines};
pub use types::{
    BlankingResult, BlankingTrace, DEFAULT_FRAME_INTEGRATION_DIFF, DEFAULT_HMAX_BASE,
    DEFAULT_LANE_COUNT, DEFAULT_WIDE_MODE_THRESHOLD, HmaxTable, PixelRateTiming, PolicyKind,
    PolicySelection, TimingConfig, TimingConfigBuilder,
};
