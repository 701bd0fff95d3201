//! Sensor mode descriptor types

use crate::sensor_model::common::{Duration, REGISTER_MAX, Result, SensorModelError};

/// Static description of the sensor's current readout mode.
///
/// Supplied by the caller on every mode switch and never mutated by the
/// timing model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorModeDescriptor {
    /// Active width in pixels
    pub width: u32,
    /// Active height in lines
    pub height: u32,
    /// Bits per output sample (e.g. 8, 10 or 12)
    pub bit_depth: u32,
    /// Pixel clock rate in Hz
    pub pixel_rate: u64,
    /// Shortest line time the sensor supports in this mode
    pub min_line_length: Duration,
    /// Longest line time the sensor supports in this mode
    pub max_line_length: Duration,
    /// Largest frame length in lines the frame-length register accepts
    pub max_frame_length: u32,
}

impl SensorModeDescriptor {
    pub fn builder() -> SensorModeDescriptorBuilder {
        SensorModeDescriptorBuilder::default()
    }

    /// Checks every static precondition the timing model relies on.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SensorModelError::InvalidDimensions(self.width, self.height));
        }

        if self.pixel_rate == 0 {
            return Err(SensorModelError::InvalidPixelRate(self.pixel_rate));
        }

        if self.min_line_length.is_zero() || self.min_line_length > self.max_line_length {
            return Err(SensorModelError::InvalidLineLength {
                min: self.min_line_length,
                max: self.max_line_length,
            });
        }

        check_register("width", self.width)?;
        check_register("height", self.height)?;
        check_register("max_frame_length", self.max_frame_length)?;

        // Active rows must fit inside the longest programmable frame
        if self.height > self.max_frame_length {
            return Err(SensorModelError::InvalidDimensions(self.width, self.height));
        }

        Ok(())
    }

    /// Duration of a line of `line_length_pck` pixel clocks.
    pub fn line_length_pck_to_duration(&self, line_length_pck: u32) -> Duration {
        Duration::from_pixel_clocks(u64::from(line_length_pck), self.pixel_rate)
            .unwrap_or(Duration::ZERO)
    }

    /// Whole pixel clocks in a line of the given duration.
    pub fn line_length_to_pixels(&self, line_length: Duration) -> u32 {
        u32::try_from(line_length.to_pixel_clocks(self.pixel_rate)).unwrap_or(u32::MAX)
    }
}

fn check_register(field: &'static str, value: u32) -> Result<()> {
    if value > REGISTER_MAX {
        return Err(SensorModelError::RegisterOverflow {
            field,
            value: u64::from(value),
            limit: REGISTER_MAX,
        });
    }
    Ok(())
}

/// Builder for SensorModeDescriptor
///
/// `build` validates the descriptor, so an invalid mode never reaches the
/// per-frame computation.
#[derive(Default)]
pub struct SensorModeDescriptorBuilder {
    width: Option<u32>,
    height: Option<u32>,
    bit_depth: Option<u32>,
    pixel_rate: Option<u64>,
    min_line_length: Option<Duration>,
    max_line_length: Option<Duration>,
    max_frame_length: Option<u32>,
}

impl SensorModeDescriptorBuilder {
    pub fn resolution(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn bit_depth(mut self, bits: u32) -> Self {
        self.bit_depth = Some(bits);
        self
    }

    pub fn pixel_rate(mut self, hz: u64) -> Self {
        self.pixel_rate = Some(hz);
        self
    }

    pub fn line_length(mut self, min: Duration, max: Duration) -> Self {
        self.min_line_length = Some(min);
        self.max_line_length = Some(max);
        self
    }

    pub fn max_frame_length(mut self, lines: u32) -> Self {
        self.max_frame_length = Some(lines);
        self
    }

    /// Missing line lengths default to the width-driven line time, and a
    /// missing frame-length limit defaults to the full register range.
    pub fn build(self) -> Result<SensorModeDescriptor> {
        let width = self.width.unwrap_or(0);
        let height = self.height.unwrap_or(0);
        let pixel_rate = self.pixel_rate.unwrap_or(0);
        let width_line = Duration::from_pixel_clocks(u64::from(width), pixel_rate)
            .unwrap_or(Duration::ZERO);
        let min_line_length = self.min_line_length.unwrap_or(width_line);

        let mode = SensorModeDescriptor {
            width,
            height,
            bit_depth: self.bit_depth.unwrap_or(10),
            pixel_rate,
            min_line_length,
            max_line_length: self.max_line_length.unwrap_or(min_line_length),
            max_frame_length: self.max_frame_length.unwrap_or(REGISTER_MAX),
        };
        mode.validate()?;
        Ok(mode)
    }
}
