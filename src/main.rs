use sensor_timing_rs::logger;
use sensor_timing_rs::sensor_model::{CameraHelper, Duration, SensorModeDescriptor};

use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting sensor timing sweep...");

    let mode = SensorModeDescriptor::builder()
        .resolution(3280, 2464)
        .bit_depth(10)
        .pixel_rate(182_400_000)
        .build()?;
    let helper = CameraHelper::new(mode)?;

    info!(
        mistrust_frames = helper.mistrust_frames_mode_switch(),
        embedded_data = helper.sensor_embedded_data_present(),
        "Camera helper initialized"
    );

    let frame_duration = Duration::from_micros(66_666);
    for millis in [1, 10, 33, 66, 100] {
        let mut exposure = Duration::from_millis(millis);
        match helper.get_blanking(&mut exposure, frame_duration, Duration::from_millis(200)) {
            Ok(blanking) => info!(
                requested_ms = millis,
                exposure_ms = exposure.as_millis_f64(),
                vblank = blanking.vertical_blank_lines,
                hblank = blanking.horizontal_blank_lines,
                "Blanking computed"
            ),
            Err(e) => warn!(requested_ms = millis, "Blanking rejected: {}", e),
        }
    }

    for gain in [1.0, 2.0, 4.0, 8.0, 16.0] {
        let code = helper.gain_code(gain);
        info!(gain, %code, decoded = helper.gain(code), "Gain code");
    }

    Ok(())
}
