pub mod convert;
pub mod frame;

pub use convert::{calibrate, classify, convert};
pub use frame::{decode_frame, DecodedFrame};

use log::debug;

use crate::error::Result;
use crate::metadata::SensorTable;
use crate::models::Reading;

/// Decode one frame into a publishable reading.
///
/// Runs the full pipeline: field extraction, family classification, unit
/// conversion, and the sensor's linear calibration when the metadata
/// table carries one. Pure and synchronous; safe to call from any thread
/// since the table is only read.
pub fn analyze(frame: &[u8], table: &SensorTable) -> Result<Reading> {
    let decoded = decode_frame(frame)?;
    let family = classify(decoded.sensor_id)?;
    let mut converted = convert(family, decoded.raw);

    let info = table.get(decoded.sensor_id);
    if let Some(cal) = info.and_then(|info| info.calibration.as_ref()) {
        converted = calibrate(converted, cal);
    }

    debug!(
        "sensor {}: {} {} at {}",
        decoded.sensor_id, converted.value, converted.unit, decoded.timestamp
    );

    Ok(Reading::new(
        decoded.sensor_id,
        decoded.timestamp,
        info.and_then(|info| info.name.clone()),
        info.map(|info| info.mqtt.clone()).unwrap_or_default(),
        converted,
    ))
}
