/// Sensor family classification and raw value conversion
use log::debug;

use crate::error::{LoggerError, Result};
use crate::metadata::Calibration;
use crate::models::{ConvertedValue, SensorFamily};

/// Identifier dispatch rules, evaluated top to bottom, first match wins.
/// Each family has a legacy 16-bit pattern and an extended-form pattern.
const FAMILY_RULES: &[(u32, u32, SensorFamily)] = &[
    (0x6001, 0x2000, SensorFamily::Tl3Tsn),
    (0x3_0001, 0x2_0000, SensorFamily::Tl3Tsn),
    (0xF001, 0x4000, SensorFamily::Th70eTemp),
    (0x3_0001, 0x3_0000, SensorFamily::Th70eTemp),
    (0xF001, 0x4001, SensorFamily::Th70eHumidity),
    (0x3_0001, 0x3_0001, SensorFamily::Th70eHumidity),
];

/// Map a sensor id onto its hardware family via the bit-mask rule table.
pub fn classify(sensor_id: u32) -> Result<SensorFamily> {
    for &(mask, expected, family) in FAMILY_RULES {
        if sensor_id & mask == expected {
            debug!("sensor {} classified as {:?}", sensor_id, family);
            return Ok(family);
        }
    }
    Err(LoggerError::UnknownSensor(sensor_id))
}

/// Convert a raw signed sample to a physical value for its family.
pub fn convert(family: SensorFamily, raw: i16) -> ConvertedValue {
    let raw = raw as f64;
    match family {
        SensorFamily::Tl3Tsn => ConvertedValue {
            value: 0.0078125 * raw,
            unit: "degC",
        },
        SensorFamily::Th70eTemp => ConvertedValue {
            value: 0.01 * raw - 39.6,
            unit: "degC",
        },
        // The quadratic term squares the signed raw value
        SensorFamily::Th70eHumidity => ConvertedValue {
            value: -4.0 + 0.0405 * raw - 0.0000028 * raw * raw,
            unit: "RH%",
        },
    }
}

/// Apply a linear per-sensor calibration; the unit is unchanged.
pub fn calibrate(converted: ConvertedValue, cal: &Calibration) -> ConvertedValue {
    ConvertedValue {
        value: cal.scale * converted.value + cal.offset,
        unit: converted.unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifier_routes_known_families() {
        let vectors: &[(u32, SensorFamily)] = &[
            // legacy forms
            (0x2000, SensorFamily::Tl3Tsn),
            (0x2A34, SensorFamily::Tl3Tsn),
            (0x4000, SensorFamily::Th70eTemp),
            (0x4A34, SensorFamily::Th70eTemp),
            (0x4001, SensorFamily::Th70eHumidity),
            (0x4A35, SensorFamily::Th70eHumidity),
            // extended forms
            (0x2_0000, SensorFamily::Tl3Tsn),
            (0x2_1234, SensorFamily::Tl3Tsn),
            (0x3_0000, SensorFamily::Th70eTemp),
            (0x3_1234, SensorFamily::Th70eTemp),
            (0x3_0001, SensorFamily::Th70eHumidity),
            (0x3_1235, SensorFamily::Th70eHumidity),
        ];
        for &(id, family) in vectors {
            assert_eq!(classify(id).unwrap(), family, "id {:#x}", id);
        }
    }

    #[test]
    fn classifier_rejects_unknown_ids() {
        for id in [0u32, 0x8000, 0x6001, 0x1_0000] {
            match classify(id) {
                Err(LoggerError::UnknownSensor(reported)) => assert_eq!(reported, id),
                other => panic!("id {:#x}: expected UnknownSensor, got {:?}", id, other),
            }
        }
    }

    #[test]
    fn tl3tsn_formula() {
        let v = convert(SensorFamily::Tl3Tsn, 128);
        assert_eq!(v.value, 1.0);
        assert_eq!(v.unit, "degC");
    }

    #[test]
    fn th70e_temp_formula() {
        let v = convert(SensorFamily::Th70eTemp, 4000);
        assert!((v.value - 0.4).abs() < 1e-9);
        assert_eq!(v.unit, "degC");
    }

    #[test]
    fn th70e_humidity_polynomial() {
        let v = convert(SensorFamily::Th70eHumidity, 1000);
        assert!((v.value - 33.7).abs() < 1e-9);
        assert_eq!(v.unit, "RH%");
    }

    #[test]
    fn humidity_squares_the_signed_raw_value() {
        // Same quadratic term as raw = 1000, opposite linear term
        let v = convert(SensorFamily::Th70eHumidity, -1000);
        assert!((v.value - (-47.3)).abs() < 1e-9);
    }

    #[test]
    fn negative_raw_values_convert() {
        let v = convert(SensorFamily::Th70eTemp, -100);
        assert_eq!(v.value, -40.6);
    }

    #[test]
    fn calibration_rescales_linearly() {
        let cal = Calibration {
            scale: 2.0,
            offset: -1.0,
        };
        let out = calibrate(
            ConvertedValue {
                value: 10.0,
                unit: "degC",
            },
            &cal,
        );
        assert_eq!(out.value, 19.0);
        assert_eq!(out.unit, "degC");
    }
}
