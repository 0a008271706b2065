use crate::metadata::PublishTarget;

/// Hardware family of a sensor, selecting its conversion formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorFamily {
    /// TL-3TSN and TSN-50E temperature sensors (shared formula)
    Tl3Tsn,
    /// TSN-TH70E temperature channel
    Th70eTemp,
    /// TSN-TH70E humidity channel
    Th70eHumidity,
}

/// A physical value and its unit label, before display rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertedValue {
    pub value: f64,
    pub unit: &'static str,
}

/// One decoded, converted and calibrated measurement, ready for publishing.
///
/// Immutable after construction. The stored value is rounded to 2 decimal
/// places, half away from zero; the unrounded value is not retained.
#[derive(Debug, Clone)]
pub struct Reading {
    id: u32,
    timestamp: i64,
    name: Option<String>,
    targets: Vec<PublishTarget>,
    value: f64,
    unit: &'static str,
}

impl Reading {
    pub fn new(
        id: u32,
        timestamp: i64,
        name: Option<String>,
        targets: Vec<PublishTarget>,
        converted: ConvertedValue,
    ) -> Self {
        Self {
            id,
            timestamp,
            name,
            targets,
            value: (converted.value * 100.0).round() / 100.0, // 2 decimal places
            unit: converted.unit,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Unix epoch seconds of the measurement.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn targets(&self) -> &[PublishTarget] {
        &self.targets
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &'static str {
        self.unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading_with(value: f64) -> Reading {
        Reading::new(
            0x4000,
            0,
            None,
            Vec::new(),
            ConvertedValue {
                value,
                unit: "degC",
            },
        )
    }

    #[test]
    fn value_rounds_half_away_from_zero() {
        // 12.345 * 100.0 and 12.005 * 100.0 are exactly 1234.5 and 1200.5
        // as doubles, so these hit the tie-break for real
        assert_eq!(reading_with(12.345).value(), 12.35);
        assert_eq!(reading_with(12.005).value(), 12.01);
        assert_eq!(reading_with(-12.345).value(), -12.35);
        assert_eq!(reading_with(12.344).value(), 12.34);
    }

    #[test]
    fn two_decimal_values_survive_rounding() {
        assert_eq!(reading_with(-40.6).value(), -40.6);
        assert_eq!(reading_with(33.7).value(), 33.7);
        assert_eq!(reading_with(0.0).value(), 0.0);
    }

    #[test]
    fn accessors_expose_constructed_state() {
        let reading = Reading::new(
            0x2_0000,
            1_446_684_800,
            Some("Office".to_string()),
            Vec::new(),
            ConvertedValue {
                value: 1.0,
                unit: "RH%",
            },
        );
        assert_eq!(reading.id(), 0x2_0000);
        assert_eq!(reading.timestamp(), 1_446_684_800);
        assert_eq!(reading.name(), Some("Office"));
        assert!(reading.targets().is_empty());
        assert_eq!(reading.unit(), "RH%");
    }
}
