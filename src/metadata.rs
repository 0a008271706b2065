/// Per-sensor metadata table loaded from sensor.json
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{LoggerError, Result};

/// One publish destination: topic and payload templates with named
/// placeholders ({id}, {name}, {time}, {timestamp}, {value}, {unit}).
#[derive(Debug, Clone, Deserialize)]
pub struct PublishTarget {
    #[serde(rename = "TOPIC")]
    pub topic: Option<String>,
    #[serde(rename = "PAYLOAD")]
    pub payload: Option<String>,
}

/// Linear per-sensor correction applied after unit conversion.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Calibration {
    #[serde(rename = "SCALE", default = "default_scale")]
    pub scale: f64,
    #[serde(rename = "OFFSET", default)]
    pub offset: f64,
}

fn default_scale() -> f64 {
    1.0
}

/// Metadata for one sensor. Every field is optional; a sensor without an
/// entry decodes fine, it just has no name, no publish targets and no
/// calibration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SensorInfo {
    #[serde(rename = "NAME")]
    pub name: Option<String>,
    #[serde(rename = "MQTT", default)]
    pub mqtt: Vec<PublishTarget>,
    #[serde(rename = "CALIBRATION")]
    pub calibration: Option<Calibration>,
}

/// Immutable sensor metadata table, keyed by decimal sensor id.
///
/// Loaded once at startup and passed by shared reference into the decode
/// pipeline; never mutated afterwards, so concurrent lookups need no
/// locking.
#[derive(Debug, Clone, Default)]
pub struct SensorTable {
    entries: HashMap<String, SensorInfo>,
}

impl SensorTable {
    /// Load the table from a JSON file.
    ///
    /// A missing or malformed file is fatal; an empty table is fine.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| LoggerError::MetadataLoad(format!("{}: {}", path.display(), e)))?;
        Self::parse(&raw)
            .map_err(|e| LoggerError::MetadataLoad(format!("{}: {}", path.display(), e)))
    }

    pub(crate) fn parse(raw: &str) -> serde_json::Result<Self> {
        let entries = serde_json::from_str(raw)?;
        Ok(Self { entries })
    }

    pub fn get(&self, sensor_id: u32) -> Option<&SensorInfo> {
        self.entries.get(&sensor_id.to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
