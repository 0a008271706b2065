use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::error::{LoggerError, Result};

/// Config directory, overridable via TEMPLOGGER_CONFIG_DIR.
pub fn config_dir() -> PathBuf {
    env::var("TEMPLOGGER_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"))
}

/// Application settings from config.json.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(rename = "MQTT", default)]
    pub mqtt: MqttSettings,
    #[serde(rename = "DEVICE", default)]
    pub device: DeviceSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MqttSettings {
    #[serde(rename = "BROKER_ADDRESS", default = "default_broker_address")]
    pub broker_address: String,
    #[serde(rename = "BROKER_PORT", default = "default_broker_port")]
    pub broker_port: u16,
    #[serde(rename = "CLIENT_NAME", default = "default_client_name")]
    pub client_name: String,
    #[serde(rename = "AUTHENTICATION", default)]
    pub authentication: bool,
    #[serde(rename = "USERNAME")]
    pub username: Option<String>,
    #[serde(rename = "PASSWORD")]
    pub password: Option<String>,
    #[serde(rename = "KEEP_ALIVE", default = "default_keep_alive")]
    pub keep_alive: u64,
    #[serde(rename = "QOS", default)]
    pub qos: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceSettings {
    #[serde(rename = "PATH", default = "default_device_path")]
    pub path: String,
}

fn default_broker_address() -> String {
    "localhost".to_string()
}

fn default_broker_port() -> u16 {
    1883
}

fn default_client_name() -> String {
    "mqtt_templogger_client".to_string()
}

fn default_keep_alive() -> u64 {
    60
}

fn default_device_path() -> String {
    "/dev/hidraw0".to_string()
}

impl Default for MqttSettings {
    fn default() -> Self {
        Self {
            broker_address: default_broker_address(),
            broker_port: default_broker_port(),
            client_name: default_client_name(),
            authentication: false,
            username: None,
            password: None,
            keep_alive: default_keep_alive(),
            qos: 0,
        }
    }
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            path: default_device_path(),
        }
    }
}

impl AppConfig {
    /// Load config.json from the config directory.
    ///
    /// A .env file is honored first so TEMPLOGGER_CONFIG_DIR can live
    /// there. A missing or malformed file is fatal at startup.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let path = config_dir().join("config.json");
        let raw = fs::read_to_string(&path)
            .map_err(|e| LoggerError::ConfigLoad(format!("{}: {}", path.display(), e)))?;
        Self::parse(&raw)
            .map_err(|e| LoggerError::ConfigLoad(format!("{}: {}", path.display(), e)))
    }

    pub(crate) fn parse(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
