mod config;
mod decode;
mod device;
mod error;
mod metadata;
mod models;
mod mqtt;
mod utils;

use log::{debug, error, info, warn};
use std::path::Path;
use tokio::time::{sleep, Duration};

use config::AppConfig;
use device::Tl500;
use error::Result;
use metadata::SensorTable;
use mqtt::publish_reading;
use utils::unix_now;

const RECONNECT_DELAY_SECS: u64 = 30;
const IDLE_DELAY_SECS: u64 = 30;
const DRAIN_DELAY_MS: u64 = 50;
/// Readings older than this are stale ring-buffer replays, not published.
const MAX_READING_AGE_SECS: i64 = 1800;

async fn main_loop(config: AppConfig, table: SensorTable) -> Result<()> {
    info!("starting templogger service");

    let client = mqtt::connect(&config.mqtt);
    let device_path = Path::new(&config.device.path);

    loop {
        // (Re)open the device, backing off while it is unavailable
        let mut device = match Tl500::open(device_path).await {
            Ok(device) => device,
            Err(e) => {
                error!("failed to open {}: {}", config.device.path, e);
                sleep(Duration::from_secs(RECONNECT_DELAY_SECS)).await;
                continue;
            }
        };

        // Drain the station until an I/O error forces a reopen
        loop {
            match device.read_frame().await {
                Ok(Some(frame)) => {
                    match decode::analyze(&frame, &table) {
                        Ok(reading) => {
                            if unix_now() - reading.timestamp() < MAX_READING_AGE_SECS {
                                publish_reading(&client, &reading, config.mqtt.qos).await;
                            } else {
                                debug!("skipping stale reading from sensor {}", reading.id());
                            }
                        }
                        Err(e) => warn!("dropping frame: {}", e),
                    }
                    // The station replays its buffer one frame per request
                    sleep(Duration::from_millis(DRAIN_DELAY_MS)).await;
                }
                Ok(None) => sleep(Duration::from_secs(IDLE_DELAY_SECS)).await,
                Err(e) => {
                    error!("device read failed: {}", e);
                    break;
                }
            }
        }

        sleep(Duration::from_secs(RECONNECT_DELAY_SECS)).await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("failed to load configuration: {}", e);
            return Err(e);
        }
    };

    // Load the sensor metadata table; an empty table is fine, a load
    // failure is not
    let table = match SensorTable::load(&config::config_dir().join("sensor.json")) {
        Ok(table) => table,
        Err(e) => {
            error!("failed to load sensor metadata: {}", e);
            return Err(e);
        }
    };
    if table.is_empty() {
        warn!("sensor metadata table is empty, readings will be unnamed and unpublished");
    } else {
        info!("loaded metadata for {} sensors", table.len());
    }

    // Handle Ctrl+C gracefully
    let (tx, mut rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        let _ = tx.send(());
    });

    // Run main loop or wait for shutdown signal
    tokio::select! {
        result = main_loop(config, table) => {
            if let Err(e) = result {
                error!("fatal error: {}", e);
                return Err(e);
            }
        }
        _ = &mut rx => {
            info!("program terminated by user, exiting gracefully");
        }
    }

    Ok(())
}
