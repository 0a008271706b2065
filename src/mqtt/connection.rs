/// MQTT broker connection setup and event loop driver
use log::{debug, error, warn};
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, QoS};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::MqttSettings;

const EVENT_LOOP_CAPACITY: usize = 100;
const RECONNECT_BACKOFF_SECS: u64 = 5;

/// Build the async client and spawn the task driving its event loop.
///
/// rumqttc reconnects on the next poll after a connection error, so the
/// driver only logs and backs off briefly.
pub fn connect(settings: &MqttSettings) -> AsyncClient {
    let mut options = MqttOptions::new(
        &settings.client_name,
        &settings.broker_address,
        settings.broker_port,
    );
    options.set_keep_alive(Duration::from_secs(settings.keep_alive));

    if settings.authentication {
        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            options.set_credentials(username, password);
        } else {
            warn!("AUTHENTICATION set but USERNAME/PASSWORD missing");
        }
    }

    let (client, event_loop) = AsyncClient::new(options, EVENT_LOOP_CAPACITY);
    tokio::spawn(drive(event_loop));
    client
}

async fn drive(mut event_loop: EventLoop) {
    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(packet)) => debug!("mqtt incoming: {:?}", packet),
            Ok(_) => {}
            Err(e) => {
                error!("mqtt connection error: {:?}", e);
                sleep(Duration::from_secs(RECONNECT_BACKOFF_SECS)).await;
            }
        }
    }
}

/// Map the numeric QoS level from the config file onto the protocol enum.
pub fn qos_level(qos: u8) -> QoS {
    match qos {
        0 => QoS::AtMostOnce,
        1 => QoS::AtLeastOnce,
        2 => QoS::ExactlyOnce,
        other => {
            warn!("invalid QOS {}, using 0", other);
            QoS::AtMostOnce
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qos_levels_map_onto_protocol_enum() {
        assert_eq!(qos_level(0), QoS::AtMostOnce);
        assert_eq!(qos_level(1), QoS::AtLeastOnce);
        assert_eq!(qos_level(2), QoS::ExactlyOnce);
        assert_eq!(qos_level(7), QoS::AtMostOnce);
    }
}
