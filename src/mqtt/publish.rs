/// Reading publication: template expansion and per-target delivery
use log::{info, warn};
use rumqttc::AsyncClient;

use crate::models::Reading;
use crate::mqtt::connection::qos_level;
use crate::utils::format_datetime;

/// Expand the named placeholders of a topic or payload template.
///
/// Unknown placeholders are left untouched. An unnamed sensor renders
/// as "Unknown".
fn render(template: &str, reading: &Reading) -> String {
    template
        .replace("{id}", &reading.id().to_string())
        .replace("{name}", reading.name().unwrap_or("Unknown"))
        .replace("{time}", &format_datetime(reading.timestamp()))
        .replace("{timestamp}", &reading.timestamp().to_string())
        .replace("{value}", &reading.value().to_string())
        .replace("{unit}", reading.unit())
}

/// Publish a reading to each of its configured targets.
///
/// Targets missing TOPIC or PAYLOAD are skipped with a warning; a failed
/// publish is logged and does not abort the remaining targets.
pub async fn publish_reading(client: &AsyncClient, reading: &Reading, qos: u8) {
    for target in reading.targets() {
        let topic_template = match &target.topic {
            Some(topic) => topic,
            None => {
                warn!("publish target for sensor {} has no TOPIC set", reading.id());
                continue;
            }
        };
        let payload_template = match &target.payload {
            Some(payload) => payload,
            None => {
                warn!(
                    "publish target for sensor {} has no PAYLOAD set",
                    reading.id()
                );
                continue;
            }
        };

        let topic = render(topic_template, reading);
        let payload = render(payload_template, reading);

        match client
            .publish(&topic, qos_level(qos), false, payload.into_bytes())
            .await
        {
            Ok(()) => info!("published sensor {} to {}", reading.id(), topic),
            Err(e) => warn!("publish to {} failed: {}", topic, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConvertedValue, Reading};

    fn sample_reading(name: Option<&str>) -> Reading {
        Reading::new(
            16384,
            1_446_684_800,
            name.map(str::to_string),
            Vec::new(),
            ConvertedValue {
                value: -40.6,
                unit: "degC",
            },
        )
    }

    #[test]
    fn render_expands_all_placeholders() {
        let out = render(
            "{id}/{name}/{timestamp}/{value}/{unit}",
            &sample_reading(Some("Office")),
        );
        assert_eq!(out, "16384/Office/1446684800/-40.6/degC");
    }

    #[test]
    fn render_formats_the_time_field() {
        let out = render("{time}", &sample_reading(None));
        assert_eq!(out, "05.11.2015 - 00:53:20");
    }

    #[test]
    fn unnamed_sensor_renders_as_unknown() {
        let out = render("home/{name}", &sample_reading(None));
        assert_eq!(out, "home/Unknown");
    }

    #[test]
    fn unknown_placeholders_are_left_alone() {
        let out = render("{nope} {value}", &sample_reading(None));
        assert_eq!(out, "{nope} -40.6");
    }
}
