/// Utility functions for timestamp handling and formatting
use time::{format_description, OffsetDateTime};

/// Format a unix timestamp for template expansion and logging
///
/// Converts unix epoch seconds to DD.MM.YYYY - HH:MM:SS (UTC).
/// Falls back to the raw seconds if the value is out of range.
pub fn format_datetime(unix_secs: i64) -> String {
    let format = format_description::parse("[day].[month].[year] - [hour]:[minute]:[second]")
        .expect("Failed to create format description");
    match OffsetDateTime::from_unix_timestamp(unix_secs) {
        Ok(dt) => dt.format(&format).unwrap_or_else(|_| unix_secs.to_string()),
        Err(_) => unix_secs.to_string(),
    }
}

/// Current unix epoch seconds, used for the reading staleness check.
pub fn unix_now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_unix_seconds_as_utc() {
        assert_eq!(format_datetime(0), "01.01.1970 - 00:00:00");
        assert_eq!(format_datetime(1_446_684_800), "05.11.2015 - 00:53:20");
    }
}
