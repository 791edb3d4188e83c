use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use mongodb::bson::Bson;
use thiserror::Error;

/// # Health Status Response
///
/// Represents the operational status of the service with a timestamp.
/// Used as the response format for the health check endpoint.
///
/// ## Fields
/// - `status`: String indicating service availability ("UP" or "DOWN")
/// - `timestamp`: ISO 8601 formatted timestamp of the status check
///
/// ## Example JSON
/// ```json
/// {
///   "status": "UP",
///   "timestamp": "2024-03-10T15:30:45.123456789+00:00"
/// }
/// ```
pub mod health;

/// Liveness records submitted by named clients.
pub mod status;

/// Contact-form submissions and the response projection returned to callers.
pub mod contact;

/// Failure to turn a stored document back into a model.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Decode(#[from] mongodb::bson::de::Error),

    #[error("field `{field}` holds an unreadable timestamp: {value}")]
    Timestamp { field: &'static str, value: String },
}

/// Renders a timestamp the way it is persisted: RFC 3339 with an explicit offset.
pub fn to_iso(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339()
}

/// Reads a persisted timestamp.
///
/// Records written by this service hold RFC 3339 strings. ISO 8601 strings
/// without an offset are taken as UTC, and native BSON datetimes written by
/// other tools are accepted as well.
pub fn parse_timestamp(field: &'static str, value: &Bson) -> Result<DateTime<Utc>, DocumentError> {
    match value {
        Bson::String(text) => parse_iso(text).ok_or_else(|| DocumentError::Timestamp {
            field,
            value: text.clone(),
        }),
        Bson::DateTime(native) => DateTime::from_timestamp_millis(native.timestamp_millis())
            .ok_or_else(|| DocumentError::Timestamp {
                field,
                value: native.to_string(),
            }),
        other => Err(DocumentError::Timestamp {
            field,
            value: other.to_string(),
        }),
    }
}

fn parse_iso(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    let naive = text
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    Some(naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_iso_string() {
        let value = Bson::String("2024-03-10T15:30:45.123456+00:00".to_string());
        let parsed = parse_timestamp("timestamp", &value).unwrap();
        assert_eq!(parsed.timestamp_micros(), 1_710_084_645_123_456);
    }

    #[test]
    fn test_parse_offset_is_normalised_to_utc() {
        let value = Bson::String("2024-03-10T17:30:45+02:00".to_string());
        let parsed = parse_timestamp("timestamp", &value).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 10, 15, 30, 45).unwrap());
    }

    #[test]
    fn test_parse_string_without_offset_is_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 10, 15, 30, 45).unwrap();
        for text in ["2024-03-10T15:30:45", "2024-03-10 15:30:45"] {
            let value = Bson::String(text.to_string());
            assert_eq!(parse_timestamp("timestamp", &value).unwrap(), expected, "{}", text);
        }

        let value = Bson::String("2024-03-10T15:30:45.250".to_string());
        assert_eq!(
            parse_timestamp("timestamp", &value).unwrap().timestamp_millis(),
            expected.timestamp_millis() + 250
        );
    }

    #[test]
    fn test_parse_date_only_is_midnight_utc() {
        let value = Bson::String("2024-03-10".to_string());
        assert_eq!(
            parse_timestamp("timestamp", &value).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_native_datetime() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 10, 15, 30, 45).unwrap();
        let value = Bson::DateTime(mongodb::bson::DateTime::from_millis(
            expected.timestamp_millis(),
        ));
        assert_eq!(parse_timestamp("created_at", &value).unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_timestamp("created_at", &Bson::String("yesterday".into())).unwrap_err();
        assert!(err.to_string().contains("created_at"));

        assert!(parse_timestamp("created_at", &Bson::Int32(5)).is_err());
    }

    #[test]
    fn test_iso_round_trips_through_parse() {
        let now = Utc::now();
        let stored = Bson::String(to_iso(&now));
        assert_eq!(parse_timestamp("timestamp", &stored).unwrap(), now);
    }
}
