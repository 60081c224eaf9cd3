use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Server-assigned identifiers are opaque strings.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Parse an ISO-8601 timestamp as sent by the API.
///
/// Accepts RFC 3339 (any offset), naive `YYYY-MM-DDTHH:MM:SS[.fff]` and plain
/// `YYYY-MM-DD`. Values without an offset are taken as UTC; a plain date is
/// UTC midnight.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// `deserialize_with` for entity timestamps, built on [`parse_timestamp`].
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp `{raw}`")))
}

/// Decode an optional string field where `null`, a missing key and `""` all
/// mean "absent".
///
/// The API reports unassigned tasks and tasks without a due date with an
/// empty string, so the distinction is not meaningful on the client.
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Optional {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        value: Option<String>,
    }

    fn decode(json: &str) -> Option<String> {
        serde_json::from_str::<Optional>(json).unwrap().value
    }

    #[test]
    fn missing_null_and_empty_decode_as_none() {
        assert_eq!(decode("{}"), None);
        assert_eq!(decode(r#"{"value": null}"#), None);
        assert_eq!(decode(r#"{"value": ""}"#), None);
        assert_eq!(decode(r#"{"value": "  "}"#), None);
    }

    #[test]
    fn present_value_is_kept() {
        assert_eq!(decode(r#"{"value": "u1"}"#), Some("u1".to_string()));
    }

    // -----------------------------------------------------------------------
    // Timestamps
    // -----------------------------------------------------------------------

    #[derive(Debug, Deserialize)]
    struct Stamped {
        #[serde(deserialize_with = "lenient_timestamp")]
        at: Timestamp,
    }

    fn stamp(raw: &str) -> Result<String, serde_json::Error> {
        serde_json::from_value::<Stamped>(serde_json::json!({ "at": raw }))
            .map(|s| s.at.to_rfc3339())
    }

    #[test]
    fn timestamp_accepts_offset_forms() {
        assert_eq!(stamp("2024-01-01T00:00:00Z").unwrap(), "2024-01-01T00:00:00+00:00");
        assert_eq!(
            stamp("2024-01-01T12:00:00+02:00").unwrap(),
            "2024-01-01T10:00:00+00:00"
        );
    }

    #[test]
    fn timestamp_without_offset_is_utc() {
        assert_eq!(stamp("2024-01-01T10:00:00").unwrap(), "2024-01-01T10:00:00+00:00");
        assert_eq!(
            stamp("2024-01-01T10:00:00.250").unwrap(),
            "2024-01-01T10:00:00.250+00:00"
        );
    }

    #[test]
    fn date_only_timestamp_is_utc_midnight() {
        assert_eq!(stamp("2024-01-01").unwrap(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn unparseable_timestamp_is_an_error() {
        let err = stamp("yesterday").unwrap_err();
        assert!(err.to_string().contains("invalid timestamp `yesterday`"));
    }
}
