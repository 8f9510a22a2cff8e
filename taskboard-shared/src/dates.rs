/// Timestamp parsing shared by the API server and the client
///
/// Browsers and forms hand us dates in several shapes. The server stores
/// `TIMESTAMPTZ` values and the timeline needs comparable instants, so both
/// sides go through [`parse_timestamp`].
///
/// # Accepted Formats
///
/// - RFC 3339 with offset: `2024-01-01T09:30:00+02:00`, `2024-01-01T00:00:00Z`
/// - Naive date-time, read as UTC: `2024-01-01T09:30:00`, `2024-01-01T09:30:00.250`
/// - Date only, read as UTC midnight: `2024-01-01`
///
/// # Example
///
/// ```
/// use taskboard_shared::dates::parse_timestamp;
///
/// let ts = parse_timestamp("2024-01-01").unwrap();
/// assert_eq!(ts.to_rfc3339(), "2024-01-01T00:00:00+00:00");
/// ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Error returned when a string is not a recognizable timestamp
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    /// Input was empty or whitespace
    #[error("Timestamp is empty")]
    Empty,

    /// Input did not match any accepted format
    #[error("Unrecognized timestamp: {0}")]
    Unrecognized(String),
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses a timestamp string into a UTC instant
///
/// # Errors
///
/// Returns [`TimestampError::Empty`] for blank input and
/// [`TimestampError::Unrecognized`] when no format matches.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, TimestampError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimestampError::Empty);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(TimestampError::Unrecognized(trimmed.to_string()))
}

/// Parses an optional timestamp, treating `None` and blank strings as absent
///
/// # Errors
///
/// Returns an error only when a non-blank value fails to parse.
pub fn parse_optional_timestamp(
    input: Option<&str>,
) -> Result<Option<DateTime<Utc>>, TimestampError> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_timestamp(value).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let ts = parse_timestamp("2024-03-10T12:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 10, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_date_only_is_utc_midnight() {
        let ts = parse_timestamp("2024-01-01").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_datetime() {
        let ts = parse_timestamp("2024-05-06T07:08:09").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap());

        let ts = parse_timestamp("2024-05-06T07:08").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp("   "), Err(TimestampError::Empty));
        assert!(matches!(
            parse_timestamp("not-a-date"),
            Err(TimestampError::Unrecognized(_))
        ));
        assert!(parse_timestamp("2024-13-40").is_err());
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(parse_optional_timestamp(None), Ok(None));
        assert_eq!(parse_optional_timestamp(Some("  ")), Ok(None));
        assert!(parse_optional_timestamp(Some("2024-01-01")).unwrap().is_some());
        assert!(parse_optional_timestamp(Some("nope")).is_err());
    }
}
