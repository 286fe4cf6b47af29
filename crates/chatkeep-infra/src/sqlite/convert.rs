//! Conversions between SQLite values/errors and domain types.

use chatkeep_types::error::RepositoryError;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::error::ErrorKind;

/// Classify a sqlx error by its structure.
///
/// Constraint violations are recognized through `DatabaseError::kind()`
/// (SQLite extended result codes), never through the message text.
pub fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::UniqueViolation => RepositoryError::Conflict(db_err.message().to_string()),
            ErrorKind::ForeignKeyViolation => {
                RepositoryError::MissingReference(db_err.message().to_string())
            }
            _ => RepositoryError::Query(err.to_string()),
        },
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection
        }
        _ => RepositoryError::Query(err.to_string()),
    }
}

pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Drop precision the text column cannot hold.
///
/// Values returned from a write must equal what a later read parses back.
pub fn truncate_to_storage(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.trunc_subsecs(6)
}

/// Fixed-width RFC 3339 (microseconds, `Z`), so text order is time order.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_format_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let fractional = whole + Duration::microseconds(1);
        assert_eq!(format_datetime(&whole), "2024-05-01T12:00:00.000000Z");
        assert_eq!(format_datetime(&whole).len(), format_datetime(&fractional).len());
    }

    #[test]
    fn test_text_order_matches_time_order() {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let times = [
            base,
            base + Duration::microseconds(5),
            base + Duration::milliseconds(900),
            base + Duration::seconds(1),
        ];
        let formatted: Vec<String> = times.iter().map(format_datetime).collect();
        let mut sorted = formatted.clone();
        sorted.sort();
        assert_eq!(formatted, sorted);
    }

    #[test]
    fn test_parse_round_trips_formatted_value() {
        let now = Utc::now();
        let parsed = parse_datetime(&format_datetime(&now)).unwrap();
        assert_eq!(parsed.timestamp_micros(), now.timestamp_micros());
    }

    #[test]
    fn test_truncated_value_survives_storage_exactly() {
        let stamped = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let stored = truncate_to_storage(stamped);
        assert_eq!(stored, Utc.timestamp_opt(1_700_000_000, 123_456_000).unwrap());
        assert_eq!(parse_datetime(&format_datetime(&stored)).unwrap(), stored);
    }

    #[test]
    fn test_parse_invalid_datetime() {
        let err = parse_datetime("yesterday").unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));
    }

    #[test]
    fn test_pool_errors_are_connection_errors() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            RepositoryError::Connection
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            RepositoryError::Query(_)
        ));
    }
}
