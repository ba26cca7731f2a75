use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::AppError;
use crate::utils::Timezone;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const TIME_OF_DAY_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    // Try YYYYMMDD
    if s.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d")
    {
        return Ok(d);
    }
    // Try YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    Err(AppError::InvalidDate {
        input: s.to_string(),
    })
}

/// Parse a `--at` value into an instant.
///
/// Accepts RFC 3339 (offset honoured), a wall-clock datetime in `timezone`,
/// or a bare time of day which is taken on `now`'s date in `timezone`.
pub(crate) fn parse_time(
    s: &str,
    timezone: Timezone,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, AppError> {
    let trimmed = s.trim();
    let invalid = || AppError::InvalidTime {
        input: trimmed.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return timezone.from_naive(naive).ok_or_else(invalid);
        }
    }

    for format in TIME_OF_DAY_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(trimmed, format) {
            let today = timezone.date_of(now);
            return timezone.from_naive(today.and_time(time)).ok_or_else(invalid);
        }
    }

    Err(invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> Timezone {
        Timezone::Named(chrono_tz::UTC)
    }

    fn now() -> DateTime<Utc> {
        "2024-01-01T15:00:00Z".parse().unwrap()
    }

    #[test]
    fn parse_date_accepts_both_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(parse_date("20240131").unwrap(), expected);
        assert_eq!(parse_date("2024-01-31").unwrap(), expected);
    }

    #[test]
    fn parse_date_rejects_garbage() {
        let err = parse_date("31/01/2024").unwrap_err();
        assert!(matches!(err, AppError::InvalidDate { .. }));
    }

    #[test]
    fn parse_time_rfc3339_keeps_offset() {
        let t = parse_time("2024-01-01T10:00:00+02:00", utc(), now()).unwrap();
        assert_eq!(t.to_rfc3339(), "2024-01-01T08:00:00+00:00");
    }

    #[test]
    fn parse_time_naive_datetime_uses_timezone() {
        let t = parse_time("2024-01-01T10:01:30", utc(), now()).unwrap();
        assert_eq!(t.to_rfc3339(), "2024-01-01T10:01:30+00:00");

        let t = parse_time("2024-01-01 10:01", utc(), now()).unwrap();
        assert_eq!(t.to_rfc3339(), "2024-01-01T10:01:00+00:00");
    }

    #[test]
    fn parse_time_time_of_day_is_today() {
        let t = parse_time("09:15", utc(), now()).unwrap();
        assert_eq!(t.to_rfc3339(), "2024-01-01T09:15:00+00:00");

        let t = parse_time("09:15:42", utc(), now()).unwrap();
        assert_eq!(t.to_rfc3339(), "2024-01-01T09:15:42+00:00");
    }

    #[test]
    fn parse_time_rejects_garbage() {
        let err = parse_time("half past nine", utc(), now()).unwrap_err();
        assert!(err.to_string().contains("half past nine"));
    }
}
