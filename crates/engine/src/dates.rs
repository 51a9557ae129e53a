//! Lenient parsing of record timestamps.
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

/// Local calendar date of a raw record timestamp.
///
/// Accepts RFC3339 instants (converted into `tz` before taking the date),
/// plain `YYYY-MM-DD` calendar dates (taken as-is) and offset-less
/// `YYYY-MM-DDTHH:MM:SS` datetimes. Anything else yields `None` and the
/// record is skipped upstream.
pub(crate) fn record_date(raw: &str, tz: Tz) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&tz).date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|datetime| datetime.date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::UTC;

    #[test]
    fn rfc3339_converts_into_the_target_timezone() {
        // Late evening UTC is already the next day in Kolkata.
        let date = record_date("2024-01-05T22:00:00Z", chrono_tz::Asia::Kolkata).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 6).unwrap());
    }

    #[test]
    fn plain_dates_are_calendar_dates_in_any_timezone() {
        let date = record_date("2024-01-05", chrono_tz::America::New_York).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn offsetless_datetimes_keep_their_date() {
        let date = record_date("2024-02-29T08:30:00", UTC).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn garbage_is_none() {
        assert!(record_date("", UTC).is_none());
        assert!(record_date("  ", UTC).is_none());
        assert!(record_date("yesterday", UTC).is_none());
        assert!(record_date("2024-13-01", UTC).is_none());
    }
}
