//! Service-day time arithmetic.
//!
//! Trip times are stored as seconds since the *start of service* of their
//! service date. Start of service is noon minus twelve hours in the
//! dataset's time zone: midnight on ordinary days, but an hour earlier or
//! later on days with a daylight-saving change. Search times are seconds
//! relative to the start of service of the search's first day, so a trip on
//! another service day is shifted by the distance between the two starts.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

/// Nominal length of a service day.
pub const SECONDS_PER_DAY: i32 = 86_400;

/// Error returned by time parsing and service-day arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    /// A service time string could not be parsed.
    #[error("invalid service time: {reason}")]
    Format { reason: &'static str },

    /// Local noon is not a valid instant on this date in this zone.
    #[error("no local noon on {date} in {zone}")]
    NoLocalNoon { date: NaiveDate, zone: Tz },

    /// Adding days moved the date outside chrono's range.
    #[error("date {date} plus {days} days is out of range")]
    DateOutOfRange { date: NaiveDate, days: i64 },

    /// The distance between two instants does not fit in an `i32`.
    #[error("{seconds} seconds does not fit in a search time")]
    OffsetOverflow { seconds: i64 },
}

impl TimeError {
    fn format(reason: &'static str) -> Self {
        Self::Format { reason }
    }
}

/// Start of service for `date` in `zone`: local noon minus twelve hours.
///
/// # Examples
///
/// ```
/// use transit_router::domain::start_of_service;
/// use chrono::NaiveDate;
/// use chrono_tz::Tz;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let start = start_of_service(date, Tz::UTC).unwrap();
/// assert_eq!(start.to_rfc3339(), "2024-01-01T00:00:00+00:00");
/// ```
pub fn start_of_service(date: NaiveDate, zone: Tz) -> Result<DateTime<Tz>, TimeError> {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).ok_or(TimeError::NoLocalNoon { date, zone })?;
    let local_noon = zone
        .from_local_datetime(&date.and_time(noon))
        .earliest()
        .ok_or(TimeError::NoLocalNoon { date, zone })?;

    local_noon
        .checked_sub_signed(Duration::hours(12))
        .ok_or(TimeError::DateOutOfRange { date, days: -1 })
}

/// Seconds from `from` to `to`, negative if `to` is earlier.
pub fn seconds_between(from: &DateTime<Tz>, to: &DateTime<Tz>) -> Result<i32, TimeError> {
    let seconds = to
        .naive_utc()
        .signed_duration_since(from.naive_utc())
        .num_seconds();
    i32::try_from(seconds).map_err(|_| TimeError::OffsetOverflow { seconds })
}

/// `date` shifted by `days` (may be negative).
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate, TimeError> {
    date.checked_add_signed(Duration::days(days))
        .ok_or(TimeError::DateOutOfRange { date, days })
}

/// All dates from `first` to `last`, inclusive. Empty if `last < first`.
pub fn service_dates(first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    first.iter_days().take_while(move |d| *d <= last)
}

/// Parse a service time in "HH:MM" or "HH:MM:SS" format to seconds.
///
/// Hours may exceed 23 for trips running past midnight of their service day.
///
/// # Examples
///
/// ```
/// use transit_router::domain::parse_service_time;
///
/// assert_eq!(parse_service_time("08:00").unwrap(), 8 * 3600);
/// assert_eq!(parse_service_time("25:10:30").unwrap(), 25 * 3600 + 10 * 60 + 30);
/// assert!(parse_service_time("8:00").is_err());
/// assert!(parse_service_time("08:60").is_err());
/// ```
pub fn parse_service_time(s: &str) -> Result<i32, TimeError> {
    let bytes = s.as_bytes();
    if bytes.len() != 5 && bytes.len() != 8 {
        return Err(TimeError::format("expected HH:MM or HH:MM:SS"));
    }
    if bytes[2] != b':' || (bytes.len() == 8 && bytes[5] != b':') {
        return Err(TimeError::format("expected colon separators"));
    }

    let hour = parse_two_digits(&bytes[0..2]).ok_or(TimeError::format("invalid hour digits"))?;
    let minute =
        parse_two_digits(&bytes[3..5]).ok_or(TimeError::format("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::format("minute must be 0-59"));
    }

    let second = if bytes.len() == 8 {
        let second =
            parse_two_digits(&bytes[6..8]).ok_or(TimeError::format("invalid second digits"))?;
        if second > 59 {
            return Err(TimeError::format("second must be 0-59"));
        }
        second
    } else {
        0
    };

    Ok((hour * 3600 + minute * 60 + second) as i32)
}

/// Format seconds as "HH:MM" (or "HH:MM:SS" when seconds are non-zero).
///
/// Negative times, which occur for trips on a service day before the search
/// day, are prefixed with `-`.
pub fn format_service_time(seconds: i32) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let abs = seconds.unsigned_abs();
    let (h, m, s) = (abs / 3600, (abs % 3600) / 60, abs % 60);
    if s == 0 {
        format!("{sign}{h:02}:{m:02}")
    } else {
        format!("{sign}{h:02}:{m:02}:{s:02}")
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn start_of_service_is_midnight_on_regular_days() {
        let oslo: Tz = "Europe/Oslo".parse().unwrap();
        let start = start_of_service(date(2024, 1, 15), oslo).unwrap();
        assert_eq!(start.to_rfc3339(), "2024-01-15T00:00:00+01:00");
    }

    #[test]
    fn start_of_service_shifts_on_dst_days() {
        let oslo: Tz = "Europe/Oslo".parse().unwrap();

        // Clocks go forward on 2024-03-31: noon is CEST, so noon - 12h is 23:00
        // CET on the previous evening.
        let spring = start_of_service(date(2024, 3, 31), oslo).unwrap();
        assert_eq!(spring.to_rfc3339(), "2024-03-30T23:00:00+01:00");

        // Clocks go back on 2024-10-27: noon - 12h is 01:00 CEST.
        let autumn = start_of_service(date(2024, 10, 27), oslo).unwrap();
        assert_eq!(autumn.to_rfc3339(), "2024-10-27T01:00:00+02:00");
    }

    #[test]
    fn seconds_between_consecutive_days() {
        let oslo: Tz = "Europe/Oslo".parse().unwrap();
        let d1 = start_of_service(date(2024, 3, 30), oslo).unwrap();
        let d2 = start_of_service(date(2024, 3, 31), oslo).unwrap();
        let d3 = start_of_service(date(2024, 4, 1), oslo).unwrap();

        assert_eq!(seconds_between(&d1, &d2).unwrap(), SECONDS_PER_DAY - 3600);
        assert_eq!(seconds_between(&d2, &d3).unwrap(), SECONDS_PER_DAY);
        assert_eq!(seconds_between(&d2, &d1).unwrap(), -(SECONDS_PER_DAY - 3600));
    }

    #[test]
    fn service_dates_inclusive() {
        let dates: Vec<_> = service_dates(date(2024, 2, 28), date(2024, 3, 1)).collect();
        assert_eq!(
            dates,
            vec![date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]
        );

        assert_eq!(service_dates(date(2024, 3, 2), date(2024, 3, 1)).count(), 0);
    }

    #[test]
    fn add_days_both_directions() {
        assert_eq!(add_days(date(2024, 1, 1), -1).unwrap(), date(2023, 12, 31));
        assert_eq!(add_days(date(2024, 1, 1), 2).unwrap(), date(2024, 1, 3));
        assert!(add_days(NaiveDate::MAX, 1).is_err());
    }

    #[test]
    fn parse_valid_times() {
        assert_eq!(parse_service_time("00:00").unwrap(), 0);
        assert_eq!(parse_service_time("10:15").unwrap(), 36_900);
        assert_eq!(parse_service_time("23:59:59").unwrap(), 86_399);
        assert_eq!(parse_service_time("24:30").unwrap(), 88_200);
    }

    #[test]
    fn parse_invalid_times() {
        assert!(parse_service_time("").is_err());
        assert!(parse_service_time("1015").is_err());
        assert!(parse_service_time("10-15").is_err());
        assert!(parse_service_time("ab:cd").is_err());
        assert!(parse_service_time("10:15:6").is_err());
        assert!(parse_service_time("10:15;00").is_err());
        assert!(parse_service_time("10:15:60").is_err());
    }

    #[test]
    fn format_times() {
        assert_eq!(format_service_time(0), "00:00");
        assert_eq!(format_service_time(36_900), "10:15");
        assert_eq!(format_service_time(36_905), "10:15:05");
        assert_eq!(format_service_time(-3600), "-01:00");
        assert_eq!(format_service_time(115_200), "32:00");
    }

    #[test]
    fn error_display() {
        let err = TimeError::Format {
            reason: "minute must be 0-59",
        };
        assert_eq!(err.to_string(), "invalid service time: minute must be 0-59");

        let err = TimeError::OffsetOverflow {
            seconds: 1 << 40,
        };
        assert_eq!(
            err.to_string(),
            "1099511627776 seconds does not fit in a search time"
        );
    }
}
