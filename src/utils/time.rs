//! Time handling utilities
//!
//! The backend speaks UTC instants in ISO-8601 text, sometimes without an
//! explicit UTC designator. Display always happens in KST (UTC+9). The
//! offset is fixed on purpose: the club lives in one timezone and the
//! backend never sends anything else.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Deserializer};

use crate::utils::errors::{MatchBuddyError, Result};

/// Korean weekday names, Monday first (matches the backend's day_of_week)
pub const KO_WEEKDAYS: [&str; 7] = ["월", "화", "수", "목", "금", "토", "일"];

const KST_OFFSET_SECS: i32 = 9 * 3600;

/// The fixed display timezone (KST, UTC+9)
pub fn kst() -> FixedOffset {
    // 9 hours east is always a valid offset
    FixedOffset::east_opt(KST_OFFSET_SECS).unwrap()
}

/// Parse a backend timestamp, assuming UTC when the designator is missing.
///
/// Returns `None` for malformed input so display paths can fall back to a
/// placeholder instead of propagating an error.
pub fn parse_backend_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Naive instants from the backend are UTC; append the designator before
    // parsing. Strings that already carry "Z" or a numeric offset pass
    // through untouched.
    let has_designator = trimmed.ends_with('Z')
        || trimmed.ends_with('z')
        || trimmed.rfind('+').map_or(false, |idx| idx > 10)
        || trimmed.rfind('-').map_or(false, |idx| idx > 10);

    let candidate = if has_designator {
        trimmed.to_string()
    } else {
        format!("{trimmed}Z")
    };

    DateTime::parse_from_rfc3339(&candidate)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Serde helper: lenient UTC timestamp field
pub fn deserialize_lenient_utc<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_backend_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

/// Serde helper: lenient optional UTC timestamp field.
///
/// Missing, null and malformed values all collapse to `None`.
pub fn deserialize_lenient_utc_opt<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_backend_timestamp))
}

/// Format an instant as `MM/DD(요일) HH:MM` in KST, 24-hour clock.
///
/// Same shape the backend uses when it renders notification text.
pub fn format_long(instant: DateTime<Utc>) -> String {
    let local = instant.with_timezone(&kst());
    let day_name = KO_WEEKDAYS[local.weekday().num_days_from_monday() as usize];
    format!(
        "{:02}/{:02}({}) {:02}:{:02}",
        local.month(),
        local.day(),
        day_name,
        local.hour(),
        local.minute()
    )
}

/// Format an optional instant, falling back to a placeholder
pub fn format_long_opt(instant: Option<DateTime<Utc>>) -> String {
    match instant {
        Some(ts) => format_long(ts),
        None => "-".to_string(),
    }
}

/// Format an instant as `HH:MM` in KST
pub fn format_short_time(instant: DateTime<Utc>) -> String {
    let local = instant.with_timezone(&kst());
    format!("{:02}:{:02}", local.hour(), local.minute())
}

/// Render an instant as a naive `YYYY-MM-DDTHH:MM` string in KST, the shape
/// datetime form controls expect
pub fn to_input_datetime(instant: DateTime<Utc>) -> String {
    let local = instant.with_timezone(&kst());
    local.format("%Y-%m-%dT%H:%M").to_string()
}

/// Split variant of [`to_input_datetime`] for separate date/time controls
pub fn to_input_date_and_time(instant: DateTime<Utc>) -> (String, String) {
    let local = instant.with_timezone(&kst());
    (
        local.format("%Y-%m-%d").to_string(),
        local.format("%H:%M").to_string(),
    )
}

/// Interpret a `YYYY-MM-DD` + `HH:MM[:SS]` pair as KST wall-clock time and
/// return the corresponding UTC instant.
///
/// The exact inverse of [`to_input_datetime`], minute precision.
pub fn combine_date_and_time_as_utc(date_str: &str, time_str: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| MatchBuddyError::InvalidInput(format!("날짜 형식이 올바르지 않습니다: {date_str}")))?;

    let time_trimmed = time_str.trim();
    let time = NaiveTime::parse_from_str(time_trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time_trimmed, "%H:%M:%S"))
        .map_err(|_| MatchBuddyError::InvalidInput(format!("시간 형식이 올바르지 않습니다: {time_str}")))?;

    let naive = date.and_time(time);
    let local = kst()
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| MatchBuddyError::InvalidInput(format!("잘못된 일시입니다: {date_str} {time_str}")))?;

    Ok(local.with_timezone(&Utc))
}

/// Wall-clock countdown to a target instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub expired: bool,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

/// Time remaining until `target`. `None` when there is no target to count
/// down to; `{expired: true, 0, 0, 0}` once it has elapsed.
pub fn remaining(target: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<Countdown> {
    let target = target?;
    let delta = target - now;

    if delta <= Duration::zero() {
        return Some(Countdown {
            expired: true,
            days: 0,
            hours: 0,
            minutes: 0,
        });
    }

    Some(Countdown {
        expired: false,
        days: delta.num_days(),
        hours: delta.num_hours() % 24,
        minutes: delta.num_minutes() % 60,
    })
}

/// Weekly template schedule line: `매주 X요일 HH:MM`.
///
/// `time_of_day` is the template's UTC time-of-day string (`HH:MM[:SS]`);
/// only the clock is shifted to KST, the stored day name is kept as-is.
pub fn format_weekly_schedule(day_of_week: u8, time_of_day: &str) -> Result<String> {
    let day_name = KO_WEEKDAYS
        .get(day_of_week as usize)
        .ok_or_else(|| MatchBuddyError::InvalidInput(format!("invalid day_of_week: {day_of_week}")))?;

    let trimmed = time_of_day.trim();
    let time = NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| MatchBuddyError::InvalidInput(format!("invalid time of day: {time_of_day}")))?;

    let local_hour = (time.hour() + (KST_OFFSET_SECS as u32 / 3600)) % 24;
    Ok(format!(
        "매주 {}요일 {:02}:{:02}",
        day_name,
        local_hour,
        time.minute()
    ))
}

/// Calendar D-day label for a match start, computed on KST dates
pub fn d_day(start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let zone = kst();
    let match_day = start.with_timezone(&zone).date_naive();
    let today = now.with_timezone(&zone).date_naive();
    let diff = (match_day - today).num_days();

    if diff == 0 {
        "D-Day".to_string()
    } else if diff > 0 {
        format!("D-{diff}")
    } else {
        format!("D+{}", -diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        parse_backend_timestamp(s).unwrap()
    }

    #[test]
    fn test_parse_appends_missing_designator() {
        let with_z = parse_backend_timestamp("2025-06-10T11:00:00Z").unwrap();
        let without_z = parse_backend_timestamp("2025-06-10T11:00:00").unwrap();
        assert_eq!(with_z, without_z);
    }

    #[test]
    fn test_parse_respects_explicit_offset() {
        let offset = parse_backend_timestamp("2025-06-10T20:00:00+09:00").unwrap();
        let plain = parse_backend_timestamp("2025-06-10T11:00:00Z").unwrap();
        assert_eq!(offset, plain);
    }

    #[test]
    fn test_parse_malformed_is_none() {
        assert!(parse_backend_timestamp("").is_none());
        assert!(parse_backend_timestamp("not-a-date").is_none());
        assert!(parse_backend_timestamp("2025-13-40T99:00:00").is_none());
    }

    #[test]
    fn test_format_long_kst() {
        // 2025-06-10 11:00 UTC is 2025-06-10 20:00 KST, a Tuesday
        assert_eq!(format_long(utc("2025-06-10T11:00:00Z")), "06/10(화) 20:00");
        // Crossing midnight: 16:30 UTC is 01:30 KST the next day (Wednesday)
        assert_eq!(format_long(utc("2025-06-10T16:30:00Z")), "06/11(수) 01:30");
    }

    #[test]
    fn test_format_long_opt_placeholder() {
        assert_eq!(format_long_opt(None), "-");
        assert_eq!(format_long_opt(Some(utc("2025-06-10T11:00:00Z"))), "06/10(화) 20:00");
    }

    #[test]
    fn test_format_short_time() {
        assert_eq!(format_short_time(utc("2025-06-10T11:00:00Z")), "20:00");
        assert_eq!(format_short_time(utc("2025-06-10T23:05:00Z")), "08:05");
    }

    #[test]
    fn test_input_datetime_round_trip() {
        // The literal instant from the round-trip requirement
        let instant = utc("2025-06-10T11:00:00Z");
        let rendered = to_input_datetime(instant);
        assert_eq!(rendered, "2025-06-10T20:00");

        let (date, time) = to_input_date_and_time(instant);
        let back = combine_date_and_time_as_utc(&date, &time).unwrap();
        assert_eq!(back, instant);
    }

    #[test]
    fn test_combine_accepts_seconds() {
        let a = combine_date_and_time_as_utc("2025-06-10", "20:00").unwrap();
        let b = combine_date_and_time_as_utc("2025-06-10", "20:00:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, utc("2025-06-10T11:00:00Z"));
    }

    #[test]
    fn test_combine_rejects_garbage() {
        assert!(combine_date_and_time_as_utc("2025/06/10", "20:00").is_err());
        assert!(combine_date_and_time_as_utc("2025-06-10", "25:99").is_err());
    }

    #[test]
    fn test_remaining_none_without_target() {
        assert_eq!(remaining(None, Utc::now()), None);
    }

    #[test]
    fn test_remaining_expired() {
        let now = utc("2025-06-10T12:00:00Z");
        let countdown = remaining(Some(utc("2025-06-10T11:59:59Z")), now).unwrap();
        assert!(countdown.expired);
        assert_eq!((countdown.days, countdown.hours, countdown.minutes), (0, 0, 0));
    }

    #[test]
    fn test_remaining_breakdown() {
        let now = utc("2025-06-01T00:00:00Z");
        let countdown = remaining(Some(utc("2025-06-03T05:30:00Z")), now).unwrap();
        assert!(!countdown.expired);
        assert_eq!(countdown.days, 2);
        assert_eq!(countdown.hours, 5);
        assert_eq!(countdown.minutes, 30);
    }

    #[test]
    fn test_weekly_schedule_shifts_clock_only() {
        // Template stores 11:00 UTC, which is 20:00 KST
        assert_eq!(format_weekly_schedule(1, "11:00:00").unwrap(), "매주 화요일 20:00");
        // 23:00 UTC wraps past midnight but keeps the stored day name
        assert_eq!(format_weekly_schedule(5, "23:00:00").unwrap(), "매주 토요일 08:00");
        assert!(format_weekly_schedule(7, "11:00:00").is_err());
    }

    #[test]
    fn test_d_day_labels() {
        let now = utc("2025-06-05T00:00:00Z");
        assert_eq!(d_day(utc("2025-06-05T10:00:00Z"), now), "D-Day");
        assert_eq!(d_day(utc("2025-06-07T10:00:00Z"), now), "D-2");
        assert_eq!(d_day(utc("2025-06-01T10:00:00Z"), now), "D+4");
    }

    #[test]
    fn test_d_day_uses_kst_calendar() {
        // 15:30 UTC on the 4th is already the 5th in KST
        let now = utc("2025-06-04T15:30:00Z");
        assert_eq!(d_day(utc("2025-06-05T10:00:00Z"), now), "D-Day");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Any minute-aligned instant survives the form-input round trip
            #[test]
            fn input_round_trip(secs in 0i64..4_102_444_800) {
                let minute_aligned = secs - secs % 60;
                let instant = DateTime::<Utc>::from_timestamp(minute_aligned, 0).unwrap();

                let (date, time) = to_input_date_and_time(instant);
                let back = combine_date_and_time_as_utc(&date, &time).unwrap();
                prop_assert_eq!(back, instant);
            }

            // The countdown never goes negative and never panics
            #[test]
            fn remaining_is_total(target_secs in 0i64..4_102_444_800, now_secs in 0i64..4_102_444_800) {
                let target = DateTime::<Utc>::from_timestamp(target_secs, 0).unwrap();
                let now = DateTime::<Utc>::from_timestamp(now_secs, 0).unwrap();

                let countdown = remaining(Some(target), now).unwrap();
                prop_assert!(countdown.days >= 0);
                prop_assert!(countdown.hours >= 0);
                prop_assert!(countdown.minutes >= 0);
                prop_assert_eq!(countdown.expired, target <= now);
            }
        }
    }
}
