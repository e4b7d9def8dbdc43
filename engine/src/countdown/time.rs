// Date parsing and remaining-time arithmetic for countdowns
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use shared::models::CountdownTime;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
const SECONDS_PER_HOUR: i64 = 60 * 60;

/// Parses an ISO-8601 date. Offset-less forms are local time, the way a
/// browser date-time input is read.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn validate_future_date(date: &str) -> bool {
    validate_future_date_at(date, Utc::now())
}

pub fn validate_future_date_at(date: &str, now: DateTime<Utc>) -> bool {
    parse_date(date).is_some_and(|target| target > now)
}

pub fn time_remaining(target_date: &str) -> CountdownTime {
    time_remaining_at(target_date, Utc::now())
}

/// Whole-second countdown from `now` to `target_date`. Unparseable or past
/// targets read as expired.
pub fn time_remaining_at(target_date: &str, now: DateTime<Utc>) -> CountdownTime {
    let target = match parse_date(target_date) {
        Some(target) if target > now => target,
        _ => return CountdownTime::expired(),
    };

    let total = (target - now).num_seconds();
    CountdownTime {
        days: (total / SECONDS_PER_DAY) as u64,
        hours: ((total % SECONDS_PER_DAY) / SECONDS_PER_HOUR) as u64,
        minutes: ((total % SECONDS_PER_HOUR) / 60) as u64,
        seconds: (total % 60) as u64,
        is_expired: false,
    }
}
