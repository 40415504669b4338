//! Time arithmetic against a single captured "now".

use jiff::Timestamp;

pub const MILLIS_PER_HOUR: i64 = 3_600_000;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Length of the upcoming-deadline window.
pub const UPCOMING_WINDOW_DAYS: i64 = 3;

/// Signed milliseconds from `now` until `due` (negative when past due).
pub fn millis_until(due: Timestamp, now: Timestamp) -> i64 {
    due.as_millisecond() - now.as_millisecond()
}

/// Fractional hours from `now` until `due`.
pub fn hours_until(due: Timestamp, now: Timestamp) -> f64 {
    millis_until(due, now) as f64 / MILLIS_PER_HOUR as f64
}

/// Whole days until `due`, rounded toward negative infinity.
pub fn days_until(due: Timestamp, now: Timestamp) -> i64 {
    millis_until(due, now).div_euclid(MILLIS_PER_DAY)
}

/// Whole days past `due`, rounded toward negative infinity.
pub fn days_overdue(due: Timestamp, now: Timestamp) -> i64 {
    (-millis_until(due, now)).div_euclid(MILLIS_PER_DAY)
}

/// `due` lies in `[now, now + 3 days]`.
pub fn in_upcoming_window(due: Timestamp, now: Timestamp) -> bool {
    let remaining = millis_until(due, now);
    (0..=UPCOMING_WINDOW_DAYS * MILLIS_PER_DAY).contains(&remaining)
}

pub(crate) fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}
