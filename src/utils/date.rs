use chrono::{Datelike, Days, Duration, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

fn date_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap())
}

/// Strict `YYYY-MM-DD` parse: zero padded, and a real calendar day.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if !date_shape().is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Monday of the week containing `d`.
pub fn week_start(d: NaiveDate) -> NaiveDate {
    d - Duration::days(d.weekday().num_days_from_monday() as i64)
}

/// First day of the month containing `d`.
pub fn month_start(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

/// `d` minus `days`, or `None` if `days` is negative or the result leaves
/// chrono's calendar range.
pub fn days_before(d: NaiveDate, days: i64) -> Option<NaiveDate> {
    let days = u64::try_from(days).ok()?;
    d.checked_sub_days(Days::new(days))
}
