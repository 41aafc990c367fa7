//! Date formatting utilities for forum timestamps.
//!
//! Topic and post dates arrive in two shapes: machine timestamps (RFC 3339
//! or bare dates) and the legacy Hebrew textual format the first content
//! iteration used, e.g. `"15 בינואר 2025"`. Everything here degrades
//! silently: input that cannot be parsed is returned unchanged, never an
//! error, so a bad date can't fail a render.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Hebrew month names, bare form, January first.
const MONTHS: [&str; 12] = [
    "ינואר", "פברואר", "מרץ", "אפריל", "מאי", "יוני", "יולי", "אוגוסט", "ספטמבר", "אוקטובר",
    "נובמבר", "דצמבר",
];

/// Abbreviated Hebrew month names as rendered in short dates.
const SHORT_MONTHS: [&str; 12] = [
    "ינו׳", "פבר׳", "מרץ", "אפר׳", "מאי", "יוני", "יולי", "אוג׳", "ספט׳", "אוק׳", "נוב׳", "דצמ׳",
];

/// Resolves a Hebrew month name (bare or with the ב prefix) to 1..=12.
fn month_number(name: &str) -> Option<u32> {
    let bare = name.strip_prefix('ב').unwrap_or(name);
    MONTHS
        .iter()
        .position(|m| *m == bare)
        .map(|i| i as u32 + 1)
}

/// Parses the legacy Hebrew calendar format `"<day> <month> <year>"`.
fn parse_legacy_hebrew(input: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() < 3 {
        return None;
    }
    let day: u32 = parts[0].parse().ok()?;
    let month = month_number(parts[1])?;
    let year: i32 = parts[2].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses any supported timestamp shape into UTC.
///
/// Tried in order: legacy Hebrew calendar text, RFC 3339, a naive datetime
/// without offset, a bare `YYYY-MM-DD` date.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Some(date) = parse_legacy_hebrew(input) {
        return date.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
    }
    None
}

/// Formats a timestamp as a bucketed relative label.
///
/// Below one week the label is relative ("עכשיו", minutes, hours, days);
/// older instants render as an absolute short Hebrew date. Unparseable
/// input comes back unchanged.
pub fn format_relative_time(input: &str) -> String {
    match parse_timestamp(input) {
        Some(date) => relative_label(date, Utc::now()),
        None => input.to_string(),
    }
}

/// Relative label for `date` as seen from `now`.
fn relative_label(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - date).num_seconds();

    // Future instants (clock skew) read as "just now" too
    if seconds < 60 {
        return "עכשיו".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("לפני {} דקות", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("לפני {} שעות", hours);
    }

    let days = hours / 24;
    if days < 7 {
        return format!("לפני {} ימים", days);
    }

    short_date(date)
}

/// Short Hebrew date, e.g. `"15 בינו׳ 2025"`.
fn short_date(date: DateTime<Utc>) -> String {
    format!(
        "{} ב{} {}",
        date.day(),
        SHORT_MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Long Hebrew date, e.g. `"15 בינואר 2025"`.
fn long_date(date: DateTime<Utc>) -> String {
    format!(
        "{} ב{} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Formats a timestamp for absolute display.
///
/// Legacy Hebrew dates are already display text and pass through as-is;
/// machine timestamps render as a long Hebrew date; anything else comes
/// back unchanged.
pub fn format_date_for_display(input: &str) -> String {
    if parse_legacy_hebrew(input.trim()).is_some() {
        return input.to_string();
    }
    match parse_timestamp(input) {
        Some(date) => long_date(date),
        None => input.to_string(),
    }
}

/// Current time in the wire format topics and posts carry.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_month_number_prefixed_and_bare() {
        assert_eq!(month_number("ינואר"), Some(1));
        assert_eq!(month_number("בינואר"), Some(1));
        assert_eq!(month_number("דצמבר"), Some(12));
        assert_eq!(month_number("בדצמבר"), Some(12));
        assert_eq!(month_number("January"), None);
    }

    #[test]
    fn test_parse_legacy_hebrew() {
        let date = parse_legacy_hebrew("15 בינואר 2025").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2025, 1, 15));

        let date = parse_legacy_hebrew("3 מרץ 2024").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 3));

        assert!(parse_legacy_hebrew("בינואר 2025").is_none());
        assert!(parse_legacy_hebrew("32 בינואר 2025").is_none());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2025-01-15T10:30:00Z").is_some());
        assert!(parse_timestamp("2025-01-15T10:30:00+02:00").is_some());
        assert!(parse_timestamp("2025-01-15T10:30:00").is_some());
        assert!(parse_timestamp("2025-01-15").is_some());
        assert!(parse_timestamp("15 בינואר 2025").is_some());
        assert!(parse_timestamp("לפני שעה").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_relative_buckets() {
        let now = Utc::now();
        assert_eq!(relative_label(now - Duration::seconds(30), now), "עכשיו");
        assert_eq!(
            relative_label(now - Duration::minutes(5), now),
            "לפני 5 דקות"
        );
        assert_eq!(relative_label(now - Duration::hours(3), now), "לפני 3 שעות");
        assert_eq!(relative_label(now - Duration::days(2), now), "לפני 2 ימים");
    }

    #[test]
    fn test_future_instant_is_just_now() {
        let now = Utc::now();
        assert_eq!(relative_label(now + Duration::minutes(10), now), "עכשיו");
    }

    #[test]
    fn test_old_date_is_absolute() {
        let now = Utc::now();
        let label = relative_label(now - Duration::days(10), now);
        assert!(!label.starts_with("לפני"));
        assert!(label.contains(&(now - Duration::days(10)).year().to_string()));
    }

    #[test]
    fn test_format_relative_time_five_minutes_ago() {
        let stamp = (Utc::now() - Duration::minutes(5)).to_rfc3339();
        assert_eq!(format_relative_time(&stamp), "לפני 5 דקות");
    }

    #[test]
    fn test_unparseable_returned_unchanged() {
        assert_eq!(format_relative_time("לפני שעה"), "לפני שעה");
        assert_eq!(format_date_for_display("garbage"), "garbage");
    }

    #[test]
    fn test_display_formats() {
        // Legacy text passes through untouched
        assert_eq!(format_date_for_display("15 בינואר 2025"), "15 בינואר 2025");
        // Machine timestamps render as long Hebrew dates
        assert_eq!(format_date_for_display("2025-01-15"), "15 בינואר 2025");
    }
}
