// src/timeutil.rs
use chrono::{DateTime, Datelike, FixedOffset, Timelike};

/// 16-point compass rose, clockwise from north.
const COMPASS_POINTS: [&str; 16] = [
    "N",  "NNE", "NE", "ENE", "E",  "ESE",
    "SE", "SSE", "S",  "SSW", "SW", "WSW",
    "W",  "WNW", "NW", "NNW",
];

/// Maps a wind direction in degrees (0-360, "from" convention) onto the
/// nearest compass point. Out-of-range input wraps rather than faulting.
pub fn compass_point(degrees: f64) -> &'static str {
    let idx = (((degrees + 11.25) / 22.5).floor() as i64).rem_euclid(16);
    COMPASS_POINTS[idx as usize]
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Formats an air temperature for display, converting when the imperial
/// unit is selected. One decimal, unit letter, no degree sign ("12.3C").
pub fn format_temperature(celsius: f64, fahrenheit: bool) -> String {
    if fahrenheit {
        format!("{:.1}F", celsius_to_fahrenheit(celsius))
    } else {
        format!("{:.1}C", celsius)
    }
}

/// Converts an RFC-2822 date (the HTTP `Date` header, e.g.
/// "Thu, 28 Aug 2025 19:57:24 GMT") to ISO-8601. `None` when unparseable.
pub fn rfc2822_to_iso(date: &str) -> Option<String> {
    DateTime::parse_from_rfc2822(date)
        .ok()
        .map(|dt| dt.to_rfc3339())
}

fn parse_with_offset(iso: &str, timezone_offset: i32) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(timezone_offset.checked_mul(3600)?)?;
    DateTime::parse_from_rfc3339(iso)
        .ok()
        .map(|dt| dt.with_timezone(&offset))
}

/// "HH:MM" in the configured timezone; "??:??" when the timestamp does
/// not parse, so a bad header never takes the whole render down.
pub fn format_clock(iso: &str, timezone_offset: i32) -> String {
    match parse_with_offset(iso, timezone_offset) {
        Some(dt) => format!("{:02}:{:02}", dt.hour(), dt.minute()),
        None => "??:??".to_string(),
    }
}

/// Weekday, month, and day-of-month as three display lines
/// (["Mon", "Jan", "5"]); ["???", "", ""] when the timestamp is bad.
pub fn format_date_lines(iso: &str, timezone_offset: i32) -> [String; 3] {
    match parse_with_offset(iso, timezone_offset) {
        Some(dt) => [
            dt.format("%a").to_string(),
            dt.format("%b").to_string(),
            dt.day().to_string(),
        ],
        None => ["???".to_string(), String::new(), String::new()],
    }
}
