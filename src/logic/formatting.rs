//! Formatting and display logic
//!
//! Pure functions for formatting data for human-readable display.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const SIZE_UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Placeholder for values the server did not provide
pub const MISSING: &str = "—";

/// Format a byte count with two decimals and a binary unit
///
/// Matches the server's own size strings, so library sizes line up with the
/// pre-formatted listing sizes.
///
/// # Examples
/// ```
/// use cloudtui::logic::formatting::format_bytes;
///
/// assert_eq!(format_bytes(0), "0.00 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1536), "1.50 KB");
/// assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5.00 GB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in &SIZE_UNITS[..SIZE_UNITS.len() - 1] {
        if value < 1024.0 {
            return format!("{:.2} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.2} {}", value, SIZE_UNITS[SIZE_UNITS.len() - 1])
}

/// Listing size column: the server string, or a dash for folders
pub fn format_file_size(size: Option<&str>) -> String {
    match size {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => MISSING.to_string(),
    }
}

/// Parse the timestamp shapes the backend emits
///
/// Listings use `YYYY-MM-DD HH:MM:SS`; the library and settings use ISO 8601
/// with or without fractional seconds and offset.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Date part of a timestamp, or the raw string when it can't be parsed
///
/// # Examples
/// ```
/// use cloudtui::logic::formatting::format_date;
///
/// assert_eq!(format_date("2025-01-02 11:00:00"), "2025-01-02");
/// assert_eq!(format_date("2024-06-30T08:15:00.123456"), "2024-06-30");
/// assert_eq!(format_date("yesterday"), "yesterday");
/// assert_eq!(format_date(""), "—");
/// ```
pub fn format_date(raw: &str) -> String {
    if raw.trim().is_empty() {
        return MISSING.to_string();
    }
    parse_timestamp(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Date and time to the minute, or the raw string when it can't be parsed
pub fn format_timestamp(raw: &str) -> String {
    if raw.trim().is_empty() {
        return MISSING.to_string();
    }
    parse_timestamp(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// One drive option in the settings selector
pub fn format_drive_option(device: &str, mountpoint: &str, free: &str) -> String {
    format!("{} - {} ({} free)", device, mountpoint, free)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_small_values_keep_decimals() {
        assert_eq!(format_bytes(500), "500.00 B");
        assert_eq!(format_bytes(1023), "1023.00 B");
    }

    #[test]
    fn test_format_bytes_units() {
        assert_eq!(format_bytes(1024 * 1024), "1.00 MB");
        assert_eq!(format_bytes(1024u64.pow(4)), "1.00 TB");
        assert_eq!(format_bytes(1024u64.pow(5)), "1.00 PB");
        assert_eq!(format_bytes(1024u64.pow(6)), "1.00 EB");
    }

    #[test]
    fn test_format_bytes_caps_at_exabytes() {
        assert_eq!(format_bytes(u64::MAX), "16.00 EB");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(Some("1.00 KB")), "1.00 KB");
        assert_eq!(format_file_size(None), "—");
        assert_eq!(format_file_size(Some("")), "—");
    }

    #[test]
    fn test_parse_timestamp_shapes() {
        assert!(parse_timestamp("2025-01-01 10:10:10").is_some());
        assert!(parse_timestamp("2025-01-01T10:10:10").is_some());
        assert!(parse_timestamp("2025-01-01 10:10:10.123456").is_some());
        assert!(parse_timestamp("2025-01-01T10:10:10+02:00").is_some());
        assert!(parse_timestamp("2025-01-01").is_some());
        assert!(parse_timestamp("not a date").is_none());
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2025-03-04 05:06:07"), "2025-03-04 05:06");
        assert_eq!(format_timestamp(""), "—");
    }

    #[test]
    fn test_format_drive_option() {
        assert_eq!(
            format_drive_option("/dev/sda1", "/media/usb", "12.00 GB"),
            "/dev/sda1 - /media/usb (12.00 GB free)"
        );
    }
}
