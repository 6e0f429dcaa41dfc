//! Utility functions for the photo indexer repository.

use std::fmt::Display;

use chrono::TimeZone;

/// Render epoch seconds as a `YYYY-MM-DD HH:MM:SS` timestamp in the given timezone.
///
/// Fractional seconds are accepted and truncated, since the output format carries
/// no sub-second precision. Production code passes `chrono::Local`; tests pin
/// `chrono::Utc` for deterministic output.
///
/// # Arguments
///
/// * `epoch` - Seconds since the Unix epoch
/// * `tz` - The timezone to render the timestamp in
///
/// # Returns
///
/// * `Some(String)` - The formatted timestamp
/// * `None` - If `epoch` is not finite or falls outside the representable range
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use photo_indexer_repository::format_epoch_seconds;
///
/// let formatted = format_epoch_seconds(1_000_000_000.0, &Utc);
/// assert_eq!(formatted.as_deref(), Some("2001-09-09 01:46:40"));
/// ```
pub fn format_epoch_seconds<Tz>(epoch: f64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if !epoch.is_finite() {
        return None;
    }

    // `as i64` saturates on overflow; chrono rejects out-of-range seconds below.
    let seconds = epoch.floor() as i64;

    tz.timestamp_opt(seconds, 0)
        .single()
        .map(|datetime| datetime.format("%Y-%m-%d %H:%M:%S").to_string())
}
