//! Waktu Indonesia Barat (WIB) helpers.
//!
//! All timestamps use a fixed UTC+7 offset regardless of the host timezone.

use chrono::{DateTime, FixedOffset, Utc};

/// WIB offset in seconds east of UTC
const WIB_OFFSET_SECS: i32 = 7 * 3600;

/// Audit log timestamp format, no fractional seconds
pub const WIB_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fixed UTC+7 offset
pub fn wib() -> FixedOffset {
    FixedOffset::east_opt(WIB_OFFSET_SECS).expect("Invalid WIB offset")
}

/// Current time in WIB
pub fn now_wib() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&wib())
}

/// Format as `YYYY-MM-DD HH:MM:SS`
pub fn format_wib(time: &DateTime<FixedOffset>) -> String {
    time.format(WIB_FORMAT).to_string()
}

/// Filename-safe form of [`format_wib`]: spaces become `_`, colons become `-`
pub fn filename_prefix(time: &DateTime<FixedOffset>) -> String {
    format_wib(time).replace(':', "-").replace(' ', "_")
}
