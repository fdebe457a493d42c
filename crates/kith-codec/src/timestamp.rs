//! ISO-8601 text form of `born_in`.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Format as `YYYY-MM-DDTHH:MM:SS`, with a fractional part only when the
/// timestamp has sub-second precision.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    let nanos = ts.nanosecond();
    let pattern = if nanos == 0 {
        "%Y-%m-%dT%H:%M:%S"
    } else if nanos % 1_000 == 0 {
        "%Y-%m-%dT%H:%M:%S%.6f"
    } else {
        "%Y-%m-%dT%H:%M:%S%.9f"
    };
    ts.format(pattern).to_string()
}

/// Parse a naive ISO-8601 date-time, or a bare date (taken as midnight).
///
/// Zone offsets are not accepted.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
