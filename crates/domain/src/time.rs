//! Time and timestamp helpers.

use chrono::{DateTime, Local};

/// Local wall-clock time, as a farmer would read it off the station.
pub type Timestamp = DateTime<Local>;

/// Format used for every timestamp key (irrigation history, logs, alerts).
pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Return the current local time.
#[must_use]
pub fn now() -> Timestamp {
    Local::now()
}

/// Render `ts` as a second-resolution key, e.g. `2024-05-01 06:30:00`.
///
/// Two instants within the same clock second produce the same key.
#[must_use]
pub fn stamp(ts: &Timestamp) -> String {
    ts.format(STAMP_FORMAT).to_string()
}
