use chrono::{DateTime, Utc};

/// Filesystem-safe timestamp used to name output files.
pub fn timestamp_slug(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d_%H-%M-%S").to_string()
}
