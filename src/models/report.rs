use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// One output row: when the owning commit happened, which commit, which file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub timestamp: DateTime<FixedOffset>,
    pub commit: String,
    pub name: String,
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.timestamp.format(DISPLAY_TIME_FORMAT),
            self.commit,
            self.name
        )
    }
}
