use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

/// strftime pattern of a version token, e.g. `20210304T153000`.
pub const TOKEN_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Modification-time version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionToken(String);

impl VersionToken {
    /// Render a file modification time in local time.
    ///
    /// Returns `None` when the time cannot be represented as a local date.
    pub fn from_mtime(mtime: SystemTime) -> Option<Self> {
        let (secs, nanos) = match mtime.duration_since(UNIX_EPOCH) {
            Ok(after) => (i64::try_from(after.as_secs()).ok()?, after.subsec_nanos()),
            Err(err) => {
                let before = err.duration();
                let secs = i64::try_from(before.as_secs()).ok()?;
                match before.subsec_nanos() {
                    0 => (secs.checked_neg()?, 0),
                    n => (secs.checked_neg()?.checked_sub(1)?, 1_000_000_000 - n),
                }
            }
        };
        let local = Local.timestamp_opt(secs, nanos).single()?;
        Some(VersionToken(local.format(TOKEN_FORMAT).to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
