//! Snapshot selector accepted by `view` and `restore`

use std::fmt;
use std::str::FromStr;

use crate::error::SnapError;

/// Which snapshot of a history to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotKey {
    /// The most recently inserted snapshot
    #[default]
    Latest,
    /// The snapshot captured at this unix timestamp
    Exact(i64),
}

impl FromStr for SnapshotKey {
    type Err = SnapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("latest") {
            return Ok(SnapshotKey::Latest);
        }

        s.parse::<i64>().map(SnapshotKey::Exact).map_err(|_| {
            SnapError::Validation(format!(
                "Invalid time key '{}': expected 'latest' or a unix timestamp",
                s
            ))
        })
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotKey::Latest => write!(f, "latest"),
            SnapshotKey::Exact(key) => write!(f, "{}", key),
        }
    }
}
