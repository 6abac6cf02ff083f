//! Version numbering policy
//!
//! A major bump resets the minor number; a minor bump keeps the major number.

use std::fmt;

use labdocs_db::entities::common::ChangeType;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A `major.minor` revision number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VersionNumber {
    pub major: i32,
    pub minor: i32,
}

impl VersionNumber {
    /// Number of the first version of any document or template
    pub const INITIAL: VersionNumber = VersionNumber { major: 1, minor: 0 };

    pub fn new(major: i32, minor: i32) -> Self {
        Self { major, minor }
    }

    /// The number that follows `self` for the given change
    pub fn bump(self, change: ChangeType) -> Self {
        let (major, minor) = next_version(self.major, self.minor, change);
        Self { major, minor }
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Compute the next `(major, minor)` pair
pub fn next_version(current_major: i32, current_minor: i32, change: ChangeType) -> (i32, i32) {
    match change {
        ChangeType::Major => (current_major + 1, 0),
        ChangeType::Minor => (current_major, current_minor + 1),
    }
}

/// Parse a change type from its textual form (`major` / `minor`)
pub fn parse_change_type(raw: &str) -> EngineResult<ChangeType> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "major" => Ok(ChangeType::Major),
        "minor" => Ok(ChangeType::Minor),
        _ => Err(EngineError::InvalidChangeType(raw.to_string())),
    }
}
