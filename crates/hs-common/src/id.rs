//! Run identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

const RUN_PREFIX: &str = "run-";
const RUN_HEX_LEN: usize = 12;

/// Identifier of one scan run, written into the scan log so records of
/// separate runs in the same file can be told apart.
///
/// Format: `run-XXXXXXXXXXXX` (12 lowercase hex digits)
/// Example: `run-3f9a0c61b2d4`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub String);

impl RunId {
    /// Generate a new run ID from a random UUID.
    pub fn new() -> Self {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        RunId(format!("{}{}", RUN_PREFIX, &uuid[..RUN_HEX_LEN]))
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
