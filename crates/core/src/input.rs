//! Key-to-command dispatch.

use serde::{Deserialize, Serialize};

/// A navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Previous,
    Next,
}

impl Command {
    /// Map a key name to a command.
    ///
    /// Matching is case-insensitive except for the single-letter keys, which
    /// are only recognised in lower case.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "p" | "h" => Some(Self::Previous),
            "n" | "l" => Some(Self::Next),
            other => match other.to_lowercase().as_str() {
                "arrowleft" | "left" | "prev" | "previous" => Some(Self::Previous),
                "arrowright" | "right" | "next" | "space" => Some(Self::Next),
                _ => None,
            },
        }
    }
}
