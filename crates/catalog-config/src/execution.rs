//! Execution mode for repository calls.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the service layer runs repository calls inside a unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Await each repository call directly on the request task.
    #[default]
    Inline,
    /// Run each repository call on its own spawned task and wait for its
    /// single result on a one-shot channel.
    Spawned,
}

impl ExecutionMode {
    /// Returns true if repository calls are spawned onto separate tasks.
    #[must_use]
    pub const fn is_spawned(&self) -> bool {
        matches!(self, Self::Spawned)
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline => write!(f, "inline"),
            Self::Spawned => write!(f, "spawned"),
        }
    }
}
