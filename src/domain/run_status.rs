use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Lifecycle of a remote run. Transitions are driven by the remote service only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Failed => "failed",
            RunStatus::Completed => "completed",
            RunStatus::Incomplete => "incomplete",
            RunStatus::Expired => "expired",
            RunStatus::Unknown => "unknown",
        }
    }

    /// `RequiresAction` is terminal here; tool outputs are never submitted.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed
                | RunStatus::Failed
                | RunStatus::Expired
                | RunStatus::Cancelled
                | RunStatus::Incomplete
                | RunStatus::RequiresAction
        )
    }

    pub fn is_success(&self) -> bool {
        *self == RunStatus::Completed
    }
}

impl FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(RunStatus::Queued),
            "in_progress" => Ok(RunStatus::InProgress),
            "requires_action" => Ok(RunStatus::RequiresAction),
            "cancelling" => Ok(RunStatus::Cancelling),
            "cancelled" => Ok(RunStatus::Cancelled),
            "failed" => Ok(RunStatus::Failed),
            "completed" => Ok(RunStatus::Completed),
            "incomplete" => Ok(RunStatus::Incomplete),
            "expired" => Ok(RunStatus::Expired),
            _ => Err(format!("Invalid run status: {}", s)),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
