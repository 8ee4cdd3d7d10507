use std::fmt;

use super::RunStatus;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThreadId(String);

impl ThreadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunId(String);

impl RunId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failure detail the remote service attaches to a run that did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunError {
    pub code: String,
    pub message: String,
}

/// A single request's view of a remote run. Lives only as long as the request
/// that created it and is abandoned once terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationRun {
    pub thread_id: ThreadId,
    pub run_id: RunId,
    pub status: RunStatus,
    pub last_error: Option<RunError>,
}

impl ConversationRun {
    pub fn new(thread_id: ThreadId, run_id: RunId, status: RunStatus) -> Self {
        Self {
            thread_id,
            run_id,
            status,
            last_error: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn failure_reason(&self) -> String {
        match &self.last_error {
            Some(err) => format!(
                "run {} {}: {} ({})",
                self.run_id, self.status, err.message, err.code
            ),
            None => format!("run {} ended with status {}", self.run_id, self.status),
        }
    }
}
