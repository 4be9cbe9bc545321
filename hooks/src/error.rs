//! Internal error plumbing for the hook runner.

use thiserror::Error;

/// Failures that occur while trying to run one hook.
///
/// These never escape the runner: each is folded into the `error` field of
/// the hook's result, so one broken hook cannot crash the host workflow.
#[derive(Debug, Error)]
pub enum HookError {
    /// Command template could not be rendered.
    #[error("failed to render command template: {0}")]
    Render(String),

    /// Child process could not be spawned.
    #[error("failed to spawn hook command: {0}")]
    Spawn(#[source] std::io::Error),

    /// Hook ran past its budget and was killed.
    #[error("hook timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Waiting on the child failed.
    #[error("failed to collect hook process: {0}")]
    Io(#[from] std::io::Error),
}

impl HookError {
    /// Whether this failure was the timeout kill.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
