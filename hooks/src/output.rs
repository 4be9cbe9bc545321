//! Execution results reported by the sequencer.

use serde::Deserialize;
use serde::Serialize;

use crate::config::HookMode;

/// Classification of a completed hook invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookOutcome {
    /// Exit code was in the hook's success list.
    Success,
    /// Exit code was in the warn list; reported, never aborts.
    Warn,
    /// Exit code was in the abort list, outside every list, or missing
    /// (signal, timeout, spawn failure).
    Abort,
    /// An abort the user chose to override via the continue prompt.
    Continue,
}

/// Record of one hook invocation.
///
/// Exactly one is produced per attempted hook and it is immutable once
/// reported. Serializes to camelCase for machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookResult {
    pub hook_name: String,
    /// True only for a `success` outcome.
    pub success: bool,
    /// Captured stdout; `None` for interactive hooks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Captured stderr; `None` for interactive hooks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    /// Render, spawn, or timeout failure, when one occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock duration of the invocation.
    pub duration_ms: u64,
    /// Process exit code; `null` after a signal, timeout, or spawn failure.
    pub exit_code: Option<i32>,
    pub mode: HookMode,
    pub outcome: HookOutcome,
    /// Whether this result should halt the caller's workflow. Always false
    /// for fire-and-forget hooks.
    pub aborted: bool,
}

impl HookResult {
    /// Rewrite an abort the user chose to override. Keeps `success` false;
    /// the command did fail.
    pub(crate) fn downgrade_to_continue(&mut self) {
        self.outcome = HookOutcome::Continue;
        self.aborted = false;
    }
}

/// Caller-facing rollup of one event's results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HookSummary {
    pub succeeded: usize,
    pub warned: usize,
    pub failed: usize,
    /// Whether any hook aborted the workflow.
    pub aborted: bool,
}

impl HookSummary {
    pub fn from_results(results: &[HookResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result.outcome {
                HookOutcome::Success => summary.succeeded += 1,
                HookOutcome::Warn => summary.warned += 1,
                HookOutcome::Abort | HookOutcome::Continue => summary.failed += 1,
            }
            if result.aborted {
                summary.aborted = true;
            }
        }
        summary
    }
}
