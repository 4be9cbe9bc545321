//! Hook definitions as stored in the CLI's JSON configuration.
//!
//! ## Example
//!
//! ```json
//! {
//!   "name": "changelog",
//!   "event": "pr-merge",
//!   "command": "scripts/changelog.sh {number} {title}",
//!   "mode": "blocking",
//!   "timeoutMs": 10000,
//!   "exitCodes": { "success": [0], "abort": [1], "warn": [3] },
//!   "continuePrompt": "Changelog update failed. Merge anyway?"
//! }
//! ```

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::output::HookOutcome;

/// Default wall-clock budget for one hook invocation.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Lifecycle moments that can trigger hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookEvent {
    IssueCreate,
    IssueClose,
    PrCreate,
    PrMerge,
    PrClose,
    ReleasePublish,
}

impl HookEvent {
    /// Stable name used in configuration, payloads, and log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IssueCreate => "issue-create",
            Self::IssueClose => "issue-close",
            Self::PrCreate => "pr-create",
            Self::PrMerge => "pr-merge",
            Self::PrClose => "pr-close",
            Self::ReleasePublish => "release-publish",
        }
    }
}

/// How a hook's failure relates to the caller's workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookMode {
    /// Run, report, never abort. The default.
    #[default]
    FireAndForget,
    /// An abort-classified exit halts the workflow.
    Blocking,
    /// Like `blocking`, but the hook inherits the terminal for user
    /// interaction; stdout/stderr are not captured.
    Interactive,
}

/// What the sequencer does after a hook aborts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop running the event's remaining hooks. The default.
    #[default]
    FailFast,
    /// Run every hook regardless of intermediate aborts.
    Continue,
}

/// Exit-code lists deciding how a completed hook is classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitCodePolicy {
    #[serde(default = "default_success_codes")]
    pub success: Vec<i32>,
    #[serde(default = "default_abort_codes")]
    pub abort: Vec<i32>,
    #[serde(default)]
    pub warn: Vec<i32>,
}

fn default_success_codes() -> Vec<i32> {
    vec![0]
}

fn default_abort_codes() -> Vec<i32> {
    vec![1]
}

impl Default for ExitCodePolicy {
    fn default() -> Self {
        Self {
            success: default_success_codes(),
            abort: default_abort_codes(),
            warn: Vec::new(),
        }
    }
}

impl ExitCodePolicy {
    /// Classify a process exit. Lists are consulted in order: success,
    /// abort, warn. Any code outside all three, and `None` from signal
    /// termination, timeout, or spawn failure, classifies as abort so an
    /// unexpected exit never silently reads as success.
    pub fn classify(&self, exit_code: Option<i32>) -> HookOutcome {
        let Some(code) = exit_code else {
            return HookOutcome::Abort;
        };
        if self.success.contains(&code) {
            HookOutcome::Success
        } else if self.abort.contains(&code) {
            HookOutcome::Abort
        } else if self.warn.contains(&code) {
            HookOutcome::Warn
        } else {
            HookOutcome::Abort
        }
    }
}

/// A user-registered shell command bound to a lifecycle event.
///
/// Owned by the registry collaborator; the executor only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hook {
    /// Unique name, used in results and log lines.
    pub name: String,
    /// Event this hook fires on.
    pub event: HookEvent,
    /// Command template; `{placeholder}` values are substituted
    /// shell-escaped before spawning.
    pub command: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Wall-clock budget for one invocation, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub mode: HookMode,
    #[serde(default)]
    pub exit_codes: ExitCodePolicy,
    /// Question asked when an abort may be overridden interactively.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continue_prompt: Option<String>,
}

fn default_enabled() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Hook {
    /// A hook with every optional field at its default.
    pub fn new(name: impl Into<String>, event: HookEvent, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            event,
            command: command.into(),
            enabled: default_enabled(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            mode: HookMode::default(),
            exit_codes: ExitCodePolicy::default(),
            continue_prompt: None,
        }
    }

    pub fn with_mode(mut self, mode: HookMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_exit_codes(mut self, exit_codes: ExitCodePolicy) -> Self {
        self.exit_codes = exit_codes;
        self
    }

    pub fn with_continue_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.continue_prompt = Some(prompt.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// The timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn minimal_json_fills_defaults() {
        let hook: Hook = serde_json::from_value(json!({
            "name": "notify",
            "event": "pr-create",
            "command": "notify-send {title}",
        }))
        .unwrap();

        assert!(hook.enabled);
        assert_eq!(hook.timeout_ms, 30_000);
        assert_eq!(hook.mode, HookMode::FireAndForget);
        assert_eq!(hook.exit_codes, ExitCodePolicy::default());
        assert_eq!(hook.continue_prompt, None);
    }

    #[test]
    fn full_json_round_trips() {
        let hook: Hook = serde_json::from_value(json!({
            "name": "changelog",
            "event": "pr-merge",
            "command": "scripts/changelog.sh {number}",
            "enabled": false,
            "timeoutMs": 10_000,
            "mode": "blocking",
            "exitCodes": { "success": [0], "abort": [1, 2], "warn": [3] },
            "continuePrompt": "Changelog update failed. Merge anyway?",
        }))
        .unwrap();

        assert!(!hook.enabled);
        assert_eq!(hook.mode, HookMode::Blocking);
        assert_eq!(hook.exit_codes.abort, vec![1, 2]);
        assert_eq!(hook.exit_codes.warn, vec![3]);
        assert_eq!(
            hook.continue_prompt.as_deref(),
            Some("Changelog update failed. Merge anyway?")
        );

        let value = serde_json::to_value(&hook).unwrap();
        assert_eq!(value["event"], json!("pr-merge"));
        assert_eq!(value["mode"], json!("blocking"));
        assert_eq!(value["timeoutMs"], json!(10_000));
    }

    #[test]
    fn default_lists_classify_standard_codes() {
        let policy = ExitCodePolicy::default();
        assert_eq!(policy.classify(Some(0)), HookOutcome::Success);
        assert_eq!(policy.classify(Some(1)), HookOutcome::Abort);
    }

    #[test]
    fn unlisted_codes_and_missing_codes_abort() {
        let policy = ExitCodePolicy::default();
        assert_eq!(policy.classify(Some(2)), HookOutcome::Abort);
        assert_eq!(policy.classify(Some(127)), HookOutcome::Abort);
        assert_eq!(policy.classify(None), HookOutcome::Abort);
    }

    #[test]
    fn custom_lists_override_defaults() {
        let policy = ExitCodePolicy {
            success: vec![0, 10],
            abort: vec![1],
            warn: vec![3, 4],
        };
        assert_eq!(policy.classify(Some(10)), HookOutcome::Success);
        assert_eq!(policy.classify(Some(3)), HookOutcome::Warn);
        assert_eq!(policy.classify(Some(4)), HookOutcome::Warn);
        assert_eq!(policy.classify(Some(5)), HookOutcome::Abort);
    }

    #[test]
    fn success_list_is_consulted_before_abort() {
        let policy = ExitCodePolicy {
            success: vec![1],
            abort: vec![1],
            warn: vec![],
        };
        assert_eq!(policy.classify(Some(1)), HookOutcome::Success);
    }

    #[test]
    fn empty_lists_abort_everything_including_zero() {
        let policy = ExitCodePolicy {
            success: vec![],
            abort: vec![],
            warn: vec![],
        };
        assert_eq!(policy.classify(Some(0)), HookOutcome::Abort);
        assert_eq!(policy.classify(Some(7)), HookOutcome::Abort);
    }

    #[test]
    fn event_names_match_config_spelling() {
        assert_eq!(HookEvent::PrMerge.as_str(), "pr-merge");
        let event: HookEvent = serde_json::from_value(json!("release-publish")).unwrap();
        assert_eq!(event, HookEvent::ReleasePublish);
    }

    #[test]
    fn failure_policy_deserializes_kebab_case() {
        let policy: FailurePolicy = serde_json::from_value(json!("fail-fast")).unwrap();
        assert_eq!(policy, FailurePolicy::FailFast);
        let policy: FailurePolicy = serde_json::from_value(json!("continue")).unwrap();
        assert_eq!(policy, FailurePolicy::Continue);
    }
}
