//! Sequential execution of all hooks registered for one event.

use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use crate::config::FailurePolicy;
use crate::config::HookEvent;
use crate::output::HookResult;
use crate::payload::HookPayload;
use crate::prompt::ContinuePrompt;
use crate::prompt::NoPrompt;
use crate::registry::HookRegistry;
use crate::runner::run_hook;
use crate::template::CommandRenderer;
use crate::template::ShellRenderer;

/// Per-invocation options from the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Failure policy to use when the event has no registry override.
    pub on_failure: Option<FailurePolicy>,
    /// Skip hook execution entirely (e.g. a `--no-hooks` flag).
    pub skip_hooks: bool,
}

/// Runs the hooks registered for a lifecycle event, one child process at a
/// time, in registration order.
pub struct HookExecutor {
    registry: Arc<dyn HookRegistry>,
    renderer: Arc<dyn CommandRenderer>,
    prompt: Arc<dyn ContinuePrompt>,
}

impl HookExecutor {
    /// Executor with the default shell renderer and a prompt that declines
    /// every abort override.
    pub fn new(registry: Arc<dyn HookRegistry>) -> Self {
        Self {
            registry,
            renderer: Arc::new(ShellRenderer),
            prompt: Arc::new(NoPrompt),
        }
    }

    /// Replace the template renderer.
    pub fn with_renderer(mut self, renderer: Arc<dyn CommandRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Replace the continue prompt, e.g. with a terminal-backed one.
    pub fn with_prompt(mut self, prompt: Arc<dyn ContinuePrompt>) -> Self {
        self.prompt = prompt;
        self
    }

    /// Run every enabled hook registered for `event` and report one result
    /// per attempted hook.
    ///
    /// ## Failure policy
    ///
    /// Resolved as: registry per-event override, then
    /// `options.on_failure`, then fail-fast. Under fail-fast the first
    /// aborting result stops the sequence and the remaining hooks are
    /// neither run nor reported. Fire-and-forget hooks never abort, so
    /// they never stop anything.
    ///
    /// ## Continue prompt
    ///
    /// An aborting hook that carries a `continue_prompt` asks the prompt
    /// collaborator before the abort stands; confirmation downgrades the
    /// result to a `continue` outcome and sequencing moves on.
    ///
    /// This method is infallible: per-hook failures live inside each
    /// [`HookResult`], and what an abort means for the workflow is the
    /// caller's decision.
    pub async fn run_hooks_for_event(
        &self,
        event: HookEvent,
        payload: &HookPayload,
        options: RunOptions,
    ) -> Vec<HookResult> {
        if options.skip_hooks {
            debug!(event = event.as_str(), "hooks skipped by caller");
            return Vec::new();
        }

        let hooks = self.registry.hooks_for_event(event);
        if hooks.is_empty() {
            return Vec::new();
        }

        let policy = self
            .registry
            .event_failure_policy(event)
            .or(options.on_failure)
            .unwrap_or_default();

        debug!(
            event = event.as_str(),
            hooks = hooks.len(),
            policy = ?policy,
            "running hooks"
        );

        let mut results = Vec::with_capacity(hooks.len());
        for hook in &hooks {
            let mut result = run_hook(hook, payload, self.renderer.as_ref()).await;

            if result.aborted
                && let Some(message) = &hook.continue_prompt
                && self.prompt.confirm(message).await
            {
                debug!(hook = %hook.name, "abort overridden by user");
                result.downgrade_to_continue();
            }

            let aborted = result.aborted;
            results.push(result);

            if aborted && policy == FailurePolicy::FailFast {
                warn!(hook = %hook.name, "hook aborted, skipping remaining hooks");
                break;
            }
        }
        results
    }
}
