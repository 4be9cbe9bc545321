//! Hook lookup seam and the in-memory implementation.

use std::collections::HashMap;

use crate::config::FailurePolicy;
use crate::config::Hook;
use crate::config::HookEvent;

/// Source of hook definitions for the executor.
///
/// The CLI's file-backed store implements this; tests substitute in-memory
/// fakes. `hooks_for_event` returns only enabled hooks, in registration
/// order.
pub trait HookRegistry: Send + Sync {
    fn hooks_for_event(&self, event: HookEvent) -> Vec<Hook>;

    /// Per-event failure policy override, when one is configured.
    fn event_failure_policy(&self, event: HookEvent) -> Option<FailurePolicy>;
}

/// Registry held entirely in memory, built once via [`HookRegistryBuilder`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryHookRegistry {
    hooks: Vec<Hook>,
    policies: HashMap<HookEvent, FailurePolicy>,
}

impl InMemoryHookRegistry {
    pub fn builder() -> HookRegistryBuilder {
        HookRegistryBuilder::default()
    }
}

impl HookRegistry for InMemoryHookRegistry {
    fn hooks_for_event(&self, event: HookEvent) -> Vec<Hook> {
        self.hooks
            .iter()
            .filter(|hook| hook.event == event && hook.enabled)
            .cloned()
            .collect()
    }

    fn event_failure_policy(&self, event: HookEvent) -> Option<FailurePolicy> {
        self.policies.get(&event).copied()
    }
}

/// Collects hooks in registration order.
#[derive(Debug, Default)]
pub struct HookRegistryBuilder {
    hooks: Vec<Hook>,
    policies: HashMap<HookEvent, FailurePolicy>,
}

impl HookRegistryBuilder {
    pub fn hook(mut self, hook: Hook) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn failure_policy(mut self, event: HookEvent, policy: FailurePolicy) -> Self {
        self.policies.insert(event, policy);
        self
    }

    pub fn build(self) -> InMemoryHookRegistry {
        InMemoryHookRegistry {
            hooks: self.hooks,
            policies: self.policies,
        }
    }
}
