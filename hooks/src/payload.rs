//! Placeholder values handed to hook command templates.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::HookEvent;

/// Values available to a hook's command template.
///
/// Keys are bare placeholder names (`repo`, `number`, `title`, ...); the
/// triggering event is always present under `event`. Values are substituted
/// into templates shell-escaped, never verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookPayload {
    values: BTreeMap<String, String>,
}

impl HookPayload {
    pub fn new(event: HookEvent) -> Self {
        let mut values = BTreeMap::new();
        values.insert("event".to_string(), event.as_str().to_string());
        Self { values }
    }

    /// Add a placeholder value, replacing any previous one of the same name.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}
