//! Interactive confirmation seam for abort overrides.

use async_trait::async_trait;

/// Asks the user whether a failed hook should really stop the workflow.
///
/// The terminal front end implements this; [`NoPrompt`] declines everything
/// so non-interactive contexts never block on input.
#[async_trait]
pub trait ContinuePrompt: Send + Sync {
    /// Show `message` and return whether the user chose to continue.
    async fn confirm(&self, message: &str) -> bool;
}

/// Prompt that always declines; used when no terminal is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

#[async_trait]
impl ContinuePrompt for NoPrompt {
    async fn confirm(&self, _message: &str) -> bool {
        false
    }
}
