//! Event-hook execution for the bosun CLI.
//!
//! Users bind shell commands to lifecycle events (`pr-create`, `pr-merge`,
//! `issue-close`, ...). When an event fires, the [`HookExecutor`] runs every
//! enabled hook for it, one child process at a time, and reports one
//! [`HookResult`] per attempted hook. Nothing in here ever panics or returns
//! an error to the caller: a broken hook becomes a result carrying its
//! failure, and whether that failure should halt the caller's workflow is
//! communicated purely through [`HookResult::aborted`].
//!
//! ## Execution modes
//!
//! - `fire-and-forget` (default) - failures are reported but never abort.
//! - `blocking` - an abort-classified exit halts the workflow.
//! - `interactive` - the hook inherits the terminal; same abort semantics
//!   as `blocking`, no output capture.
//!
//! ## Exit-code classification
//!
//! Each hook carries success/abort/warn code lists (defaults `[0]`/`[1]`/
//! `[]`). Codes outside every list, and missing codes from signals or
//! timeouts, classify as abort: unexpected exits must never read as
//! success.
//!
//! ## Collaborators
//!
//! The hook store ([`HookRegistry`]), template rendering
//! ([`CommandRenderer`]), and the interactive abort override
//! ([`ContinuePrompt`]) are trait seams; in-memory implementations ship
//! here, the CLI provides the file-backed and terminal-backed ones.

mod config;
mod error;
mod executor;
mod output;
mod payload;
mod prompt;
mod registry;
mod runner;
mod template;

pub use config::*;
pub use error::*;
pub use executor::*;
pub use output::*;
pub use payload::*;
pub use prompt::*;
pub use registry::*;
pub use runner::run_hook;
pub use template::*;
