//! Execution of a single hook: render, spawn, race the timeout, classify.

use std::process::Stdio;
use std::time::Instant;

use tokio::io::AsyncRead;
use tokio::io::AsyncReadExt;
use tokio::process::Child;
use tokio::process::Command;
use tracing::debug;
use tracing::warn;

use crate::config::Hook;
use crate::config::HookMode;
use crate::error::HookError;
use crate::output::HookOutcome;
use crate::output::HookResult;
use crate::payload::HookPayload;
use crate::template::CommandRenderer;

/// Captured bytes per stream; the rest is drained and discarded so a noisy
/// hook cannot balloon the result.
const MAX_CAPTURED_BYTES: usize = 1_048_576; // 1MB

/// Run one hook to completion and fold everything that can go wrong into
/// its [`HookResult`].
///
/// The command template is rendered with escaped placeholder values, the
/// result is spawned as `sh -c`, and completion is raced against the hook's
/// timeout. A hook that outlives its budget is killed and classified
/// through the missing-exit-code rule. This function never returns an
/// error and never panics; render and spawn failures become results too.
pub async fn run_hook(
    hook: &Hook,
    payload: &HookPayload,
    renderer: &dyn CommandRenderer,
) -> HookResult {
    let started = Instant::now();

    let command = match renderer.render(&hook.command, payload) {
        Ok(command) => command,
        Err(err) => {
            warn!(hook = %hook.name, error = %err, "failed to render hook command");
            return failure_result(hook, started, &err);
        }
    };

    debug!(
        hook = %hook.name,
        command = %command,
        mode = ?hook.mode,
        timeout_ms = hook.timeout_ms,
        "running hook"
    );

    match execute(hook, &command).await {
        Ok(completion) => completed_result(hook, started, completion),
        Err(err) => {
            warn!(hook = %hook.name, error = %err, "hook failed to run");
            failure_result(hook, started, &err)
        }
    }
}

struct Completion {
    exit_code: Option<i32>,
    stdout: Option<String>,
    stderr: Option<String>,
}

async fn execute(hook: &Hook, command: &str) -> Result<Completion, HookError> {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    match hook.mode {
        HookMode::Interactive => {
            cmd.stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        }
        HookMode::FireAndForget | HookMode::Blocking => {
            cmd.stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
        }
    }

    let mut child = cmd.spawn().map_err(HookError::Spawn)?;

    if hook.mode == HookMode::Interactive {
        return wait_interactive(hook, &mut child).await;
    }

    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();

    // Drain both streams concurrently to avoid pipe deadlocks, then wait
    // for the exit status; the whole sequence shares one timeout.
    let drained = tokio::time::timeout(hook.timeout(), async {
        let (stdout, stderr) = tokio::join!(read_capped(stdout_pipe), read_capped(stderr_pipe));
        let status = child.wait().await;
        (stdout, stderr, status)
    })
    .await;

    match drained {
        Ok((stdout, stderr, Ok(status))) => Ok(Completion {
            exit_code: status.code(),
            stdout: Some(stdout),
            stderr: Some(stderr),
        }),
        Ok((_, _, Err(err))) => Err(HookError::Io(err)),
        Err(_elapsed) => {
            kill_child(&hook.name, &mut child).await;
            Err(HookError::Timeout {
                timeout_ms: hook.timeout_ms,
            })
        }
    }
}

async fn wait_interactive(hook: &Hook, child: &mut Child) -> Result<Completion, HookError> {
    match tokio::time::timeout(hook.timeout(), child.wait()).await {
        Ok(Ok(status)) => Ok(Completion {
            exit_code: status.code(),
            stdout: None,
            stderr: None,
        }),
        Ok(Err(err)) => Err(HookError::Io(err)),
        Err(_elapsed) => {
            kill_child(&hook.name, child).await;
            Err(HookError::Timeout {
                timeout_ms: hook.timeout_ms,
            })
        }
    }
}

async fn kill_child(hook_name: &str, child: &mut Child) {
    if let Err(err) = child.kill().await {
        warn!(hook = %hook_name, error = %err, "failed to kill timed out hook");
    }
}

async fn read_capped<R: AsyncRead + Unpin>(pipe: Option<R>) -> String {
    let Some(mut pipe) = pipe else {
        return String::new();
    };
    let mut bytes = Vec::new();
    let mut buf = [0u8; 4096];
    let mut capped = false;
    loop {
        match pipe.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                if capped {
                    continue; // drain but discard
                }
                if bytes.len() + n > MAX_CAPTURED_BYTES {
                    bytes.extend_from_slice(&buf[..MAX_CAPTURED_BYTES - bytes.len()]);
                    warn!("hook output exceeded {MAX_CAPTURED_BYTES} bytes, truncated");
                    capped = true;
                    continue;
                }
                bytes.extend_from_slice(&buf[..n]);
            }
            Err(err) => {
                warn!(error = %err, "failed to read hook output");
                break;
            }
        }
    }
    String::from_utf8_lossy(&bytes).to_string()
}

fn completed_result(hook: &Hook, started: Instant, completion: Completion) -> HookResult {
    let outcome = hook.exit_codes.classify(completion.exit_code);
    if outcome != HookOutcome::Success {
        warn!(
            hook = %hook.name,
            exit_code = ?completion.exit_code,
            outcome = ?outcome,
            "hook finished abnormally"
        );
    }
    HookResult {
        hook_name: hook.name.clone(),
        success: outcome == HookOutcome::Success,
        output: completion.stdout,
        stderr: completion.stderr,
        error: None,
        duration_ms: started.elapsed().as_millis() as u64,
        exit_code: completion.exit_code,
        mode: hook.mode,
        outcome,
        aborted: is_aborting(hook.mode, outcome),
    }
}

fn failure_result(hook: &Hook, started: Instant, err: &HookError) -> HookResult {
    let outcome = hook.exit_codes.classify(None);
    HookResult {
        hook_name: hook.name.clone(),
        success: false,
        output: None,
        stderr: None,
        error: Some(err.to_string()),
        duration_ms: started.elapsed().as_millis() as u64,
        exit_code: None,
        mode: hook.mode,
        outcome,
        aborted: is_aborting(hook.mode, outcome),
    }
}

fn is_aborting(mode: HookMode, outcome: HookOutcome) -> bool {
    mode != HookMode::FireAndForget && outcome == HookOutcome::Abort
}
