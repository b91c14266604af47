//! Child process execution with cancellation
//!
//! std has no way to wait on a child and a channel at the same time, so the
//! runner polls `try_wait` and sleeps on the cancellation token in between.
//! Output pipes are drained on helper threads so a chatty child can't block
//! on a full pipe.

use crate::error::{Result, SplitError};
use crate::pipeline::CancellationToken;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, warn};

/// How often a running child is checked for exit
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Captured result of a finished process
#[derive(Debug)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// stderr followed by stdout, trimmed
    pub fn combined(&self) -> String {
        let mut text = self.stderr.trim().to_string();
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(stdout);
        }
        text
    }
}

/// Run `command` to completion, killing it if `cancel` fires first.
///
/// Returns `SplitError::Cancelled` after the child has been killed and reaped.
pub fn run_cancellable(mut command: Command, cancel: &CancellationToken) -> Result<ProcessOutput> {
    let program = command.get_program().to_string_lossy().into_owned();

    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| SplitError::Spawn {
            program: program.clone(),
            reason: e.to_string(),
        })?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {}
            Err(e) => {
                warn!("Lost track of {} (pid {}): {}", program, child.id(), e);
                abandon(&mut child, &program, stdout, stderr);
                return Err(e.into());
            }
        }
        if cancel.wait_timeout(POLL_INTERVAL) {
            debug!("Cancellation requested, killing {} (pid {})", program, child.id());
            abandon(&mut child, &program, stdout, stderr);
            return Err(SplitError::Cancelled);
        }
    };

    Ok(ProcessOutput {
        status,
        stdout: collect(stdout),
        stderr: collect(stderr),
    })
}

/// Kill and reap `child`, then join the drain threads so nothing outlives the call
fn abandon(child: &mut Child, program: &str, stdout: Option<JoinHandle<String>>, stderr: Option<JoinHandle<String>>) {
    terminate(child, program);
    let _ = collect(stdout);
    let _ = collect(stderr);
}

fn terminate(child: &mut Child, program: &str) {
    if let Err(e) = child.kill() {
        warn!("Failed to kill {}: {}", program, e);
    }
    if let Err(e) = child.wait() {
        warn!("Failed to reap {}: {}", program, e);
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn collect(handle: Option<JoinHandle<String>>) -> String {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}
