//! Optional external compile check.
//!
//! Some i18n pipelines compile the catalogs into generated code (e.g. a
//! bundler plugin); validation can invoke that step and surface its result.
//! The check is best-effort and advisory: a failure or timeout is reported
//! in the summary but never stops the other validations. Callers hand the
//! core a `Compiler` so tests can stub the toolchain out.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// External build step that consumes the catalogs.
pub trait Compiler {
    fn compile(&self) -> CompileOutcome;
}

#[derive(Debug, Clone, Serialize)]
pub struct CompileOutcome {
    pub passed: bool,
    pub output: String,
    pub duration_ms: u64,
}

/// Runs a shell command with a bounded timeout.
pub struct ShellCompiler {
    pub command: String,
    pub cwd: PathBuf,
    pub timeout: Duration,
}

impl Compiler for ShellCompiler {
    fn compile(&self) -> CompileOutcome {
        let start = Instant::now();
        if self.command.trim().is_empty() {
            return CompileOutcome {
                passed: false,
                output: "compile command is empty".to_string(),
                duration_ms: 0,
            };
        }
        let (passed, output) = execute_shell(&self.command, &self.cwd, self.timeout);
        CompileOutcome {
            passed,
            output,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Execute a shell command, returning (success, combined output).
///
/// Uses dedicated threads for stdout/stderr reading (avoiding pipe-buffer
/// deadlocks) and a waiter thread with `mpsc::recv_timeout` for timeout
/// support. On expiry the process is killed and the check reports failure
/// rather than hanging.
fn execute_shell(command: &str, cwd: &Path, timeout: Duration) -> (bool, String) {
    let mut child = match Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(c) => c,
        Err(e) => return (false, format!("failed to spawn: {e}")),
    };

    let child_pid = child.id();

    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();

    let stdout_thread = std::thread::spawn(move || -> String {
        let mut buf = String::new();
        if let Some(mut r) = stdout_handle {
            use std::io::Read;
            let _ = r.read_to_string(&mut buf);
        }
        buf
    });
    let stderr_thread = std::thread::spawn(move || -> String {
        let mut buf = String::new();
        if let Some(mut r) = stderr_handle {
            use std::io::Read;
            let _ = r.read_to_string(&mut buf);
        }
        buf
    });

    // The child is moved to a waiter thread; on timeout we kill by PID.
    // The waiter unblocks once the killed process exits, and the reader
    // threads get EOF on the closed pipes.
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(child.wait());
    });

    let wait_result = match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(_) => {
            kill_process(child_pid);
            let secs = timeout.as_secs();
            return (false, format!("timed out after {secs}s"));
        }
    };

    let stdout_buf = stdout_thread.join().unwrap_or_default();
    let stderr_buf = stderr_thread.join().unwrap_or_default();

    let status = match wait_result {
        Ok(s) => s,
        Err(e) => return (false, format!("wait failed: {e}")),
    };

    format_output(status.success(), &stdout_buf, &stderr_buf)
}

/// Combine stdout/stderr and cap to 10KB (keeping the tail).
fn format_output(success: bool, stdout: &str, stderr: &str) -> (bool, String) {
    let output = if stderr.is_empty() {
        stdout.to_string()
    } else if stdout.is_empty() {
        stderr.to_string()
    } else {
        format!("{stdout}\n{stderr}")
    };
    const MAX_OUTPUT: usize = 10 * 1024;
    let trimmed = output.trim();
    let capped = if trimmed.len() > MAX_OUTPUT {
        &trimmed[trimmed.len() - MAX_OUTPUT..]
    } else {
        trimmed
    };
    (success, capped.to_string())
}

/// Terminate a process by PID using SIGKILL. Best-effort; errors are silently ignored.
fn kill_process(pid: u32) {
    let _ = Command::new("kill")
        .arg("-9")
        .arg(pid.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
