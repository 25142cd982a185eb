//! # Process Runner
//!
//! Launches the scanner as a child process and supervises it to completion.
//! Stdout and stderr are drained by two independent tasks so a chatty stream
//! can never fill its pipe and stall the child while the other stream is idle.
//!
//! The child inherits this process's environment unchanged; the scanner relies on
//! it for `PATH`, proxies, and its own config locations.

use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::domain::traits::CommandRunner;
use crate::domain::types::ProcessOutcome;
use crate::strings::{logs, messages};

/// Runs external commands without a shell.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    /// Optional deadline per run. `None` leaves timing to the transport.
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

/// Caller cancellation and the run deadline, shared by the supervisor and both drains.
#[derive(Clone)]
struct Interrupt {
    cancel: CancellationToken,
    deadline: Option<(Instant, Duration)>,
}

impl Interrupt {
    fn new(cancel: CancellationToken, timeout: Option<Duration>) -> Self {
        Self {
            cancel,
            deadline: timeout.map(|t| (Instant::now() + t, t)),
        }
    }

    /// Resolves with the reason once the run must stop.
    async fn fired(&self) -> String {
        let deadline = async {
            match self.deadline {
                Some((at, _)) => tokio::time::sleep_until(at).await,
                None => std::future::pending().await,
            }
        };
        tokio::select! {
            _ = self.cancel.cancelled() => messages::CANCELLED_BY_CALLER.to_string(),
            _ = deadline => messages::deadline_exceeded(
                self.deadline.map_or(0, |(_, t)| t.as_secs()),
            ),
        }
    }
}

/// Why supervision stopped waiting on the child.
enum Stop {
    Exited(std::io::Result<ExitStatus>),
    Interrupted(String),
}

/// What a drain task hands back.
enum Drained {
    Complete(String),
    Interrupted(String),
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        cancel: CancellationToken,
    ) -> ProcessOutcome {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                return ProcessOutcome::LaunchFailed {
                    reason: e.to_string(),
                };
            }
        };
        tracing::debug!(program, pid = ?child.id(), "Spawned scanner process");

        let interrupt = Interrupt::new(cancel, self.timeout);
        let stdout_task = tokio::spawn(drain(child.stdout.take(), "stdout", interrupt.clone()));
        let stderr_task = tokio::spawn(drain(child.stderr.take(), "stderr", interrupt.clone()));

        let stop = tokio::select! {
            status = child.wait() => Stop::Exited(status),
            reason = interrupt.fired() => Stop::Interrupted(reason),
        };

        match stop {
            Stop::Exited(status) => {
                // Both streams must hit EOF before anything is returned. A grandchild
                // holding a pipe open keeps them alive, so the drains watch the interrupt too.
                let stdout = collect(stdout_task).await;
                let stderr = collect(stderr_task).await;
                match (stdout, stderr) {
                    (Drained::Complete(stdout), Drained::Complete(stderr)) => {
                        classify(status, stdout, stderr)
                    }
                    (Drained::Interrupted(reason), _) | (_, Drained::Interrupted(reason)) => {
                        tracing::warn!(program, %reason, "Scanner output still open after exit, interrupted");
                        ProcessOutcome::Cancelled { reason }
                    }
                }
            }
            Stop::Interrupted(reason) => {
                terminate(&mut child).await;
                stdout_task.abort();
                stderr_task.abort();
                let _ = stdout_task.await;
                let _ = stderr_task.await;
                tracing::warn!(program, %reason, "Scanner process interrupted");
                ProcessOutcome::Cancelled { reason }
            }
        }
    }
}

fn classify(status: std::io::Result<ExitStatus>, stdout: String, stderr: String) -> ProcessOutcome {
    let status = match status {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!("{}", logs::wait_failed(&e.to_string()));
            return ProcessOutcome::CompletedUnknownCode {
                stdout,
                stderr,
                signal: None,
            };
        }
    };

    match status.code() {
        Some(0) => ProcessOutcome::Completed {
            stdout,
            exit_code: 0,
        },
        Some(exit_code) => ProcessOutcome::Failed { stderr, exit_code },
        None => ProcessOutcome::CompletedUnknownCode {
            stdout,
            stderr,
            signal: termination_signal(&status),
        },
    }
}

#[cfg(unix)]
fn termination_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn termination_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Reads a stream to EOF into a single buffer, converted once at the end.
async fn drain<R>(stream: Option<R>, name: &'static str, interrupt: Interrupt) -> Drained
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    if let Some(mut stream) = stream {
        tokio::select! {
            result = stream.read_to_end(&mut buf) => {
                if let Err(e) = result {
                    // Keep whatever arrived before the error.
                    tracing::warn!("{}", logs::stream_read_failed(name, &e.to_string()));
                }
            }
            reason = interrupt.fired() => return Drained::Interrupted(reason),
        }
    }
    Drained::Complete(String::from_utf8_lossy(&buf).into_owned())
}

async fn collect(task: JoinHandle<Drained>) -> Drained {
    task.await.unwrap_or_else(|e| {
        tracing::warn!("Output drain task failed: {}", e);
        Drained::Complete(String::new())
    })
}

async fn terminate(child: &mut Child) {
    if let Err(e) = child.start_kill() {
        tracing::debug!("Kill failed, process likely already exited: {}", e);
    }
    // Reap so no zombie is left in the process table.
    if let Err(e) = child.wait().await {
        tracing::warn!("{}", logs::wait_failed(&e.to_string()));
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Instant;

    async fn sh(script: &str) -> ProcessOutcome {
        ProcessRunner::default()
            .run(
                "sh",
                &["-c".to_string(), script.to_string()],
                CancellationToken::new(),
            )
            .await
    }

    #[tokio::test]
    async fn test_success_captures_stdout() {
        let outcome = sh("printf 'one\\ntwo\\n'; echo noise >&2").await;
        assert_eq!(
            outcome,
            ProcessOutcome::Completed {
                stdout: "one\ntwo\n".into(),
                exit_code: 0
            }
        );
    }

    #[tokio::test]
    async fn test_non_zero_exit_captures_stderr() {
        let outcome = sh("echo out; printf 'bad flag' >&2; exit 2").await;
        assert_eq!(
            outcome,
            ProcessOutcome::Failed {
                stderr: "bad flag".into(),
                exit_code: 2
            }
        );
    }

    #[tokio::test]
    async fn test_missing_executable_is_launch_failure() {
        let outcome = ProcessRunner::default()
            .run(
                "definitely-not-a-real-scanner-binary",
                &[],
                CancellationToken::new(),
            )
            .await;
        let ProcessOutcome::LaunchFailed { reason } = &outcome else {
            panic!("expected launch failure, got {outcome:?}");
        };
        assert!(!reason.is_empty());
    }

    #[tokio::test]
    async fn test_arguments_are_not_shell_interpreted() {
        let outcome = ProcessRunner::default()
            .run(
                "printf",
                &["%s|".to_string(), "a b; echo pwned".to_string(), "$(id)".to_string()],
                CancellationToken::new(),
            )
            .await;
        assert_eq!(
            outcome,
            ProcessOutcome::Completed {
                stdout: "a b; echo pwned|$(id)|".into(),
                exit_code: 0
            }
        );
    }

    #[tokio::test]
    async fn test_heavy_output_on_both_streams_does_not_deadlock() {
        // Well past the usual 64KiB pipe buffer on each stream.
        let script = "i=0; while [ $i -lt 4000 ]; do \
                      echo 'stderr line padded to make the pipe fill up quickly' >&2; \
                      echo \"stdout $i\"; i=$((i+1)); done";
        let outcome = tokio::time::timeout(Duration::from_secs(30), sh(script))
            .await
            .expect("runner stalled");
        let ProcessOutcome::Completed { stdout, .. } = &outcome else {
            panic!("expected success, got {outcome:?}");
        };
        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!(lines.len(), 4000);
        assert_eq!(lines[0], "stdout 0");
        assert_eq!(lines[3999], "stdout 3999");
    }

    #[tokio::test]
    async fn test_signal_is_unknown_code() {
        let outcome = sh("echo before; kill -9 $$").await;
        assert_eq!(
            outcome,
            ProcessOutcome::CompletedUnknownCode {
                stdout: "before\n".into(),
                stderr: String::new(),
                signal: Some(9)
            }
        );
    }

    #[tokio::test]
    async fn test_cancellation_kills_process() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let started = Instant::now();
        let outcome = ProcessRunner::default()
            .run("sleep", &["30".to_string()], cancel)
            .await;

        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(
            outcome,
            ProcessOutcome::Cancelled {
                reason: "request cancelled by caller".into()
            }
        );
    }

    #[tokio::test]
    async fn test_deadline_kills_process() {
        let started = Instant::now();
        let outcome = ProcessRunner::new(Some(Duration::from_secs(1)))
            .run("sleep", &["30".to_string()], CancellationToken::new())
            .await;

        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(
            outcome,
            ProcessOutcome::Cancelled {
                reason: "no result within 1s".into()
            }
        );
    }

    #[tokio::test]
    async fn test_deadline_applies_while_grandchild_holds_pipes() {
        let started = Instant::now();
        let outcome = tokio::time::timeout(
            Duration::from_secs(8),
            ProcessRunner::new(Some(Duration::from_secs(1))).run(
                "sh",
                &["-c".to_string(), "sleep 20 & echo hi".to_string()],
                CancellationToken::new(),
            ),
        )
        .await
        .expect("deadline ignored after the shell exited");

        assert!(started.elapsed() < Duration::from_secs(8));
        assert_eq!(
            outcome,
            ProcessOutcome::Cancelled {
                reason: "no result within 1s".into()
            }
        );
    }

    #[tokio::test]
    async fn test_cancellation_applies_while_grandchild_holds_pipes() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            trigger.cancel();
        });

        let outcome = tokio::time::timeout(
            Duration::from_secs(8),
            ProcessRunner::default().run(
                "sh",
                &["-c".to_string(), "sleep 20 & echo hi".to_string()],
                cancel,
            ),
        )
        .await
        .expect("cancellation ignored after the shell exited");

        assert_eq!(
            outcome,
            ProcessOutcome::Cancelled {
                reason: "request cancelled by caller".into()
            }
        );
    }

    #[tokio::test]
    async fn test_environment_is_inherited() {
        let Ok(home) = std::env::var("HOME") else {
            return;
        };
        let outcome = sh("printf %s \"$HOME\"").await;
        assert_eq!(
            outcome,
            ProcessOutcome::Completed {
                stdout: home,
                exit_code: 0
            }
        );

        if let Ok(path) = std::env::var("PATH") {
            let outcome = sh("printf %s \"$PATH\"").await;
            assert_eq!(
                outcome,
                ProcessOutcome::Completed {
                    stdout: path,
                    exit_code: 0
                }
            );
        }
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_lossy() {
        let outcome = sh("printf 'ok\\377'").await;
        let ProcessOutcome::Completed { stdout, .. } = &outcome else {
            panic!("expected success, got {outcome:?}");
        };
        assert!(stdout.starts_with("ok"));
        assert!(stdout.contains('\u{FFFD}'));
    }
}
