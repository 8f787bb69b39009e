// src/status/mod.rs

//! Session status reporting.
//!
//! The engine never prints anything itself; it hands every state transition
//! to a [`StatusReporter`] injected at construction time.

pub mod console;

use std::path::PathBuf;

use crate::types::{InvocationResult, ProcessOutput};

pub use console::ConsoleReporter;

/// State transitions of a watch session, in the order they normally occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The watch is established on this path.
    Watching(PathBuf),
    /// A burst of edits settled; a run has been requested.
    ChangeDetected,
    /// The external tool was launched.
    Running,
    /// The tool exited 0; carries its stdout.
    Succeeded(String),
    /// The tool could not run or exited nonzero.
    Failed { message: String, stderr: String },
}

impl Status {
    /// Final status for a finished invocation.
    pub fn from_result(result: &InvocationResult) -> Self {
        match result {
            InvocationResult::Exited(out) if out.success() => Status::Succeeded(out.stdout.clone()),
            InvocationResult::Exited(out) => Status::Failed {
                message: exit_message(out),
                stderr: out.stderr.clone(),
            },
            InvocationResult::SpawnFailed(err) => Status::Failed {
                message: err.to_string(),
                stderr: String::new(),
            },
        }
    }
}

fn exit_message(out: &ProcessOutput) -> String {
    if out.exit_code < 0 {
        "process terminated by signal".to_string()
    } else {
        format!("process exited with code {}", out.exit_code)
    }
}

/// Sink for session status.
///
/// Called from the runtime loop at every transition, so implementations
/// must return promptly and must never wait on the runtime.
pub trait StatusReporter: Send {
    fn report(&self, status: Status);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SpawnError;

    fn exited(code: i32, stdout: &str, stderr: &str) -> InvocationResult {
        InvocationResult::Exited(ProcessOutput {
            exit_code: code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        })
    }

    #[test]
    fn zero_exit_succeeds_with_stdout() {
        assert_eq!(
            Status::from_result(&exited(0, "OK", "")),
            Status::Succeeded("OK".to_string())
        );
    }

    #[test]
    fn nonzero_exit_fails_with_stderr() {
        match Status::from_result(&exited(2, "", "bad locale")) {
            Status::Failed { message, stderr } => {
                assert!(message.contains('2'));
                assert_eq!(stderr, "bad locale");
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn spawn_failure_fails_with_launch_message() {
        let result = InvocationResult::SpawnFailed(SpawnError::Launch {
            program: "i18n".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });

        match Status::from_result(&result) {
            Status::Failed { message, stderr } => {
                assert!(message.contains("i18n"));
                assert!(stderr.is_empty());
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }
}
