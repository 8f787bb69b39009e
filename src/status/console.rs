// src/status/console.rs

use std::io::Write;

use tracing::debug;

use super::{Status, StatusReporter};

/// Human-readable status lines on the terminal.
///
/// Progress and the tool's stdout go to stdout; failures and the tool's
/// stderr go to stderr.
#[derive(Debug, Clone, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// The line(s) written for `status`, split by stream.
    fn render(status: &Status) -> (Option<String>, Option<String>) {
        match status {
            Status::Watching(path) => (
                Some(format!("[retrans] Watching for changes in {}", path.display())),
                None,
            ),
            Status::ChangeDetected => (
                Some("[retrans] Change detected, triggering retranslation...".to_string()),
                None,
            ),
            Status::Running => (Some("[retrans] Retranslating...".to_string()), None),
            Status::Succeeded(stdout) => {
                let mut out = "[retrans] Retranslation completed successfully".to_string();
                if !stdout.trim().is_empty() {
                    out.push('\n');
                    out.push_str(stdout.trim_end());
                }
                (Some(out), None)
            }
            Status::Failed { message, stderr } => {
                let mut err = format!("[retrans] Retranslation failed: {message}");
                if !stderr.trim().is_empty() {
                    err.push('\n');
                    err.push_str(stderr.trim_end());
                }
                (None, Some(err))
            }
        }
    }
}

impl StatusReporter for ConsoleReporter {
    fn report(&self, status: Status) {
        // The console lines below are the user-facing output.
        debug!(?status, "status");

        let (out, err) = Self::render(&status);
        // A closed terminal is not worth tearing the session down for.
        if let Some(line) = out {
            let _ = writeln!(std::io::stdout().lock(), "{line}");
        }
        if let Some(line) = err {
            let _ = writeln!(std::io::stderr().lock(), "{line}");
        }
    }
}
