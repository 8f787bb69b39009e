use std::time::Instant;

use crate::errors::SpawnError;

/// A single detected modification of the watched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeNotification {
    pub at: Instant,
}

impl ChangeNotification {
    pub fn now() -> Self {
        Self { at: Instant::now() }
    }
}

/// Filters passed through to the external retranslation executable.
///
/// Derived from the [`WatchSession`](crate::config::WatchSession) each time a
/// trigger fires.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationRequest {
    pub locale: Option<String>,
    pub bucket: Option<String>,
}

/// What a process that actually ran left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, or `-1` when the process was terminated by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Outcome of one invocation.
///
/// A nonzero exit is still `Exited`; only a process that could not be run at
/// all is `SpawnFailed`.
#[derive(Debug)]
pub enum InvocationResult {
    Exited(ProcessOutput),
    SpawnFailed(SpawnError),
}
