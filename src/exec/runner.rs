// src/exec/runner.rs

//! Single-flight invocation slot.

use tracing::debug;

use crate::types::InvocationRequest;

/// Guarantees at most one invocation in flight per session.
///
/// Semantics:
/// - While idle, [`submit`](Self::submit) hands the request straight back to
///   be launched and marks the runner busy.
/// - While busy, the request goes into a single queued slot, replacing
///   whatever was there (last write wins).
/// - [`complete`](Self::complete) releases the in-flight invocation and hands
///   back the queued request, if any, to launch next.
///
/// The runner does no IO; the caller launches whatever it is handed.
#[derive(Debug, Default)]
pub struct InvocationRunner {
    in_flight: bool,
    queued: Option<InvocationRequest>,
}

impl InvocationRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn queued(&self) -> Option<&InvocationRequest> {
        self.queued.as_ref()
    }

    /// Offer a request. Returns it back if it should be launched now.
    pub fn submit(&mut self, request: InvocationRequest) -> Option<InvocationRequest> {
        if !self.in_flight {
            self.in_flight = true;
            return Some(request);
        }

        let replaced = self.queued.replace(request).is_some();
        debug!(replaced, "invocation in flight; queued request for later");
        None
    }

    /// Mark the in-flight invocation finished.
    ///
    /// Returns the queued request to launch immediately; the runner stays
    /// busy in that case.
    pub fn complete(&mut self) -> Option<InvocationRequest> {
        match self.queued.take() {
            Some(next) => {
                self.in_flight = true;
                Some(next)
            }
            None => {
                self.in_flight = false;
                None
            }
        }
    }

    /// Forget the queued request and the in-flight marker.
    ///
    /// Used at teardown; the in-flight process itself is left alone.
    pub fn detach(&mut self) -> Option<InvocationRequest> {
        self.in_flight = false;
        self.queued.take()
    }
}
