use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;
use tracing::debug;

use retrans::errors::SpawnError;
use retrans::exec::{InvocationFuture, Invoker};
use retrans::types::{InvocationRequest, InvocationResult, ProcessOutput};

/// Scripted outcome for one fake invocation.
#[derive(Debug, Clone)]
pub enum FakeOutcome {
    Exit(ProcessOutput),
    SpawnFail,
}

impl FakeOutcome {
    pub fn ok(stdout: &str) -> Self {
        FakeOutcome::Exit(ProcessOutput {
            exit_code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        })
    }

    pub fn exit(code: i32, stderr: &str) -> Self {
        FakeOutcome::Exit(ProcessOutput {
            exit_code: code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        })
    }
}

#[derive(Debug, Default)]
struct Inner {
    calls: Mutex<Vec<InvocationRequest>>,
    script: Mutex<VecDeque<FakeOutcome>>,
    gate: Option<Semaphore>,
}

/// An invoker that:
/// - records every request it was asked to run
/// - returns scripted outcomes in order (then `exit 0` with stdout "OK")
/// - optionally holds each run open until the test calls [`release`].
///
/// Clones share state, so keep one clone in the test and move the other into
/// the runtime.
///
/// [`release`]: FakeInvoker::release
#[derive(Debug, Clone, Default)]
pub struct FakeInvoker {
    inner: Arc<Inner>,
}

impl FakeInvoker {
    /// Every run completes as soon as it starts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every run waits for one [`release`](Self::release) before completing.
    pub fn gated() -> Self {
        Self {
            inner: Arc::new(Inner {
                gate: Some(Semaphore::new(0)),
                ..Inner::default()
            }),
        }
    }

    /// Queue outcomes for the next runs.
    pub fn push_outcomes(&self, outcomes: impl IntoIterator<Item = FakeOutcome>) {
        self.inner.script.lock().unwrap().extend(outcomes);
    }

    /// Let one held run complete.
    pub fn release(&self) {
        if let Some(gate) = &self.inner.gate {
            gate.add_permits(1);
        }
    }

    /// Requests seen so far, in launch order.
    pub fn calls(&self) -> Vec<InvocationRequest> {
        self.inner.calls.lock().unwrap().clone()
    }
}

impl Invoker for FakeInvoker {
    fn invoke(&self, request: InvocationRequest) -> InvocationFuture {
        let inner = Arc::clone(&self.inner);

        Box::pin(async move {
            debug!(?request, "fake invocation started");
            inner.calls.lock().unwrap().push(request);

            if let Some(gate) = &inner.gate {
                if let Ok(permit) = gate.acquire().await {
                    permit.forget();
                }
            }

            let outcome = inner
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| FakeOutcome::ok("OK"));

            match outcome {
                FakeOutcome::Exit(out) => InvocationResult::Exited(out),
                FakeOutcome::SpawnFail => InvocationResult::SpawnFailed(SpawnError::Launch {
                    program: "fake".to_string(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                }),
            }
        })
    }
}
