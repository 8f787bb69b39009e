// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::errors::{Result, SpawnError};
use crate::exec::Invoker;
use crate::status::StatusReporter;
use crate::types::InvocationResult;
use crate::watch::Debouncer;

use super::core::CoreRuntime;
use super::{CoreCommand, RuntimeEvent};

/// Drives the core in response to `RuntimeEvent`s, owns the debounce timer
/// and the in-flight invocation, and delegates process execution to an
/// [`Invoker`] and presentation to a [`StatusReporter`].
///
/// All semantics live in `CoreRuntime`; this struct only does the async IO.
pub struct Runtime<I: Invoker, R: StatusReporter> {
    core: CoreRuntime,
    debouncer: Debouncer,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    invoker: I,
    reporter: R,
    in_flight: Option<JoinHandle<InvocationResult>>,
}

impl<I: Invoker, R: StatusReporter> fmt::Debug for Runtime<I, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("debouncer", &self.debouncer)
            .field("in_flight", &self.in_flight.is_some())
            .finish_non_exhaustive()
    }
}

impl<I: Invoker, R: StatusReporter> Runtime<I, R> {
    pub fn new(
        core: CoreRuntime,
        event_rx: mpsc::Receiver<RuntimeEvent>,
        invoker: I,
        reporter: R,
    ) -> Self {
        let debouncer = Debouncer::new(core.session().quiet_period());
        Self {
            core,
            debouncer,
            event_rx,
            invoker,
            reporter,
            in_flight: None,
        }
    }

    /// Main event loop.
    ///
    /// Waits on three sources at once: the event channel, the debounce
    /// deadline and the in-flight invocation. Each resolved source becomes a
    /// `RuntimeEvent` that is fed to the core; the returned commands are then
    /// executed in order.
    ///
    /// Returns after `ShutdownRequested` or once every event sender is gone.
    /// An invocation still running at that point is detached, not killed.
    pub async fn run(mut self) -> Result<()> {
        info!(
            path = %self.core.session().path().display(),
            quiet_period_ms = self.debouncer.quiet_period().as_millis() as u64,
            "retrans runtime started"
        );

        let start = self.core.start();
        for command in start.commands {
            self.execute_command(command);
        }

        loop {
            let event = tokio::select! {
                maybe = self.event_rx.recv() => match maybe {
                    Some(e) => e,
                    None => {
                        info!("runtime event channel closed; shutting down");
                        RuntimeEvent::ShutdownRequested
                    }
                },
                () = self.debouncer.elapsed() => RuntimeEvent::DebounceElapsed,
                result = wait_for_invocation(&mut self.in_flight) => {
                    RuntimeEvent::InvocationFinished(result)
                }
            };

            debug!(?event, "runtime received event");

            // Feed the event into the pure core and get commands back.
            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command);
            }

            if !step.keep_running {
                info!("core requested exit; stopping runtime");
                break;
            }
        }

        if self.in_flight.take().is_some() {
            info!("detaching in-flight retranslation; its result will be discarded");
        }

        info!("runtime exiting");
        Ok(())
    }

    /// Execute a single command from the core.
    fn execute_command(&mut self, command: CoreCommand) {
        match command {
            CoreCommand::ResetDebounce => {
                if self.debouncer.reset() {
                    debug!("burst continues; debounce deadline pushed back");
                }
            }
            CoreCommand::CancelDebounce => {
                if self.debouncer.cancel() {
                    info!("pending trigger cancelled");
                }
            }
            CoreCommand::Launch(request) => {
                if self.in_flight.is_some() {
                    // The core's single-flight slot should make this unreachable.
                    warn!("launch requested while an invocation is in flight");
                }
                debug!(?request, "launching retranslation");
                let invocation = self.invoker.invoke(request);
                self.in_flight = Some(tokio::spawn(invocation));
            }
            CoreCommand::Report(status) => {
                self.reporter.report(status);
            }
        }
    }
}

/// Resolve when the in-flight invocation finishes; never while idle.
///
/// Cancel-safe: dropping the future leaves the handle in place.
async fn wait_for_invocation(slot: &mut Option<JoinHandle<InvocationResult>>) -> InvocationResult {
    let joined = match slot.as_mut() {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    };
    *slot = None;

    joined.unwrap_or_else(|e| InvocationResult::SpawnFailed(SpawnError::Aborted(e.to_string())))
}
