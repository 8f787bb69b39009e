// src/engine/event_handlers.rs

//! Event handling logic for the core runtime.

use tracing::{debug, info};

use crate::exec::InvocationRunner;
use crate::status::Status;
use crate::types::{ChangeNotification, InvocationRequest, InvocationResult};

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// (Re)arm the debounce deadline one quiet period from now.
    ResetDebounce,
    /// Drop the debounce deadline without firing.
    CancelDebounce,
    /// Start the external tool for this request.
    Launch(InvocationRequest),
    /// Hand this status to the reporter.
    Report(Status),
}

/// Decision returned by the core after handling a single event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    /// Commands the IO shell should execute, in order.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    pub(crate) fn continue_with(commands: Vec<CoreCommand>) -> Self {
        Self {
            commands,
            keep_running: true,
        }
    }
}

/// A file change only pushes the debounce deadline back.
pub fn handle_file_change(notification: ChangeNotification) -> CoreStep {
    debug!(?notification, "change notification; resetting debounce");
    CoreStep::continue_with(vec![CoreCommand::ResetDebounce])
}

/// The burst settled: announce it and launch unless a run is in flight.
pub fn handle_debounce_elapsed(
    runner: &mut InvocationRunner,
    request: InvocationRequest,
) -> CoreStep {
    let mut commands = vec![CoreCommand::Report(Status::ChangeDetected)];

    match runner.submit(request) {
        Some(launch) => push_launch(&mut commands, launch),
        None => info!("retranslation already running; will run again when it finishes"),
    }

    CoreStep::continue_with(commands)
}

/// Report the finished run, then start the queued one if there is one.
pub fn handle_invocation_finished(
    runner: &mut InvocationRunner,
    result: InvocationResult,
) -> CoreStep {
    let mut commands = vec![CoreCommand::Report(Status::from_result(&result))];

    if let Some(next) = runner.complete() {
        debug!(?next, "launching queued retranslation");
        push_launch(&mut commands, next);
    }

    CoreStep::continue_with(commands)
}

/// Tear down: no trailing trigger, nothing further launched.
pub fn handle_shutdown(runner: &mut InvocationRunner) -> CoreStep {
    if runner.detach().is_some() {
        debug!("dropping queued retranslation at shutdown");
    }

    CoreStep {
        commands: vec![CoreCommand::CancelDebounce],
        keep_running: false,
    }
}

fn push_launch(commands: &mut Vec<CoreCommand>, request: InvocationRequest) {
    commands.push(CoreCommand::Report(Status::Running));
    commands.push(CoreCommand::Launch(request));
}
