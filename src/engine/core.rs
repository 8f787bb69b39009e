// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`RuntimeEvent`]s and produces:
//! - an updated core state
//! - a list of "commands" describing what the IO shell should do next
//!
//! The async/IO-heavy shell (`engine::runtime::Runtime`) is responsible for:
//! - reading events from channels
//! - arming and cancelling the debounce timer
//! - spawning invocations and awaiting their completion
//! - forwarding statuses to the reporter
//!
//! The core is unit tested without any Tokio, channels, filesystem, or
//! processes.

use crate::config::WatchSession;
use crate::engine::RuntimeEvent;
use crate::engine::event_handlers::{
    CoreCommand, CoreStep, handle_debounce_elapsed, handle_file_change,
    handle_invocation_finished, handle_shutdown,
};
use crate::exec::InvocationRunner;
use crate::status::Status;

/// Pure core runtime state.
///
/// This owns:
/// - the immutable watch session
/// - the single-flight invocation slot
///
/// It has **no** channels, no Tokio types, and does not perform any IO.
#[derive(Debug)]
pub struct CoreRuntime {
    session: WatchSession,
    runner: InvocationRunner,
}

impl CoreRuntime {
    pub fn new(session: WatchSession) -> Self {
        Self {
            session,
            runner: InvocationRunner::new(),
        }
    }

    pub fn session(&self) -> &WatchSession {
        &self.session
    }

    /// Expose whether an invocation is in flight (for tests).
    pub fn is_busy(&self) -> bool {
        self.runner.is_busy()
    }

    /// Commands to run once the watch is established.
    pub fn start(&self) -> CoreStep {
        CoreStep::continue_with(vec![CoreCommand::Report(Status::Watching(
            self.session.path().to_path_buf(),
        ))])
    }

    /// Handle a single runtime event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        match event {
            RuntimeEvent::FileChanged(notification) => handle_file_change(notification),
            RuntimeEvent::DebounceElapsed => {
                handle_debounce_elapsed(&mut self.runner, self.session.request())
            }
            RuntimeEvent::InvocationFinished(result) => {
                handle_invocation_finished(&mut self.runner, result)
            }
            RuntimeEvent::ShutdownRequested => handle_shutdown(&mut self.runner),
        }
    }
}
