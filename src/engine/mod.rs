// src/engine/mod.rs

//! Orchestration engine for retrans.
//!
//! This module ties together:
//! - the debounce deadline (when to fire)
//! - the single-flight invocation slot (whether to launch now or later)
//! - the main runtime event loop that reacts to:
//!   - file change notifications
//!   - debounce expiry
//!   - invocation completion
//!   - shutdown signals
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use crate::types::{ChangeNotification, InvocationResult};

/// Events flowing into the runtime from the watcher, the timer and the
/// invoker.
#[derive(Debug)]
pub enum RuntimeEvent {
    /// The watched file was modified.
    FileChanged(ChangeNotification),
    /// The debounce deadline passed without being reset.
    DebounceElapsed,
    /// The in-flight invocation finished.
    InvocationFinished(InvocationResult),
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod core;
pub mod event_handlers;
pub mod runtime;

pub use self::core::CoreRuntime;
pub use event_handlers::{CoreCommand, CoreStep};
pub use runtime::Runtime;
