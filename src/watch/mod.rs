// src/watch/mod.rs

//! File watching and change coalescing.
//!
//! - [`watcher`] turns OS filesystem events (`notify`) for one file into
//!   [`ChangeNotification`](crate::types::ChangeNotification)s and forwards
//!   them to the runtime.
//! - [`debounce`] is the single-slot deadline that collapses a burst of
//!   notifications into one trigger.
//!
//! Neither knows anything about the retranslation tool.

pub mod debounce;
pub mod watcher;

pub use debounce::Debouncer;
pub use watcher::{ChangeSource, WatcherHandle, check_source, is_content_change, spawn_watcher};
