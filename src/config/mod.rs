// src/config/mod.rs

//! Configuration loading and session resolution for retrans.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load an optional config file from disk (`loader.rs`).
//! - Merge CLI flags over the file into an immutable [`WatchSession`]
//!   (`session.rs`).

pub mod loader;
pub mod model;
pub mod session;

pub use loader::{DEFAULT_CONFIG_FILE, load_from_path, load_optional};
pub use model::{ConfigFile, ToolSection, WatchSection};
pub use session::{ToolCommand, WatchSession, resolve};
