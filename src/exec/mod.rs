// src/exec/mod.rs

//! Invocation of the external retranslation tool.
//!
//! - [`command`] builds the argument list from an
//!   [`InvocationRequest`](crate::types::InvocationRequest).
//! - [`backend`] provides the [`Invoker`] trait and the production
//!   [`ProcessInvoker`] built on `tokio::process::Command`.
//! - [`runner`] holds the single-flight slot that keeps two runs from ever
//!   overlapping.

pub mod backend;
pub mod command;
pub mod runner;

pub use backend::{InvocationFuture, Invoker, ProcessInvoker};
pub use command::build_args;
pub use runner::InvocationRunner;
