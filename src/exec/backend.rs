// src/exec/backend.rs

//! Pluggable invoker abstraction.
//!
//! The runtime talks to an [`Invoker`] instead of spawning processes itself.
//! Production uses [`ProcessInvoker`]; tests can provide an invoker that
//! records requests and returns scripted results without touching the OS.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::config::ToolCommand;
use crate::errors::SpawnError;
use crate::exec::command::build_args;
use crate::types::{InvocationRequest, InvocationResult, ProcessOutput};

/// Boxed future returned by [`Invoker::invoke`].
pub type InvocationFuture = Pin<Box<dyn Future<Output = InvocationResult> + Send + 'static>>;

/// Trait abstracting how one retranslation run is carried out.
pub trait Invoker: Send + Sync {
    /// Run the external tool once for `request`.
    ///
    /// The future owns everything it needs, so the caller can hand it to
    /// `tokio::spawn`. It always resolves; failures are encoded in the
    /// [`InvocationResult`].
    fn invoke(&self, request: InvocationRequest) -> InvocationFuture;
}

/// Runs the configured executable as a child process and captures its
/// output.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    tool: ToolCommand,
}

impl ProcessInvoker {
    pub fn new(tool: ToolCommand) -> Self {
        Self { tool }
    }
}

impl Invoker for ProcessInvoker {
    fn invoke(&self, request: InvocationRequest) -> InvocationFuture {
        let program = self.tool.program.clone();
        let args = build_args(&self.tool.args, &request);

        Box::pin(async move { run_process(program, args).await })
    }
}

async fn run_process(program: String, args: Vec<String>) -> InvocationResult {
    info!(%program, ?args, "starting retranslation process");

    // No kill_on_drop: a detached invocation keeps running after teardown.
    let child = Command::new(&program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();

    let child = match child {
        Ok(c) => c,
        Err(source) => {
            return InvocationResult::SpawnFailed(SpawnError::Launch { program, source });
        }
    };

    let output = match child.wait_with_output().await {
        Ok(o) => o,
        Err(source) => {
            return InvocationResult::SpawnFailed(SpawnError::Wait { program, source });
        }
    };

    let exit_code = output.status.code().unwrap_or(-1);
    info!(
        %program,
        exit_code,
        success = output.status.success(),
        "retranslation process exited"
    );

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    debug!(%program, stdout_len = stdout.len(), stderr_len = stderr.len(), "captured output");

    InvocationResult::Exited(ProcessOutput {
        exit_code,
        stdout,
        stderr,
    })
}
