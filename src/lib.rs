// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod status;
pub mod types;
pub mod watch;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::{CliArgs, Command, WatchArgs};
use crate::config::{WatchSession, load_optional, resolve};
use crate::engine::{CoreRuntime, Runtime, RuntimeEvent};
use crate::errors::Result;
use crate::exec::ProcessInvoker;
use crate::status::ConsoleReporter;
use crate::watch::{ChangeSource, spawn_watcher};

/// High-level entry point used by `main.rs`.
pub async fn run(args: CliArgs) -> Result<()> {
    match args.command {
        Command::Watch(watch) => run_watch(watch).await,
    }
}

/// The `watch` command.
///
/// This wires together:
/// - config loading and session resolution (fails fast on a missing source)
/// - the file watcher
/// - Ctrl-C handling
/// - the runtime with the process invoker and console reporter
pub async fn run_watch(args: WatchArgs) -> Result<()> {
    let file = load_optional(args.config.as_deref())?;
    let session = resolve(&args, &file)?;

    if args.dry_run {
        print_dry_run(&session);
        return Ok(());
    }

    let source = ChangeSource::open(session.path())?;

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let _watcher_handle = spawn_watcher(source, rt_tx.clone());

    // Ctrl-C → graceful shutdown.
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            return;
        }
        let _ = rt_tx.send(RuntimeEvent::ShutdownRequested).await;
    });

    let invoker = ProcessInvoker::new(session.tool().clone());
    info!(command = %session, "retranslation command");

    let core = CoreRuntime::new(session);
    let runtime = Runtime::new(core, rt_rx, invoker, ConsoleReporter::new());
    runtime.run().await
}

/// Print the resolved session without watching or running anything.
fn print_dry_run(session: &WatchSession) {
    println!("retrans dry-run");
    println!("  source = {}", session.path().display());
    println!("  quiet_period_ms = {}", session.quiet_period().as_millis());
    if let Some(locale) = session.locale() {
        println!("  locale = {locale}");
    }
    if let Some(bucket) = session.bucket() {
        println!("  bucket = {bucket}");
    }
    println!("  command = {session}");

    debug!("dry-run complete (no execution)");
}
