// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line arguments for `retrans`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "retrans",
    version,
    about = "Re-run the retranslation tool whenever the i18n source file changes.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RETRANS_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Watch source file for changes and trigger retranslation.
    Watch(WatchArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct WatchArgs {
    /// Path to the source file to watch.
    ///
    /// Default: `i18n.json` (or `[watch].source` from the config file).
    #[arg(long, value_name = "FILE")]
    pub source: Option<PathBuf>,

    /// Locale to process.
    #[arg(long, value_name = "LOCALE")]
    pub locale: Option<String>,

    /// Bucket to process.
    #[arg(long, value_name = "BUCKET")]
    pub bucket: Option<String>,

    /// Quiet period in milliseconds before a burst of edits fires a run.
    #[arg(long, value_name = "MS")]
    pub quiet_period_ms: Option<u64>,

    /// Retranslation executable to invoke (looked up on PATH).
    #[arg(long, value_name = "PROGRAM")]
    pub tool: Option<String>,

    /// Path to an optional config file (TOML).
    ///
    /// Default: `Retrans.toml` in the current directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Resolve and print the session, but don't watch or run anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_accepts_filters() {
        let args = CliArgs::try_parse_from([
            "retrans", "watch", "--source", "lang/en.json", "--locale", "fr", "--bucket", "web",
        ])
        .unwrap();

        let Command::Watch(watch) = args.command;
        assert_eq!(watch.source, Some(PathBuf::from("lang/en.json")));
        assert_eq!(watch.locale.as_deref(), Some("fr"));
        assert_eq!(watch.bucket.as_deref(), Some("web"));
        assert!(!watch.dry_run);
    }

    #[test]
    fn watch_flags_are_optional() {
        let args = CliArgs::try_parse_from(["retrans", "watch"]).unwrap();
        let Command::Watch(watch) = args.command;
        assert!(watch.source.is_none());
        assert!(watch.locale.is_none());
        assert!(watch.bucket.is_none());
        assert!(watch.quiet_period_ms.is_none());
    }

    #[test]
    fn log_level_is_global() {
        let args =
            CliArgs::try_parse_from(["retrans", "watch", "--log-level", "debug"]).unwrap();
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(CliArgs::try_parse_from(["retrans"]).is_err());
    }
}
