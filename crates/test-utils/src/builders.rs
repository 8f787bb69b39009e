#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::NamedTempFile;

use retrans::config::{ToolCommand, WatchSession};

/// Builder for `WatchSession` to simplify test setup.
pub struct WatchSessionBuilder {
    path: PathBuf,
    locale: Option<String>,
    bucket: Option<String>,
    quiet_period: Duration,
    tool: ToolCommand,
}

impl WatchSessionBuilder {
    /// Start from an existing file with the default 1s quiet period.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            locale: None,
            bucket: None,
            quiet_period: Duration::from_millis(1000),
            tool: ToolCommand::default(),
        }
    }

    pub fn locale(mut self, locale: &str) -> Self {
        self.locale = Some(locale.to_string());
        self
    }

    pub fn bucket(mut self, bucket: &str) -> Self {
        self.bucket = Some(bucket.to_string());
        self
    }

    pub fn quiet_period_ms(mut self, ms: u64) -> Self {
        self.quiet_period = Duration::from_millis(ms);
        self
    }

    pub fn tool(mut self, program: &str, args: &[&str]) -> Self {
        self.tool = ToolCommand {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        };
        self
    }

    pub fn build(self) -> WatchSession {
        WatchSession::new(
            self.path,
            self.locale,
            self.bucket,
            self.quiet_period,
            self.tool,
        )
        .expect("Failed to build valid session from builder")
    }
}

/// A temporary `i18n.json`-style source file with some content.
pub fn source_file() -> NamedTempFile {
    let file = tempfile::Builder::new()
        .prefix("i18n")
        .suffix(".json")
        .tempfile()
        .expect("create temp source file");
    std::fs::write(file.path(), b"{\"locale\":{\"source\":\"en\"}}")
        .expect("write temp source file");
    file
}
