// src/config/session.rs

//! Resolution of CLI flags and config file into a [`WatchSession`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::WatchArgs;
use crate::config::model::{ConfigFile, DEFAULT_QUIET_PERIOD_MS, DEFAULT_SOURCE, DEFAULT_TOOL};
use crate::errors::{Result, RetransError};
use crate::exec::command::build_args;
use crate::types::InvocationRequest;
use crate::watch::watcher::check_source;

/// The external executable plus the arguments that precede the filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for ToolCommand {
    fn default() -> Self {
        Self {
            program: DEFAULT_TOOL.to_string(),
            args: Vec::new(),
        }
    }
}

/// Everything one watch session needs, fixed at startup.
///
/// Only [`resolve`] builds a session from user input, and it refuses to do
/// so when the source file is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchSession {
    path: PathBuf,
    locale: Option<String>,
    bucket: Option<String>,
    quiet_period: Duration,
    tool: ToolCommand,
}

impl WatchSession {
    /// Build a session for an existing, readable file.
    ///
    /// `path` is made absolute against the current directory with `.` and
    /// `..` folded away. Empty filters count as unset.
    pub fn new(
        path: impl AsRef<Path>,
        locale: Option<String>,
        bucket: Option<String>,
        quiet_period: Duration,
        tool: ToolCommand,
    ) -> Result<Self> {
        let path = check_source(path.as_ref())?;
        if tool.program.trim().is_empty() {
            return Err(RetransError::ConfigError(
                "tool program must not be empty".to_string(),
            ));
        }

        Ok(Self {
            path,
            locale: non_empty(locale),
            bucket: non_empty(bucket),
            quiet_period,
            tool,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn bucket(&self) -> Option<&str> {
        self.bucket.as_deref()
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    pub fn tool(&self) -> &ToolCommand {
        &self.tool
    }

    /// The request every trigger in this session produces.
    pub fn request(&self) -> InvocationRequest {
        InvocationRequest {
            locale: self.locale.clone(),
            bucket: self.bucket.clone(),
        }
    }
}

impl fmt::Display for WatchSession {
    /// Shell-ish rendering of the command a trigger would run.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tool.program)?;
        for arg in build_args(&self.tool.args, &self.request()) {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Merge CLI flags over the config file over built-in defaults.
pub fn resolve(args: &WatchArgs, file: &ConfigFile) -> Result<WatchSession> {
    let source = args
        .source
        .clone()
        .or_else(|| file.watch.source.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE));

    let locale = args.locale.clone().or_else(|| file.watch.locale.clone());
    let bucket = args.bucket.clone().or_else(|| file.watch.bucket.clone());

    let quiet_period_ms = args
        .quiet_period_ms
        .or(file.watch.quiet_period_ms)
        .unwrap_or(DEFAULT_QUIET_PERIOD_MS);

    let tool = ToolCommand {
        program: args
            .tool
            .clone()
            .or_else(|| file.tool.program.clone())
            .unwrap_or_else(|| DEFAULT_TOOL.to_string()),
        args: file.tool.args.clone(),
    };

    WatchSession::new(
        source,
        locale,
        bucket,
        Duration::from_millis(quiet_period_ms),
        tool,
    )
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::{ToolSection, WatchSection};

    fn existing_file() -> tempfile::NamedTempFile {
        tempfile::NamedTempFile::new().unwrap()
    }

    #[test]
    fn missing_source_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("i18n.json");
        let args = WatchArgs {
            source: Some(missing.clone()),
            ..WatchArgs::default()
        };

        match resolve(&args, &ConfigFile::default()) {
            Err(RetransError::SourceNotFound(path)) => assert_eq!(path, missing),
            other => panic!("expected SourceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn directory_source_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let args = WatchArgs {
            source: Some(dir.path().to_path_buf()),
            ..WatchArgs::default()
        };

        match resolve(&args, &ConfigFile::default()) {
            Err(RetransError::SourceNotAFile(path)) => assert_eq!(path, dir.path()),
            other => panic!("expected SourceNotAFile, got {:?}", other),
        }
    }

    #[test]
    fn source_path_is_normalized() {
        let file = existing_file();
        let dir = file.path().parent().unwrap();
        let dotted = dir
            .join("lang")
            .join("..")
            .join(file.path().file_name().unwrap());
        let args = WatchArgs {
            source: Some(dotted),
            ..WatchArgs::default()
        };

        let session = resolve(&args, &ConfigFile::default()).unwrap();
        assert_eq!(session.path(), file.path());
    }

    #[test]
    fn not_found_message_names_the_path() {
        let err = RetransError::SourceNotFound(PathBuf::from("/tmp/x/i18n.json"));
        assert_eq!(err.to_string(), "Source file \"/tmp/x/i18n.json\" not found.");
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let file = existing_file();
        let args = WatchArgs {
            source: Some(file.path().to_path_buf()),
            ..WatchArgs::default()
        };

        let session = resolve(&args, &ConfigFile::default()).unwrap();
        assert!(session.path().is_absolute());
        assert_eq!(session.quiet_period(), Duration::from_millis(1000));
        assert_eq!(session.tool(), &ToolCommand::default());
        assert_eq!(session.request(), InvocationRequest::default());
    }

    #[test]
    fn cli_flags_override_config_file() {
        let file = existing_file();
        let cfg = ConfigFile {
            watch: WatchSection {
                source: Some(PathBuf::from("does-not-matter.json")),
                locale: Some("de".to_string()),
                bucket: Some("docs".to_string()),
                quiet_period_ms: Some(50),
            },
            tool: ToolSection {
                program: Some("lingo".to_string()),
                args: vec!["i18n".to_string()],
            },
        };
        let args = WatchArgs {
            source: Some(file.path().to_path_buf()),
            locale: Some("fr".to_string()),
            quiet_period_ms: Some(10),
            ..WatchArgs::default()
        };

        let session = resolve(&args, &cfg).unwrap();
        assert_eq!(session.locale(), Some("fr"));
        assert_eq!(session.bucket(), Some("docs"));
        assert_eq!(session.quiet_period(), Duration::from_millis(10));
        assert_eq!(session.tool().program, "lingo");
        assert_eq!(session.tool().args, vec!["i18n"]);
    }

    #[test]
    fn empty_filters_count_as_unset() {
        let file = existing_file();
        let args = WatchArgs {
            source: Some(file.path().to_path_buf()),
            locale: Some(String::new()),
            bucket: Some("  ".to_string()),
            ..WatchArgs::default()
        };

        let session = resolve(&args, &ConfigFile::default()).unwrap();
        assert!(session.locale().is_none());
        assert!(session.bucket().is_none());
    }

    #[test]
    fn empty_tool_program_is_a_config_error() {
        let file = existing_file();
        let args = WatchArgs {
            source: Some(file.path().to_path_buf()),
            tool: Some(String::new()),
            ..WatchArgs::default()
        };

        assert!(matches!(
            resolve(&args, &ConfigFile::default()),
            Err(RetransError::ConfigError(_))
        ));
    }

    #[test]
    fn display_renders_the_command_line() {
        let file = existing_file();
        let session = WatchSession::new(
            file.path(),
            Some("fr".to_string()),
            None,
            Duration::ZERO,
            ToolCommand::default(),
        )
        .unwrap();

        assert_eq!(session.to_string(), "i18n --locale fr");
    }
}
