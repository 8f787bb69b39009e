// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_SOURCE: &str = "i18n.json";
pub const DEFAULT_QUIET_PERIOD_MS: u64 = 1000;
pub const DEFAULT_TOOL: &str = "i18n";

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [watch]
/// source = "i18n.json"
/// quiet_period_ms = 1000
/// locale = "fr"
///
/// [tool]
/// program = "i18n"
/// args = ["--frozen"]
/// ```
///
/// Every section is optional. Values left unset here fall back to CLI flags
/// and then to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub tool: ToolSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// File to watch, relative to the current directory.
    #[serde(default)]
    pub source: Option<PathBuf>,

    #[serde(default)]
    pub locale: Option<String>,

    #[serde(default)]
    pub bucket: Option<String>,

    /// Debounce window in milliseconds.
    #[serde(default)]
    pub quiet_period_ms: Option<u64>,
}

/// `[tool]` section: the external retranslation executable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolSection {
    #[serde(default)]
    pub program: Option<String>,

    /// Arguments placed before the `--locale` / `--bucket` filters.
    #[serde(default)]
    pub args: Vec<String>,
}
