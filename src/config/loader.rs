// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::config::model::ConfigFile;
use crate::errors::Result;

/// Config file picked up from the current directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "Retrans.toml";

/// Load and deserialize a configuration file.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file {:?}", path))?;

    let config: ConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load the config file the user asked for, or the default one if it exists.
///
/// - An explicit path must exist; a missing file is an error.
/// - Without an explicit path, a missing `Retrans.toml` simply yields the
///   empty config (all defaults).
pub fn load_optional(explicit: Option<&Path>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => load_from_path(path),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if path.is_file() {
                debug!(?path, "loading default config file");
                load_from_path(&path)
            } else {
                Ok(ConfigFile::default())
            }
        }
    }
}
