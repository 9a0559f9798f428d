use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use unconf_engine::EngineConfig;

const CONFIG_DIR_NAME: &str = "unconf";
const CONFIG_FILE_NAME: &str = "config.toml";

/// On-disk CLI configuration (`config.toml`).
///
/// ```toml
/// [engine]
/// display_timezone = "Europe/Berlin"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub engine: EngineConfig,
}

/// `<config_dir>/unconf/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration from `explicit`, or from the default location.
///
/// An explicit path must exist; a missing default file yields defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("no config file, using defaults");
                return Ok(FileConfig::default());
            }
        },
    };

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: FileConfig = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.engine.display_timezone, "Europe/Berlin");
    }

    #[test]
    fn engine_section_overrides_timezone() {
        let config: FileConfig =
            toml::from_str("[engine]\ndisplay_timezone = \"America/New_York\"\n").unwrap();
        assert_eq!(config.engine.display_timezone, "America/New_York");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/unconf.toml"))).is_err());
    }
}
