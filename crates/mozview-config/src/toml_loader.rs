//! TOML config file loading and creation.

use crate::schema::MozviewConfig;
use crate::validation;
use mozview_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[cfg(test)]
mod tests;

/// Load config from a specific TOML file path.
///
/// Missing fields take serde defaults. A file that parses but fails
/// validation is reported with a warning and replaced by the default config.
pub fn load_from_path(path: &Path) -> Result<MozviewConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
    })?;

    let config: MozviewConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(MozviewConfig::default());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path, writing a
/// commented default file first if none exists.
pub fn load_default() -> Result<MozviewConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(MozviewConfig::default());
    }

    load_from_path(&path)
}

/// `~/.config/mozview/config.toml` on Linux, the OS equivalent elsewhere.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("mozview").join("config.toml"))
}

pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, DEFAULT_CONFIG_TOML).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

const DEFAULT_CONFIG_TOML: &str = r##"# mozview configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[view]
# parent_id = 0              # 0 = no parent view
# private_mode = false       # fixed once the engine view exists
# accelerated = true
# active_on_start = true
# focus_on_complete = true
# width = 0.0                # 0-16384
# height = 0.0               # 0-16384

[logging]
# level = "INFO"             # TRACE, DEBUG, INFO, WARNING, ERROR
"##;
