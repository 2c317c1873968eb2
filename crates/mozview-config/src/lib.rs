//! mozview configuration.
//!
//! TOML-based settings for embedded views: the defaults a page is created
//! with and the log filter the host installs. Every section uses serde
//! defaults so partial files work.
//!
//! ```rust,no_run
//! use mozview_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config.logging.level.directive());
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{LogLevel, LoggingConfig, MozviewConfig, ViewSection, CONFIG_SCHEMA_VERSION};
pub use toml_loader::{default_config_path, load_from_path};

use mozview_common::ConfigError;

/// Load config from the platform default path, creating it if missing.
pub fn load_config() -> Result<MozviewConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &MozviewConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
