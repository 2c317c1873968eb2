//! Configuration schema.

use serde::{Deserialize, Serialize};

pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Defaults applied to every page the host creates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSection {
    /// Parent view id; 0 leaves it unset.
    pub parent_id: u32,
    pub private_mode: bool,
    /// Ask the runtime for hardware compositing before creating views.
    pub accelerated: bool,
    pub active_on_start: bool,
    /// Grab engine focus as soon as the view reports initialization.
    pub focus_on_complete: bool,
    /// Initial logical width (valid range: 0-16384).
    pub width: f64,
    /// Initial logical height (valid range: 0-16384).
    pub height: f64,
}

impl Default for ViewSection {
    fn default() -> Self {
        Self {
            parent_id: 0,
            private_mode: false,
            accelerated: true,
            active_on_start: true,
            focus_on_complete: true,
            width: 0.0,
            height: 0.0,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `tracing-subscriber` filter directive for the mozview crates.
    pub fn directive(self) -> &'static str {
        match self {
            Self::Trace => "mozview=trace",
            Self::Debug => "mozview=debug",
            Self::Info => "mozview=info",
            Self::Warning => "mozview=warn",
            Self::Error => "mozview=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MozviewConfig {
    pub view: ViewSection,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_defaults() {
        let view = ViewSection::default();
        assert_eq!(view.parent_id, 0);
        assert!(view.accelerated);
        assert!(view.active_on_start);
        assert!(view.focus_on_complete);
    }

    #[test]
    fn log_level_parses_uppercase() {
        let config: LoggingConfig = toml::from_str("level = \"DEBUG\"").unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.level.directive(), "mozview=debug");
    }

    #[test]
    fn warning_maps_to_warn_directive() {
        assert_eq!(LogLevel::Warning.directive(), "mozview=warn");
    }
}
