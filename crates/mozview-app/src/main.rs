mod cli;
mod session;

use std::io::Write;
use std::path::Path;

use mozview::ViewConfig;
use mozview_common::Result;
use mozview_config::{LogLevel, MozviewConfig};
use tracing_subscriber::EnvFilter;

/// Load an explicit config file, or the platform default.
fn load_config(path: Option<&str>) -> Result<MozviewConfig> {
    let config = match path {
        Some(path) => mozview_config::load_from_path(Path::new(path))?,
        None => mozview_config::load_config()?,
    };
    Ok(config)
}

/// First directive that parses wins: --log-level, then the config level.
fn init_logging(log_level: Option<&str>, level: LogLevel) {
    let mut filter = EnvFilter::from_default_env();
    for candidate in [log_level, Some(level.directive())].into_iter().flatten() {
        if let Ok(directive) = candidate.parse() {
            filter = filter.add_directive(directive);
            break;
        }
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(args: cli::Args, loaded: Result<MozviewConfig>) -> Result<()> {
    // A broken default config is survivable; an explicit one is not.
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) if args.config.is_some() => return Err(e),
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            MozviewConfig::default()
        }
    };

    if let Some(width) = args.width {
        config.view.width = width;
    }
    if let Some(height) = args.height {
        config.view.height = height;
    }
    if args.private {
        config.view.private_mode = true;
    }

    let options = session::SessionOptions {
        url: args.url,
        defer_context: args.defer_context,
    };
    let changes = session::run(ViewConfig::from(&config.view), &options)?;
    tracing::info!(changes = changes.len(), "session finished");

    let mut out = std::io::stdout().lock();
    for change in &changes {
        serde_json::to_writer(&mut out, change).map_err(std::io::Error::from)?;
        writeln!(out)?;
    }
    Ok(())
}

fn main() {
    let args = cli::parse();

    // Config first: its logging level feeds the subscriber.
    let loaded = load_config(args.config.as_deref());
    let level = loaded
        .as_ref()
        .map(|config| config.logging.level)
        .unwrap_or_default();
    init_logging(args.log_level.as_deref(), level);

    tracing::info!("mozview v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Err(e) = run(args, loaded) {
        tracing::error!("mozview failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mozview_common::{ConfigError, MozviewError};

    #[test]
    fn missing_explicit_config_is_a_config_error() {
        let err = load_config(Some("/nonexistent/mozview/config.toml")).unwrap_err();
        assert!(matches!(
            err,
            MozviewError::Config(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn explicit_config_failure_aborts_the_run() {
        let args = cli::Args {
            url: None,
            width: None,
            height: None,
            private: false,
            defer_context: false,
            config: Some("/nonexistent/mozview/config.toml".into()),
            log_level: None,
        };
        let loaded = load_config(args.config.as_deref());
        assert!(matches!(run(args, loaded), Err(MozviewError::Config(_))));
    }
}
