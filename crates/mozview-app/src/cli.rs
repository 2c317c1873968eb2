use clap::Parser;

/// mozview: drive an embedded web view against the headless engine.
#[derive(Parser, Debug)]
#[command(name = "mozview", version, about)]
pub struct Args {
    /// URL to load once the view is initialized.
    #[arg(short = 'u', long)]
    pub url: Option<String>,

    /// Initial width of the view, overriding the config.
    #[arg(long)]
    pub width: Option<f64>,

    /// Initial height of the view, overriding the config.
    #[arg(long)]
    pub height: Option<f64>,

    /// Create the view in private mode.
    #[arg(long)]
    pub private: bool,

    /// Start with the embedding context down and bring it up mid-session.
    #[arg(long)]
    pub defer_context: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log filter directive override (e.g. mozview=debug).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
