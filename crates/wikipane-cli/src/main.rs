mod app;
mod http;
mod input;
mod ui;

use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wikipane_core::{CompareVersion, PageConfig, ViewVersion};

#[derive(Debug, Parser)]
#[command(name = "wikipane", about = "Terminal wiki page panels")]
struct Cli {
    /// Wiki content endpoint, e.g. http://host/api/wiki/content/
    #[arg(long)]
    content_url: Option<String>,

    /// Canonical page URL prefix for the derived location
    #[arg(long)]
    page_url: Option<String>,

    /// JSON page config; flags override individual fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Open the edit panel at startup
    #[arg(long, default_value_t = false)]
    edit: bool,

    /// Hide the view panel at startup
    #[arg(long, default_value_t = false)]
    no_view: bool,

    /// Open the compare panel at startup
    #[arg(long, default_value_t = false)]
    compare: bool,

    /// Disable draft editing
    #[arg(long, default_value_t = false)]
    readonly: bool,

    /// Initial view version: current, preview, or a revision id
    #[arg(long)]
    view_version: Option<String>,

    /// Initial compare version: current or a revision id
    #[arg(long)]
    compare_version: Option<String>,

    /// Disable ANSI color
    #[arg(long, default_value_t = false)]
    no_color: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        bail!("wikipane needs an interactive terminal");
    }

    let (out_tx, fetch_rx) = mpsc::channel();
    let fetcher = http::HttpFetcher::start(out_tx);
    let theme = ui::theme::build_theme(cli.no_color);

    let mut app = app::App::new(config, Box::new(fetcher), fetch_rx, theme);
    app.run()
}

fn build_config(cli: &Cli) -> Result<PageConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => PageConfig::default(),
    };

    if let Some(content_url) = &cli.content_url {
        config.urls.content = content_url.clone();
    }
    if let Some(page_url) = &cli.page_url {
        config.urls.page = page_url.clone();
    }
    if cli.edit {
        config.edit_visible = true;
    }
    if cli.no_view {
        config.view_visible = false;
    }
    if cli.compare {
        config.compare_visible = true;
    }
    if cli.readonly {
        config.can_edit = false;
    }
    if let Some(raw) = &cli.view_version {
        config.view_version = raw
            .parse::<ViewVersion>()
            .map_err(|err| anyhow!("--view-version: {err}"))?;
    }
    if let Some(raw) = &cli.compare_version {
        config.compare_version = raw
            .parse::<CompareVersion>()
            .map_err(|err| anyhow!("--compare-version: {err}"))?;
    }

    if config.urls.content.is_empty() {
        bail!("a content endpoint is required (--content-url or a config file)");
    }
    if config.edit_visible && !config.can_edit {
        bail!("the edit panel needs an editable page (drop --readonly or --edit)");
    }

    Ok(config)
}
