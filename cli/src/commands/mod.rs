pub mod bias;
pub mod history;
pub mod preread;
pub mod score;
pub mod upload;

use anyhow::Result;
use planscore::{SiteConfig, client::url_parameter};

use crate::cli::Cli;

/// Built-in defaults, then the config file, then command-line overrides.
pub fn site_config(cli: &Cli) -> Result<SiteConfig> {
    let mut config = match &cli.config {
        Some(path) => SiteConfig::from_file(path)?,
        None => SiteConfig::default(),
    };

    if let Some(base) = &cli.api_base {
        config = config.with_api_base(base);
    }
    if let Some(prefix) = &cli.geometry_prefix {
        config.geometry_prefix = prefix.clone();
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.poll.max_attempts = max_attempts;
    }

    tracing::debug!(?config, "site config");
    Ok(config)
}

/// Accept either a bare plan id or a page URL carrying `?id=...`.
pub fn plan_id(arg: &str) -> String {
    let id = url_parameter("id", arg);
    if id.is_empty() { arg.to_string() } else { id }
}

/// Plain-text rendering of an HTML snippet, for the terminal.
pub fn plain(html: &str) -> Result<String> {
    planscore::display::strip_markup(&html.replace("<br>", " ").replace("<br/>", " "))
}
