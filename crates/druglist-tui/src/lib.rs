//! druglist TUI: ratatui browser for the drug listing API.

pub mod app;
pub mod browser;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use browser::BrowserState;

use druglist_client::ApiClient;
use druglist_core::config::Config;
use std::time::Duration;

/// Browse the API at `url` (or `client.base_url` from `config`) until the
/// user quits.
pub fn run(config: Config, url: Option<String>) -> anyhow::Result<()> {
    let base_url = url.unwrap_or_else(|| config.client.base_url.clone());
    let client = ApiClient::new(base_url.as_str())?
        .with_timeout(Duration::from_millis(config.client.timeout_ms));

    let theme = theme::Theme::by_name(&config.ui.theme);
    let state = BrowserState::new(&config.ui, theme);
    tracing::info!(%base_url, "starting drug browser");

    App::new(client, state)?.run()
}
