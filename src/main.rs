mod app;
mod cli;
mod config;
mod error;
mod upload;
mod utils;
mod workflow;

#[cfg(test)]
mod test_support;

use anyhow::{anyhow, Context};
use app::CleanupBot;
use clap::Parser;
use cli::Cli;
use config::Settings;
use eframe::egui;
use tracing::info;
use upload::ApiClient;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli).context("failed to load settings")?;

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();
    info!(api = %settings.api_base_url, "starting Clean Up Bot");

    let client = ApiClient::new(&settings).context("failed to build API client")?;
    // Requests run here; the window thread only applies their results.
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([600.0, 680.0])
            .with_min_inner_size([400.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Clean Up Bot",
        options,
        Box::new(move |_cc: &eframe::CreationContext<'_>| -> Box<dyn eframe::App> {
            Box::new(CleanupBot::new(client, handle))
        }),
    )
    .map_err(|e| anyhow!("window failed: {e}"))
}
