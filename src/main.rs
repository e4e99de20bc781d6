mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser, ValueHint};
use eframe::egui;

use app::LaunchDashApp;
use config::{DashboardConfig, DEFAULT_DATA_FILE};
use state::{DashboardSession, SelectionState};

#[derive(Parser, Debug)]
#[command(author, version, about = "Launch records dashboard", long_about = None)]
struct Cli {
    /// Launch records (.csv, .json or .parquet)
    #[arg(default_value = DEFAULT_DATA_FILE, value_hint = ValueHint::FilePath)]
    data: PathBuf,

    /// Enable debug logging for the dashboard
    #[arg(long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Write the default charts as JSON to this path and exit
    #[arg(long, value_hint = ValueHint::FilePath)]
    export: Option<PathBuf>,
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "info,launch_dash=debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = DashboardConfig::with_data_path(cli.data);

    let dataset = data::loader::load_file(&config.data_path)?;
    log::info!(
        "Loaded {} launches from {} ({} sites)",
        dataset.len(),
        config.data_path.display(),
        dataset.sites.sites().count()
    );
    match dataset.payload_bounds {
        Some(b) => log::info!("Payload bounds: {} – {} kg", b.min, b.max),
        None => log::warn!("Dataset is empty; charts will have no data"),
    }

    if !dataset.sites.contains(&config.default_site) {
        log::warn!("Default site '{}' is not in the catalog", config.default_site);
    }

    let session = DashboardSession::new(
        Arc::new(dataset),
        SelectionState::new(config.default_site.clone(), config.default_range),
    );

    if let Some(path) = cli.export {
        return session.export_to_file(&path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let app = LaunchDashApp::new(session, &config);
    eframe::run_native(
        "Launch Dash – SpaceX Launch Records",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}
