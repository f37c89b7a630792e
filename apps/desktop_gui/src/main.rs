mod backend_bridge;
mod controller;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use client_core::config::SETTINGS_FILE_NAME;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{DesktopGuiApp, StartupConfig};

const APP_CONFIG_DIR: &str = "sentence_compression";

#[derive(Parser, Debug)]
#[command(about = "Desktop front end for the sentence compression service")]
struct Args {
    /// Base endpoint of the compression service, e.g. http://127.0.0.1:9090
    #[arg(long)]
    endpoint: Option<String>,
    /// Settings file; defaults to ./compression.toml, then the user config dir
    #[arg(long)]
    config: Option<PathBuf>,
}

fn user_settings_path() -> Option<PathBuf> {
    let path = dirs::config_dir()?
        .join(APP_CONFIG_DIR)
        .join(SETTINGS_FILE_NAME);
    path.is_file().then_some(path)
}

fn resolve_settings_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    if explicit.is_some() {
        return explicit;
    }
    if Path::new(SETTINGS_FILE_NAME).is_file() {
        return None;
    }
    user_settings_path()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let config_path = resolve_settings_path(args.config);
    let mut settings = load_settings(config_path.as_deref())?;
    if let Some(endpoint) = args.endpoint {
        settings.base_endpoint = endpoint;
    }
    tracing::info!(
        endpoint = %settings.base_endpoint,
        ordering = ?settings.ordering,
        failures = ?settings.failures,
        "starting desktop gui"
    );

    let startup = StartupConfig {
        endpoint_label: settings.base_endpoint.clone(),
        policy: settings.policy(),
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Sentence Compression")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Sentence Compression",
        options,
        Box::new(|_cc| Ok(Box::new(DesktopGuiApp::new(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow::anyhow!(err.to_string()))
    .context("desktop gui exited with an error")
}
