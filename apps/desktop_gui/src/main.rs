use std::sync::Arc;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{ClientSettings, UserDirectory, DEFAULT_API_BASE_URL};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::UserDirectoryApp;

const APP_TITLE: &str = "User Management";

#[derive(Parser, Debug)]
#[command(about = "Browse and delete users from a remote user directory")]
struct Args {
    /// Base URL of the user directory service.
    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,
    /// Per-request timeout in seconds. Requests are unbounded when omitted.
    #[arg(long)]
    request_timeout_secs: Option<u64>,
    /// tracing filter directive, e.g. `info` or `client_core=debug`.
    #[arg(long, default_value = "info")]
    log_filter: String,
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter '{filter}': {err}; falling back to info");
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_filter);

    let settings = ClientSettings::new(args.api_base_url, args.request_timeout_secs);
    let directory: Arc<dyn UserDirectory> = Arc::new(
        settings
            .connect()
            .context("failed to configure user directory client")?,
    );
    tracing::info!(api_base_url = %settings.api_base_url, "starting user directory gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(directory, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    let api_base_url = settings.api_base_url.clone();
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(UserDirectoryApp::new(cmd_tx, ui_rx, api_base_url)))),
    )
    .map_err(|err| anyhow!("gui terminated with error: {err}"))
}
