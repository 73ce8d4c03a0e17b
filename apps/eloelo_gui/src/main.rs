mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, latest::LatestState};
use crate::controller::events::UiEvent;
use crate::ui::{
    theme::{PersistedGuiSettings, SETTINGS_STORAGE_KEY},
    EloEloApp,
};

#[derive(Parser, Debug)]
#[command(name = "eloelo-gui", about = "EloElo operator desktop client")]
struct Args {
    /// Backend base url, e.g. http://127.0.0.1:3000/ui/
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let settings = eloelo_client::load_settings().with_server_url_override(args.server_url);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!(server_url = %settings.server_url, "starting eloelo gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    let latest = LatestState::default();
    let server_url = settings.server_url.clone();
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx, latest.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("EloElo")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "EloElo",
        options,
        Box::new(move |cc| {
            let persisted_settings = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| PersistedGuiSettings::from_storage_text(&text))
            });
            Ok(Box::new(EloEloApp::new(
                cmd_tx,
                ui_rx,
                latest,
                persisted_settings,
                server_url,
            )))
        }),
    )
}
