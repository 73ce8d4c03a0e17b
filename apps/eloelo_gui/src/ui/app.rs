use chrono::{DateTime, Local};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use eloelo_client::{
    present::{FinishMatchForm, HistoryHighlight, OptionsForm},
    ClientEvent, ViewStore,
};
use eloelo_shared::{domain::GameState, protocol::UiCommand};

use crate::backend_bridge::{commands::BackendCommand, latest::LatestState};
use crate::controller::{
    events::{UiError, UiErrorCategory, UiErrorContext, UiEvent},
    orchestration::dispatch_backend_command,
};
use crate::ui::theme::{ColorScheme, PersistedGuiSettings, SETTINGS_STORAGE_KEY};

#[derive(Debug, Clone)]
pub(super) struct StatusBanner {
    pub(super) category: UiErrorCategory,
    pub(super) message: String,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Stream => "Stream",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

/// Start of the running match as seen by this client. Unknown when the first
/// snapshot already shows a match in progress.
pub(super) fn next_match_start(
    previous: Option<GameState>,
    current: GameState,
    started_at: Option<DateTime<Local>>,
    now: DateTime<Local>,
) -> Option<DateTime<Local>> {
    match (previous, current) {
        (_, GameState::AssemblingTeams) => None,
        (Some(GameState::AssemblingTeams), GameState::MatchInProgress) => Some(now),
        (_, GameState::MatchInProgress) => started_at,
    }
}

pub struct EloEloApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    latest: LatestState,
    has_state: bool,
    pub(super) server_url: String,
    pub(super) store: ViewStore,
    pub(super) status: String,
    pub(super) status_banner: Option<StatusBanner>,
    pub(super) color_scheme: ColorScheme,
    applied_scheme: Option<ColorScheme>,
    pub(super) match_started_at: Option<DateTime<Local>>,
    pub(super) history_open: bool,
    pub(super) highlight: HistoryHighlight,
    pub(super) options_form: Option<OptionsForm>,
    pub(super) finish_form: FinishMatchForm,
    pub(super) reserve_edit_mode: bool,
    pub(super) new_player_name: String,
}

impl EloEloApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        latest: LatestState,
        persisted_settings: Option<PersistedGuiSettings>,
        server_url: String,
    ) -> Self {
        let settings = persisted_settings.unwrap_or_default();
        Self {
            cmd_tx,
            ui_rx,
            latest,
            has_state: false,
            server_url,
            store: ViewStore::new(),
            status: "Waiting for backend".to_string(),
            status_banner: None,
            color_scheme: settings.color_scheme,
            applied_scheme: None,
            match_started_at: None,
            history_open: false,
            highlight: HistoryHighlight::default(),
            options_form: None,
            finish_form: FinishMatchForm::default(),
            reserve_edit_mode: false,
            new_player_name: String::new(),
        }
    }

    pub(super) fn send(&mut self, command: UiCommand) {
        dispatch_backend_command(&self.cmd_tx, command, &mut self.status);
    }

    pub(super) fn show_error(&mut self, err: UiError) {
        tracing::warn!(
            category = err_label(err.category()),
            context = ?err.context(),
            "{}",
            err.message()
        );
        self.status_banner = Some(StatusBanner {
            category: err.category(),
            message: err.message().to_string(),
        });
    }

    fn apply_client_event(&mut self, event: ClientEvent) {
        match &event {
            ClientEvent::UiState(state) => {
                let previous = self.has_state.then(|| self.store.state().game_state);
                self.has_state = true;
                self.match_started_at = next_match_start(
                    previous,
                    state.game_state,
                    self.match_started_at,
                    Local::now(),
                );
                self.status = format!("Connected to {}", self.server_url);
            }
            ClientEvent::Error(message) => {
                self.show_error(UiError::from_message(UiErrorContext::UiStream, message.clone()));
            }
            ClientEvent::DiscordInfo(_) | ClientEvent::Avatars(_) => {}
        }
        self.store.apply(event);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::Client(event) => self.apply_client_event(event),
                UiEvent::Error(err) => self.show_error(err),
            }
        }
        if let Some(state) = self.latest.take() {
            self.apply_client_event(ClientEvent::UiState(state));
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_scheme == Some(self.color_scheme) {
            return;
        }
        ctx.set_visuals(self.color_scheme.visuals());
        self.applied_scheme = Some(self.color_scheme);
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.status_banner.clone() else {
            return;
        };
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{} error: {}",
                            err_label(banner.category),
                            banner.message
                        ))
                        .color(egui::Color32::WHITE),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.status_banner = None;
                            self.store.clear_error();
                        }
                    });
                });
            });
        ui.add_space(6.0);
    }

    fn show_fight_banner(&self, ui: &mut egui::Ui) {
        if self.store.state().game_state != GameState::MatchInProgress {
            return;
        }
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new("Fight!")
                    .size(32.0)
                    .strong()
                    .color(ui.visuals().warn_fg_color),
            );
        });
        ui.add_space(4.0);
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&self.status).weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("rev {}", self.store.revision())).weak(),
                    );
                });
            });
        });
    }
}

impl eframe::App for EloEloApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);

        self.show_app_bar(ctx);
        self.show_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            self.show_fight_banner(ui);
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.show_team_selector(ui);
                ui.separator();
                self.show_match_actions(ui);
                ui.separator();
                self.show_reserve_list(ui);
            });
        });

        self.show_history_window(ctx);
        self.show_options_window(ctx);
        self.show_finish_match_window(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedGuiSettings {
            color_scheme: self.color_scheme,
        };
        if let Ok(serialized) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}

impl Drop for EloEloApp {
    fn drop(&mut self) {
        let _ = self.cmd_tx.try_send(BackendCommand::Shutdown);
    }
}
