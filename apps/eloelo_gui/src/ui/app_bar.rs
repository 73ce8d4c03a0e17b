use eframe::egui;
use eloelo_client::present::{game_selector_enabled, OptionsForm};
use eloelo_shared::protocol::UiCommand;

use super::app::EloEloApp;

impl EloEloApp {
    pub(super) fn show_app_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("app_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.menu_button("☰", |ui| {
                    if ui.button("View Matches History").clicked() {
                        self.history_open = true;
                        ui.close();
                    }
                    if ui.button("Refresh Elo").clicked() {
                        self.send(UiCommand::RefreshElo);
                        ui.close();
                    }
                    if ui.button("Settings").clicked() {
                        self.options_form = Some(OptionsForm::from_groups(&self.store.state().options));
                        ui.close();
                    }
                });
                ui.heading("EloElo");
                ui.separator();
                self.show_game_selector(ui);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button(self.color_scheme.toggle_icon())
                        .on_hover_text("Toggle colour scheme")
                        .clicked()
                    {
                        self.color_scheme = self.color_scheme.toggled();
                    }
                });
            });
        });
    }

    fn show_game_selector(&mut self, ui: &mut egui::Ui) {
        let state = self.store.shared_state();
        let selected = state.selected_game.as_str();
        let mut picked = None;
        ui.add_enabled_ui(game_selector_enabled(&state), |ui| {
            egui::ComboBox::from_id_salt("game_selector")
                .selected_text(if selected.is_empty() { "Select game" } else { selected })
                .show_ui(ui, |ui| {
                    for game in &state.available_games {
                        let is_selected = game.name == state.selected_game;
                        if ui.selectable_label(is_selected, game.name.as_str()).clicked() && !is_selected {
                            picked = Some(game.name.clone());
                        }
                    }
                });
        });
        if let Some(id) = picked {
            self.send(UiCommand::ChangeGame { id });
        }
    }
}
