use eframe::egui;
use eloelo_client::present::{build_reserve, new_player_command, team_names, ReserveRow};
use eloelo_shared::{domain::Side, protocol::UiCommand};

use super::app::EloEloApp;

fn reserve_row(
    ui: &mut egui::Ui,
    row: &ReserveRow,
    team_names: &(String, String),
    add_enabled: bool,
    show_delete: bool,
) -> Option<UiCommand> {
    let mut command = None;
    ui.horizontal(|ui| {
        if ui
            .add_enabled(add_enabled, egui::Button::new("←"))
            .on_hover_text(format!("Add to {}", team_names.0))
            .clicked()
        {
            command = Some(row.add_to_team_command(Side::Left));
        }
        let name = if row.present_in_lobby {
            egui::RichText::new(format!("{} 🎧", row.name))
        } else {
            egui::RichText::new(&row.name)
        };
        let label = ui.label(name);
        if let Some(url) = &row.avatar_url {
            label.on_hover_text(url);
        }
        ui.label(egui::RichText::new(row.elo.to_string()).weak());
        if ui
            .add_enabled(add_enabled, egui::Button::new("→"))
            .on_hover_text(format!("Add to {}", team_names.1))
            .clicked()
        {
            command = Some(row.add_to_team_command(Side::Right));
        }
        if show_delete && ui.button("🗑").on_hover_text("Delete player").clicked() {
            command = Some(row.delete_command());
        }
    });
    command
}

impl EloEloApp {
    pub(super) fn show_reserve_list(&mut self, ui: &mut egui::Ui) {
        let state = self.store.shared_state();
        let view = build_reserve(
            &state,
            self.store.discord_info(),
            self.store.avatars(),
            self.reserve_edit_mode,
        );
        let names = team_names(&state);

        ui.horizontal(|ui| {
            ui.heading("Reserve");
            ui.toggle_value(&mut self.reserve_edit_mode, "✏")
                .on_hover_text("Edit players");
        });

        let mut command = None;
        for row in &view.rows {
            if let Some(clicked) = reserve_row(ui, row, &names, view.add_enabled, view.show_delete) {
                command = Some(clicked);
            }
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let input = ui.add(
                egui::TextEdit::singleline(&mut self.new_player_name)
                    .hint_text("New player")
                    .desired_width(180.0),
            );
            if !view.players_to_add.is_empty() {
                egui::ComboBox::from_id_salt("discord_candidates")
                    .selected_text("From Discord")
                    .show_ui(ui, |ui| {
                        for candidate in &view.players_to_add {
                            if ui.selectable_label(false, &candidate.display_name).clicked() {
                                self.new_player_name = candidate.display_name.clone();
                            }
                        }
                    });
            }
            let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Add").clicked() || submitted {
                if let Some(add) = new_player_command(&self.new_player_name, &view.players_to_add) {
                    command = Some(add);
                    self.new_player_name.clear();
                }
            }
        });

        if let Some(command) = command {
            self.send(command);
        }
    }
}
