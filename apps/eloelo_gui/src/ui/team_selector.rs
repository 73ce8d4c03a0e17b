use chrono::Local;
use eframe::egui;
use eloelo_client::present::{
    build_team_roster, match_actions, win_prediction_label, FinishMatchForm, MatchAction,
    PlayerRow, TeamRosterView,
};
use eloelo_shared::{domain::Side, protocol::UiCommand};

use super::{
    app::EloEloApp,
    theme::{left_team_color, right_team_color},
};

fn player_row(ui: &mut egui::Ui, row: &PlayerRow, actions_enabled: bool) -> Option<UiCommand> {
    let mut command = None;
    ui.horizontal(|ui| {
        let initial = row.name.chars().next().unwrap_or('?').to_string();
        let avatar = ui.label(egui::RichText::new(initial).strong().monospace());
        if let Some(url) = &row.avatar_url {
            avatar.on_hover_text(url);
        }

        let mut present = row.present_in_lobby;
        if ui
            .checkbox(&mut present, "")
            .on_hover_text("Present in lobby")
            .changed()
        {
            command = Some(row.toggle_presence_command());
        }
        ui.label(row.display_name());
        ui.label(egui::RichText::new(row.elo.to_string()).weak());
        if !row.streak_label.is_empty() {
            ui.label(
                egui::RichText::new(&row.streak_label).color(ui.visuals().error_fg_color),
            );
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(actions_enabled, egui::Button::new("✖"))
                .on_hover_text("Remove from team")
                .clicked()
            {
                command = Some(row.remove_command());
            }
            if ui
                .add_enabled(actions_enabled, egui::Button::new("⇄"))
                .on_hover_text("Move to other team")
                .clicked()
            {
                command = Some(row.move_command());
            }
            if ui.button("📞").on_hover_text("Call player").clicked() {
                command = Some(row.call_command());
            }
        });
    });
    command
}

fn roster_column(ui: &mut egui::Ui, roster: &TeamRosterView, color: egui::Color32) -> Option<UiCommand> {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(&roster.team_name)
                .heading()
                .color(color),
        );
        ui.label(egui::RichText::new(roster.elo_sum.to_string()).strong());
    });
    if let Some(pity) = &roster.pity_label {
        ui.label(egui::RichText::new(pity).small().weak());
    }
    ui.add_space(4.0);

    let mut command = None;
    for row in &roster.rows {
        if let Some(clicked) = player_row(ui, row, roster.actions_enabled) {
            command = Some(clicked);
        }
    }
    if roster.rows.is_empty() {
        ui.label(egui::RichText::new("No players").weak().italics());
    }
    command
}

impl EloEloApp {
    pub(super) fn show_team_selector(&mut self, ui: &mut egui::Ui) {
        let state = self.store.shared_state();
        let left = build_team_roster(&state, Side::Left, self.store.avatars());
        let right = build_team_roster(&state, Side::Right, self.store.avatars());
        let scheme = self.color_scheme;

        let mut command = None;
        ui.columns(2, |columns| {
            if let Some(clicked) = roster_column(&mut columns[0], &left, left_team_color(scheme)) {
                command = Some(clicked);
            }
            if let Some(clicked) = roster_column(&mut columns[1], &right, right_team_color(scheme)) {
                command = Some(clicked);
            }
        });

        if let Some(prediction) = win_prediction_label(state.win_prediction) {
            ui.vertical_centered(|ui| {
                ui.label(prediction);
            });
        }
        if let Some(command) = command {
            self.send(command);
        }
    }

    pub(super) fn show_match_actions(&mut self, ui: &mut egui::Ui) {
        let actions = match_actions(self.store.state().game_state);
        let mut clicked = None;
        ui.horizontal_wrapped(|ui| {
            for &action in actions.iter().filter(|a| a.parent().is_none()) {
                if ui.button(action.label()).clicked() {
                    clicked = Some(action);
                }
                let children: Vec<_> = actions
                    .iter()
                    .copied()
                    .filter(|child| child.parent() == Some(action))
                    .collect();
                if !children.is_empty() {
                    ui.menu_button("⏷", |ui| {
                        for child in children {
                            if ui.button(child.label()).clicked() {
                                clicked = Some(child);
                                ui.close();
                            }
                        }
                    });
                }
            }
        });

        if let Some(action) = clicked {
            self.run_match_action(action);
        }
    }

    fn run_match_action(&mut self, action: MatchAction) {
        if let Some(command) = action.command() {
            self.send(command);
        } else if let Some(winner) = action.winner() {
            self.finish_form = FinishMatchForm::show_for_winner(
                winner,
                self.match_started_at.as_ref(),
                &Local::now(),
            );
        } else if action == MatchAction::AddFake {
            self.finish_form = FinishMatchForm::show_fake();
        }
    }
}
