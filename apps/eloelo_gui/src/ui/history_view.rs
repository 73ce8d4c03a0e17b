use eframe::egui;
use eloelo_client::present::{build_history, HistoryHighlight, HistoryPlayer};
use eloelo_shared::domain::PlayerId;

use super::app::EloEloApp;

fn player_chips(
    ui: &mut egui::Ui,
    players: &[HistoryPlayer],
    highlight: &HistoryHighlight,
    clicked: &mut Option<PlayerId>,
) {
    for player in players {
        let selected = highlight.selected() == Some(&player.id);
        let mut text = egui::RichText::new(format!("{} {}", player.initial(), player.name));
        if highlight.is_dimmed(&player.id) {
            text = text.weak();
        }
        let chip = ui.selectable_label(selected, text);
        let chip = match &player.avatar_url {
            Some(url) => chip.on_hover_text(url),
            None => chip,
        };
        if chip.clicked() {
            *clicked = Some(player.id.clone());
        }
    }
}

impl EloEloApp {
    pub(super) fn show_history_window(&mut self, ctx: &egui::Context) {
        if !self.history_open {
            return;
        }
        let state = self.store.shared_state();
        let rows = build_history(&state, self.store.avatars());
        let mut open = true;
        let mut clicked = None;

        egui::Window::new("Matches History")
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_size([720.0, 480.0])
            .show(ctx, |ui| {
                if rows.is_empty() {
                    ui.label(egui::RichText::new("No matches recorded for this game").weak());
                    return;
                }
                egui::ScrollArea::vertical().show(ui, |ui| {
                    egui::Grid::new("history_grid")
                        .striped(true)
                        .num_columns(6)
                        .show(ui, |ui| {
                            for row in &rows {
                                ui.label(&row.timestamp_label);
                                ui.horizontal_wrapped(|ui| {
                                    player_chips(ui, &row.winners, &self.highlight, &mut clicked);
                                });
                                ui.label("vs");
                                ui.horizontal_wrapped(|ui| {
                                    player_chips(ui, &row.losers, &self.highlight, &mut clicked);
                                });
                                let mut outcome = format!("{} in {}", row.scale.label(), row.duration_label);
                                if row.fake {
                                    outcome.push_str(" (fake)");
                                }
                                ui.label(outcome);
                                ui.label(egui::RichText::new(row.winner_chance_label()).weak())
                                    .on_hover_text(format!(
                                        "Elo {} vs {}",
                                        row.metadata.winner_elo, row.metadata.loser_elo
                                    ));
                                ui.end_row();
                            }
                        });
                });
            });

        if let Some(id) = clicked {
            self.highlight.toggle(&id);
        }
        if !open {
            self.history_open = false;
            self.highlight = HistoryHighlight::default();
        }
    }
}
