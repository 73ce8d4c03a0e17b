use eframe::egui;
use eloelo_client::present::team_names;
use eloelo_shared::domain::{Side, WinScale};

use super::app::EloEloApp;

impl EloEloApp {
    pub(super) fn show_finish_match_window(&mut self, ctx: &egui::Context) {
        if !self.finish_form.is_open() {
            return;
        }
        let (left_name, right_name) = team_names(self.store.state());
        let mut open = true;
        let mut chosen_scale = None;

        egui::Window::new(self.finish_form.heading())
            .id(egui::Id::new("finish_match_window"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                let form = &mut self.finish_form;
                if form.shows_winner_choice() {
                    ui.horizontal(|ui| {
                        ui.label("Winner:");
                        let winner = form.winner();
                        if ui.radio(winner == Some(Side::Left), &left_name).clicked() {
                            form.set_winner(Side::Left);
                        }
                        if ui.radio(winner == Some(Side::Right), &right_name).clicked() {
                            form.set_winner(Side::Right);
                        }
                    });
                }

                ui.horizontal(|ui| {
                    ui.label("Duration:");
                    let valid = form.duration_valid();
                    let mut edit = egui::TextEdit::singleline(form.duration_mut())
                        .hint_text("1h12m")
                        .desired_width(100.0);
                    if !valid {
                        edit = edit.text_color(ui.visuals().error_fg_color);
                    }
                    ui.add(edit);
                });
                if !form.duration_valid() {
                    ui.label(
                        egui::RichText::new("Use 45m, 1h12m or 1h30")
                            .small()
                            .color(ui.visuals().error_fg_color),
                    );
                }

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    let enabled = form.submit_enabled();
                    for scale in WinScale::ALL {
                        if ui.add_enabled(enabled, egui::Button::new(scale.label())).clicked() {
                            chosen_scale = Some(scale);
                        }
                    }
                });
            });

        if let Some(scale) = chosen_scale {
            if let Some(command) = self.finish_form.submit(scale) {
                self.send(command);
            }
        }
        if !open {
            self.finish_form.close();
        }
    }
}
