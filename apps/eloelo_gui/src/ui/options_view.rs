use eframe::egui;
use eloelo_client::present::{OptionBuffer, OptionsForm};

use super::app::EloEloApp;
use crate::controller::events::{UiError, UiErrorContext};

enum OptionsAction {
    Save,
    Reset,
    Cancel,
}

fn option_input(ui: &mut egui::Ui, buffer: &mut OptionBuffer) {
    let valid = buffer.is_valid();
    match buffer {
        OptionBuffer::Boolean(flag) => {
            ui.checkbox(flag, "");
        }
        OptionBuffer::Integer(text) | OptionBuffer::Decimal(text) | OptionBuffer::Text(text) => {
            let mut edit = egui::TextEdit::singleline(text).desired_width(160.0);
            if !valid {
                edit = edit.text_color(ui.visuals().error_fg_color);
            }
            ui.add(edit);
        }
    }
}

fn options_body(ui: &mut egui::Ui, form: &mut OptionsForm) {
    for group in form.groups_mut() {
        ui.heading(&group.name);
        egui::Grid::new(("options_group", group.key.as_str()))
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for field in &mut group.fields {
                    ui.label(&field.name);
                    option_input(ui, &mut field.buffer);
                    ui.end_row();
                }
            });
        ui.add_space(8.0);
    }
}

impl EloEloApp {
    pub(super) fn show_options_window(&mut self, ctx: &egui::Context) {
        let Some(form) = self.options_form.as_mut() else {
            return;
        };
        let mut open = true;
        let mut action = None;

        egui::Window::new("Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
                    if form.groups().is_empty() {
                        ui.label(egui::RichText::new("The backend exposes no settings").weak());
                    }
                    options_body(ui, form);
                });
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        action = Some(OptionsAction::Save);
                    }
                    if ui.button("Reset").clicked() {
                        action = Some(OptionsAction::Reset);
                    }
                    if ui.button("Cancel").clicked() {
                        action = Some(OptionsAction::Cancel);
                    }
                });
            });

        if !open {
            action = Some(OptionsAction::Cancel);
        }
        match action {
            Some(OptionsAction::Save) => {
                let saved = self.options_form.as_ref().map(OptionsForm::save);
                match saved {
                    Some(Ok(command)) => {
                        self.options_form = None;
                        self.send(command);
                    }
                    Some(Err(err)) => self.show_error(UiError::from_message(
                        UiErrorContext::Settings,
                        err.to_string(),
                    )),
                    None => {}
                }
            }
            Some(OptionsAction::Reset) => {
                let groups = self.store.state().options.clone();
                if let Some(form) = self.options_form.as_mut() {
                    form.reset(&groups);
                }
            }
            Some(OptionsAction::Cancel) => self.options_form = None,
            None => {}
        }
    }
}
