use eframe::egui;
use serde::{Deserialize, Serialize};

pub const SETTINGS_STORAGE_KEY: &str = "eloelo_gui.settings";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    #[default]
    Dark,
}

impl ColorScheme {
    pub fn toggled(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    /// Icon of the scheme the toggle switches to.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            ColorScheme::Light => "🌙",
            ColorScheme::Dark => "☀",
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            ColorScheme::Light => egui::Visuals::light(),
            ColorScheme::Dark => {
                let mut v = egui::Visuals::dark();
                v.panel_fill = egui::Color32::from_rgb(30, 31, 34);
                v.window_fill = egui::Color32::from_rgb(43, 45, 49);
                v.faint_bg_color = egui::Color32::from_rgb(49, 51, 56);
                v
            }
        }
    }
}

pub fn left_team_color(scheme: ColorScheme) -> egui::Color32 {
    match scheme {
        ColorScheme::Light => egui::Color32::from_rgb(25, 118, 210),
        ColorScheme::Dark => egui::Color32::from_rgb(100, 160, 240),
    }
}

pub fn right_team_color(scheme: ColorScheme) -> egui::Color32 {
    match scheme {
        ColorScheme::Light => egui::Color32::from_rgb(211, 47, 47),
        ColorScheme::Dark => egui::Color32::from_rgb(240, 110, 100),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedGuiSettings {
    pub color_scheme: ColorScheme,
}

impl PersistedGuiSettings {
    pub fn from_storage_text(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_scheme() {
        assert_eq!(ColorScheme::Dark.toggled(), ColorScheme::Light);
        assert_eq!(ColorScheme::Light.toggled().toggled(), ColorScheme::Light);
    }

    #[test]
    fn persisted_settings_read_back() {
        let text = serde_json::to_string(&PersistedGuiSettings {
            color_scheme: ColorScheme::Light,
        })
        .unwrap();
        assert_eq!(text, r#"{"color_scheme":"light"}"#);
        assert_eq!(
            PersistedGuiSettings::from_storage_text(&text).map(|s| s.color_scheme),
            Some(ColorScheme::Light)
        );
    }

    #[test]
    fn missing_or_broken_settings_fall_back() {
        assert_eq!(
            PersistedGuiSettings::from_storage_text("{}"),
            Some(PersistedGuiSettings::default())
        );
        assert_eq!(PersistedGuiSettings::from_storage_text("not json"), None);
    }
}
