//! UI layer: app shell, panels, modals and the colour scheme.

pub mod app;
mod app_bar;
mod finish_match;
mod history_view;
mod options_view;
mod reserve_list;
mod team_selector;
pub mod theme;

pub use app::EloEloApp;
