use std::fmt;

use chrono::{DateTime, FixedOffset, Local, TimeZone};
use eloelo_shared::{
    domain::{PlayerId, WinScale},
    duration::elapsed_seconds_string,
    protocol::{HistoryMetadata, Player, PlayerAvatar},
    view::{EloEloState, HistoryEntry},
};

use super::avatar_url_for;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPlayer {
    pub id: PlayerId,
    pub name: String,
    pub avatar_url: Option<String>,
}

impl HistoryPlayer {
    /// Fallback avatar text.
    pub fn initial(&self) -> String {
        self.name.chars().next().map(String::from).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRowView {
    pub timestamp: DateTime<FixedOffset>,
    pub timestamp_label: String,
    pub winners: Vec<HistoryPlayer>,
    pub losers: Vec<HistoryPlayer>,
    pub scale: WinScale,
    pub duration_label: String,
    pub fake: bool,
    pub metadata: HistoryMetadata,
}

impl HistoryRowView {
    pub fn winner_chance_label(&self) -> String {
        format!("{:.0}%", self.metadata.winner_chance * 100.0)
    }
}

fn resolve_players(state: &EloEloState, ids: &[PlayerId], avatars: &[PlayerAvatar]) -> Vec<HistoryPlayer> {
    ids.iter()
        .map(|id| {
            let player = state
                .find_player(id)
                .cloned()
                .unwrap_or_else(|| Player::placeholder(id));
            HistoryPlayer {
                avatar_url: avatar_url_for(avatars, player.discord_username.as_deref())
                    .map(str::to_string),
                id: player.id,
                name: player.name,
            }
        })
        .collect()
}

fn history_row<Tz>(state: &EloEloState, row: &HistoryEntry, avatars: &[PlayerAvatar], tz: &Tz) -> HistoryRowView
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let entry = &row.entry;
    HistoryRowView {
        timestamp: entry.timestamp,
        timestamp_label: entry
            .timestamp
            .with_timezone(tz)
            .format(TIMESTAMP_FORMAT)
            .to_string(),
        winners: resolve_players(state, &entry.winner, avatars),
        losers: resolve_players(state, &entry.loser, avatars),
        scale: entry.scale,
        duration_label: elapsed_seconds_string(i64::try_from(entry.duration).unwrap_or(i64::MAX)),
        fake: entry.fake,
        metadata: row.metadata.clone(),
    }
}

/// Rows of the selected game's history with timestamps in `tz`.
pub fn build_history_in<Tz>(state: &EloEloState, avatars: &[PlayerAvatar], tz: &Tz) -> Vec<HistoryRowView>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    state
        .history_for_selected_game()
        .iter()
        .map(|row| history_row(state, row, avatars, tz))
        .collect()
}

pub fn build_history(state: &EloEloState, avatars: &[PlayerAvatar]) -> Vec<HistoryRowView> {
    build_history_in(state, avatars, &Local)
}

/// Click-to-highlight selection of the history modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryHighlight {
    selected: Option<PlayerId>,
}

impl HistoryHighlight {
    pub fn toggle(&mut self, id: &PlayerId) {
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.clone());
        }
    }

    pub fn selected(&self) -> Option<&PlayerId> {
        self.selected.as_ref()
    }

    pub fn is_dimmed(&self, id: &PlayerId) -> bool {
        self.selected.as_ref().is_some_and(|selected| selected != id)
    }
}

#[cfg(test)]
#[path = "tests/history_tests.rs"]
mod tests;
