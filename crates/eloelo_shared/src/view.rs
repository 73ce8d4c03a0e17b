//! Parsed client-side view of the backend state.
//!
//! The transport types in [`crate::protocol`] keep timestamps and scales as
//! raw strings. Everything the client renders goes through
//! [`parse_elo_elo_state`] first, which turns them into typed values.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{GameId, GameState, PlayerId, Side, WinScale},
    error::StateParseError,
    protocol::{
        DiscordPlayerInfo, EloEloStateTransport, Game, HistoryEntryFields, HistoryMetadata,
        OptionsGroup, PityBonus, Player, PlayerAvatar, UiStreamFrame,
    },
};

const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub timestamp: DateTime<FixedOffset>,
    pub winner: Vec<PlayerId>,
    pub loser: Vec<PlayerId>,
    /// Seconds.
    pub duration: u64,
    pub scale: WinScale,
    pub fake: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub entry: MatchRecord,
    pub metadata: HistoryMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub entries: HashMap<GameId, Vec<HistoryEntry>>,
}

impl History {
    pub fn total_entries(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EloEloState {
    pub available_games: Vec<Game>,
    pub selected_game: GameId,
    pub left_players: Vec<Player>,
    pub right_players: Vec<Player>,
    pub reserve_players: Vec<Player>,
    pub game_state: GameState,
    pub history: History,
    pub pity_bonus: Option<PityBonus>,
    pub options: Vec<OptionsGroup>,
    pub win_prediction: Option<f64>,
    pub shuffle_temperature: i32,
}

impl EloEloState {
    pub fn history_for_selected_game(&self) -> &[HistoryEntry] {
        self.history
            .entries
            .get(&self.selected_game)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn selected_game_data(&self) -> Option<&Game> {
        self.available_games
            .iter()
            .find(|game| game.name == self.selected_game)
    }

    pub fn team(&self, side: Side) -> &[Player] {
        match side {
            Side::Left => &self.left_players,
            Side::Right => &self.right_players,
        }
    }

    /// Rosters first, then the reserve bench.
    pub fn all_players(&self) -> impl Iterator<Item = &Player> {
        self.left_players
            .iter()
            .chain(&self.right_players)
            .chain(&self.reserve_players)
    }

    pub fn find_player(&self, id: &PlayerId) -> Option<&Player> {
        self.all_players().find(|player| &player.id == id)
    }
}

/// Decoded content of one stream frame. Any combination of fields may be set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiStreamMessage {
    pub error: Option<String>,
    pub state: Option<EloEloState>,
    pub discord_info: Option<Vec<DiscordPlayerInfo>>,
}

fn parse_timestamp(game: &GameId, value: &str) -> Result<DateTime<FixedOffset>, StateParseError> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(timestamp) => Ok(timestamp),
        Err(rfc_err) => NaiveDateTime::parse_from_str(value, NAIVE_TIMESTAMP_FORMAT)
            .map(|naive| naive.and_utc().fixed_offset())
            .map_err(|_| StateParseError::Timestamp {
                game: game.to_string(),
                value: value.to_string(),
                reason: rfc_err.to_string(),
            }),
    }
}

fn parse_entry(
    game: &GameId,
    fields: HistoryEntryFields,
    metadata: HistoryMetadata,
) -> Result<HistoryEntry, StateParseError> {
    let timestamp = parse_timestamp(game, &fields.timestamp)?;
    let scale = fields
        .scale
        .to_ascii_lowercase()
        .parse::<WinScale>()
        .map_err(|source| StateParseError::Scale {
            game: game.to_string(),
            source,
        })?;
    Ok(HistoryEntry {
        entry: MatchRecord {
            timestamp,
            winner: fields.winner,
            loser: fields.loser,
            duration: fields.duration,
            scale,
            fake: fields.fake,
        },
        metadata,
    })
}

/// Maps a transport snapshot into the view model.
pub fn parse_elo_elo_state(state: EloEloStateTransport) -> Result<EloEloState, StateParseError> {
    let mut entries = HashMap::with_capacity(state.history.entries.len());
    for (game, rows) in state.history.entries {
        let parsed = rows
            .into_iter()
            .map(|row| {
                let (fields, metadata) = row.into_parts();
                parse_entry(&game, fields, metadata)
            })
            .collect::<Result<Vec<_>, _>>()?;
        entries.insert(game, parsed);
    }

    Ok(EloEloState {
        available_games: state.available_games,
        selected_game: state.selected_game,
        left_players: state.left_players,
        right_players: state.right_players,
        reserve_players: state.reserve_players,
        game_state: state.game_state,
        history: History { entries },
        pity_bonus: state.pity_bonus,
        options: state.options,
        win_prediction: state.win_prediction,
        shuffle_temperature: state.shuffle_temperature,
    })
}

pub fn parse_ui_stream_frame(text: &str) -> Result<UiStreamMessage, StateParseError> {
    let frame: UiStreamFrame = serde_json::from_str(text)?;
    let mut message = UiStreamMessage {
        error: frame.error,
        ..UiStreamMessage::default()
    };
    if let Some(success) = frame.success {
        message.state = success.state.map(parse_elo_elo_state).transpose()?;
        message.discord_info = success.discord_info;
    }
    Ok(message)
}

pub fn extract_avatars(discord_info: &[DiscordPlayerInfo]) -> Vec<PlayerAvatar> {
    discord_info
        .iter()
        .map(|info| PlayerAvatar {
            username: info.username.clone(),
            avatar_url: info.avatar_url.clone(),
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
