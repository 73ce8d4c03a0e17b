use eloelo_shared::{
    domain::{PlayerId, Side},
    protocol::{Player, PlayerAvatar, TeamPityBonus, UiCommand},
    view::EloEloState,
};
use tracing::warn;

use super::{avatar_url_for, team_name};

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRow {
    pub id: PlayerId,
    pub name: String,
    pub elo: i32,
    pub avatar_url: Option<String>,
    pub crowned: bool,
    pub streak_label: String,
    pub present_in_lobby: bool,
}

impl PlayerRow {
    pub fn display_name(&self) -> String {
        if self.crowned {
            format!("👑 {}", self.name)
        } else {
            self.name.clone()
        }
    }

    pub fn remove_command(&self) -> UiCommand {
        UiCommand::RemovePlayerFromTeam {
            id: self.id.clone(),
        }
    }

    pub fn move_command(&self) -> UiCommand {
        UiCommand::MovePlayerToOtherTeam {
            id: self.id.clone(),
        }
    }

    pub fn toggle_presence_command(&self) -> UiCommand {
        UiCommand::PresentInLobbyChange {
            id: self.id.clone(),
            present: !self.present_in_lobby,
        }
    }

    pub fn call_command(&self) -> UiCommand {
        UiCommand::CallPlayer {
            id: self.id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamRosterView {
    pub side: Side,
    pub team_name: String,
    pub rows: Vec<PlayerRow>,
    pub elo_sum: i32,
    pub pity_label: Option<String>,
    /// Remove and move buttons.
    pub actions_enabled: bool,
}

/// Largest positive lose streak across both teams.
pub fn max_lose_streak(state: &EloEloState) -> Option<i32> {
    state
        .left_players
        .iter()
        .chain(&state.right_players)
        .filter_map(|player| player.lose_streak)
        .filter(|streak| *streak != 0)
        .max()
}

pub fn streak_label(lose_streak: Option<i32>) -> String {
    match lose_streak {
        Some(streak) if streak > 0 => format!("{}▼", -streak),
        _ => String::new(),
    }
}

pub fn pity_label(pity: &TeamPityBonus) -> String {
    let bonus = (1.0 - pity.pity_bonus_mul) * 100.0;
    format!("{} with pity bonus of -{bonus:.0}%", pity.pity_elo)
}

fn player_row(player: &Player, avatars: &[PlayerAvatar], max_streak: Option<i32>) -> PlayerRow {
    PlayerRow {
        id: player.id.clone(),
        name: player.name.clone(),
        elo: player.elo,
        avatar_url: avatar_url_for(avatars, player.discord_username.as_deref()).map(str::to_string),
        crowned: max_streak.is_some() && player.lose_streak == max_streak,
        streak_label: streak_label(player.lose_streak),
        present_in_lobby: player.present_in_lobby,
    }
}

pub fn build_team_roster(state: &EloEloState, side: Side, avatars: &[PlayerAvatar]) -> TeamRosterView {
    let players = state.team(side);
    let elo_sum = players.iter().map(|player| player.elo).sum::<i32>();
    let pity = state.pity_bonus.as_ref().map(|bonus| bonus.for_side(side));
    if let Some(pity) = pity {
        if pity.real_elo != elo_sum {
            warn!(
                side = ?side,
                elo_sum,
                real_elo = pity.real_elo,
                "team elo sum differs from pity bonus real elo"
            );
        }
    }

    let max_streak = max_lose_streak(state);
    let mut rows: Vec<_> = players
        .iter()
        .map(|player| player_row(player, avatars, max_streak))
        .collect();
    rows.sort_by(|a, b| b.elo.cmp(&a.elo));

    TeamRosterView {
        side,
        team_name: team_name(state, side),
        rows,
        elo_sum,
        pity_label: pity.map(pity_label),
        actions_enabled: state.game_state.is_assembling(),
    }
}

#[cfg(test)]
#[path = "tests/roster_tests.rs"]
mod tests;
