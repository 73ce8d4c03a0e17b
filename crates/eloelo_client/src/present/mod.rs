//! Pure shaping of the latest snapshot into what the operator sees.
//!
//! Nothing here talks to the backend. Callers turn the returned
//! [`UiCommand`]s into dispatches.

use eloelo_shared::{
    domain::{GameState, Side},
    protocol::{FinishMatch, PlayerAvatar, UiCommand},
    view::EloEloState,
};

mod finish_match;
mod history;
mod options_form;
mod reserve;
mod roster;

pub use finish_match::FinishMatchForm;
pub use history::{build_history, build_history_in, HistoryHighlight, HistoryPlayer, HistoryRowView};
pub use options_form::{
    make_generic_options, OptionBuffer, OptionField, OptionsForm, OptionsFormGroup,
};
pub use reserve::{build_reserve, new_player_command, players_to_add, ReserveRow, ReserveView};
pub use roster::{
    build_team_roster, max_lose_streak, pity_label, streak_label, PlayerRow, TeamRosterView,
};

pub const DEFAULT_LEFT_TEAM: &str = "Left team";
pub const DEFAULT_RIGHT_TEAM: &str = "Right team";

/// Team names of the selected game, or the generic ones.
pub fn team_names(state: &EloEloState) -> (String, String) {
    match state.selected_game_data() {
        Some(game) => (game.left_team.clone(), game.right_team.clone()),
        None => (DEFAULT_LEFT_TEAM.to_string(), DEFAULT_RIGHT_TEAM.to_string()),
    }
}

pub fn team_name(state: &EloEloState, side: Side) -> String {
    let (left, right) = team_names(state);
    match side {
        Side::Left => left,
        Side::Right => right,
    }
}

pub fn avatar_url_for<'a>(
    avatars: &'a [PlayerAvatar],
    discord_username: Option<&str>,
) -> Option<&'a str> {
    let username = discord_username?;
    avatars
        .iter()
        .find(|avatar| avatar.username == username)
        .and_then(|avatar| avatar.avatar_url.as_deref())
}

pub fn game_selector_enabled(state: &EloEloState) -> bool {
    state.game_state.is_assembling()
}

pub fn win_prediction_label(prediction: Option<f64>) -> Option<String> {
    prediction.map(|p| format!("Right team win chance: {:.0}%", p * 100.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAction {
    CallLobby,
    ClearLobby,
    FillLobby,
    ShuffleTeams,
    StartMatch,
    AddFake,
    LeftTeamWon,
    RightTeamWon,
    Cancel,
}

impl MatchAction {
    pub fn label(self) -> &'static str {
        match self {
            MatchAction::CallLobby => "Call Lobby",
            MatchAction::ClearLobby => "Clear Lobby",
            MatchAction::FillLobby => "Fill Lobby",
            MatchAction::ShuffleTeams => "Shuffle Teams",
            MatchAction::StartMatch => "Start Match",
            MatchAction::AddFake => "Add Fake",
            MatchAction::LeftTeamWon => "Left Team Won",
            MatchAction::RightTeamWon => "Right Team Won",
            MatchAction::Cancel => "Cancel",
        }
    }

    /// The command fired straight away, or `None` when the action opens the
    /// finish-match form instead.
    pub fn command(self) -> Option<UiCommand> {
        match self {
            MatchAction::CallLobby => Some(UiCommand::CallToLobby),
            MatchAction::ClearLobby => Some(UiCommand::ClearLobby),
            MatchAction::FillLobby => Some(UiCommand::FillLobby),
            MatchAction::ShuffleTeams => Some(UiCommand::ShuffleTeams),
            MatchAction::StartMatch => Some(UiCommand::StartMatch),
            MatchAction::Cancel => Some(UiCommand::FinishMatch(FinishMatch::Cancelled)),
            MatchAction::AddFake | MatchAction::LeftTeamWon | MatchAction::RightTeamWon => None,
        }
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            MatchAction::LeftTeamWon => Some(Side::Left),
            MatchAction::RightTeamWon => Some(Side::Right),
            _ => None,
        }
    }

    /// The button whose dropdown holds this action.
    pub fn parent(self) -> Option<MatchAction> {
        match self {
            MatchAction::ClearLobby | MatchAction::FillLobby => Some(MatchAction::CallLobby),
            MatchAction::AddFake => Some(MatchAction::StartMatch),
            _ => None,
        }
    }
}

/// Action cluster for the current phase, left to right. Clear and Fill
/// live under Call Lobby; Add Fake lives under Start Match.
pub fn match_actions(game_state: GameState) -> &'static [MatchAction] {
    match game_state {
        GameState::AssemblingTeams => &[
            MatchAction::CallLobby,
            MatchAction::ClearLobby,
            MatchAction::FillLobby,
            MatchAction::ShuffleTeams,
            MatchAction::StartMatch,
            MatchAction::AddFake,
        ],
        GameState::MatchInProgress => &[
            MatchAction::CallLobby,
            MatchAction::ClearLobby,
            MatchAction::FillLobby,
            MatchAction::LeftTeamWon,
            MatchAction::RightTeamWon,
            MatchAction::Cancel,
        ],
    }
}

#[cfg(test)]
mod tests {
    use eloelo_shared::{domain::GameId, protocol::Game};

    use super::*;

    #[test]
    fn team_names_fall_back_to_generic() {
        let mut state = EloEloState {
            selected_game: GameId::from("dota"),
            ..EloEloState::default()
        };
        assert_eq!(
            team_names(&state),
            ("Left team".to_string(), "Right team".to_string())
        );

        state.available_games.push(Game {
            name: GameId::from("dota"),
            left_team: "Radiant".into(),
            right_team: "Dire".into(),
        });
        assert_eq!(team_name(&state, Side::Right), "Dire");
    }

    #[test]
    fn win_prediction_is_a_rounded_percentage() {
        assert_eq!(
            win_prediction_label(Some(0.534)).as_deref(),
            Some("Right team win chance: 53%")
        );
        assert_eq!(win_prediction_label(None), None);
    }

    #[test]
    fn game_selector_locks_during_match() {
        let mut state = EloEloState::default();
        assert!(game_selector_enabled(&state));
        state.game_state = GameState::MatchInProgress;
        assert!(!game_selector_enabled(&state));
    }

    #[test]
    fn cancel_sends_finish_without_winner() {
        let actions = match_actions(GameState::MatchInProgress);
        assert!(actions.contains(&MatchAction::Cancel));
        assert!(!actions.contains(&MatchAction::StartMatch));
        assert_eq!(
            MatchAction::Cancel.command().map(|c| c.args()),
            Some(serde_json::json!({}))
        );
        assert_eq!(MatchAction::RightTeamWon.command(), None);
        assert_eq!(MatchAction::RightTeamWon.winner(), Some(Side::Right));
    }

    #[test]
    fn assembling_actions() {
        let labels: Vec<_> = match_actions(GameState::AssemblingTeams)
            .iter()
            .map(|a| a.label())
            .collect();
        assert_eq!(
            labels,
            [
                "Call Lobby",
                "Clear Lobby",
                "Fill Lobby",
                "Shuffle Teams",
                "Start Match",
                "Add Fake"
            ]
        );
    }

    #[test]
    fn secondary_actions_hang_off_their_parent() {
        assert_eq!(MatchAction::FillLobby.parent(), Some(MatchAction::CallLobby));
        assert_eq!(MatchAction::AddFake.parent(), Some(MatchAction::StartMatch));
        let primary: Vec<_> = match_actions(GameState::MatchInProgress)
            .iter()
            .filter(|a| a.parent().is_none())
            .map(|a| a.label())
            .collect();
        assert_eq!(primary, ["Call Lobby", "Left Team Won", "Right Team Won", "Cancel"]);
    }

    #[test]
    fn avatar_lookup_by_discord_username() {
        let avatars = vec![
            PlayerAvatar {
                username: "alice".into(),
                avatar_url: Some("https://cdn/a.png".into()),
            },
            PlayerAvatar {
                username: "bob".into(),
                avatar_url: None,
            },
        ];
        assert_eq!(
            avatar_url_for(&avatars, Some("alice")),
            Some("https://cdn/a.png")
        );
        assert_eq!(avatar_url_for(&avatars, Some("bob")), None);
        assert_eq!(avatar_url_for(&avatars, None), None);
    }
}
