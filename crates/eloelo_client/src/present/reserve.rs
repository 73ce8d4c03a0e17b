use eloelo_shared::{
    domain::{PlayerId, Side},
    protocol::{DiscordPlayerInfo, PlayerAvatar, UiCommand},
    view::EloEloState,
};

use super::avatar_url_for;

#[derive(Debug, Clone, PartialEq)]
pub struct ReserveRow {
    pub id: PlayerId,
    pub name: String,
    pub elo: i32,
    pub avatar_url: Option<String>,
    pub present_in_lobby: bool,
}

impl ReserveRow {
    pub fn add_to_team_command(&self, team: Side) -> UiCommand {
        UiCommand::AddPlayerToTeam {
            id: self.id.clone(),
            team,
        }
    }

    pub fn delete_command(&self) -> UiCommand {
        UiCommand::RemovePlayer {
            id: self.id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReserveView {
    pub rows: Vec<ReserveRow>,
    pub add_enabled: bool,
    pub show_delete: bool,
    /// Discord members not yet known as players. Offered by the new-player row.
    pub players_to_add: Vec<DiscordPlayerInfo>,
}

/// Discord members whose username no active player carries, by display name.
pub fn players_to_add(state: &EloEloState, discord_info: &[DiscordPlayerInfo]) -> Vec<DiscordPlayerInfo> {
    let mut candidates: Vec<_> = discord_info
        .iter()
        .filter(|info| {
            !state
                .all_players()
                .any(|player| player.discord_username.as_deref() == Some(info.username.as_str()))
        })
        .cloned()
        .collect();
    candidates.sort_by(|a, b| {
        a.display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase())
            .then_with(|| a.display_name.cmp(&b.display_name))
    });
    candidates
}

pub fn build_reserve(
    state: &EloEloState,
    discord_info: &[DiscordPlayerInfo],
    avatars: &[PlayerAvatar],
    edit_mode: bool,
) -> ReserveView {
    let rows = state
        .reserve_players
        .iter()
        .map(|player| ReserveRow {
            id: player.id.clone(),
            name: player.name.clone(),
            elo: player.elo,
            avatar_url: avatar_url_for(avatars, player.discord_username.as_deref())
                .map(str::to_string),
            present_in_lobby: player.present_in_lobby,
        })
        .collect();

    ReserveView {
        rows,
        add_enabled: state.game_state.is_assembling(),
        show_delete: edit_mode,
        players_to_add: players_to_add(state, discord_info),
    }
}

/// `add_new_player` for a typed name. A name matching a discord display name
/// carries that member's username along.
pub fn new_player_command(name: &str, candidates: &[DiscordPlayerInfo]) -> Option<UiCommand> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let discord_username = candidates
        .iter()
        .find(|info| info.display_name == name)
        .map(|info| info.username.clone());
    Some(UiCommand::AddNewPlayer {
        name: name.to_string(),
        discord_username,
    })
}

#[cfg(test)]
mod tests {
    use eloelo_shared::{domain::GameState, protocol::Player};

    use super::*;

    fn player(id: &str, discord: Option<&str>) -> Player {
        Player {
            id: PlayerId::from(id),
            name: id.to_string(),
            discord_username: discord.map(str::to_string),
            elo: 1000,
            present_in_lobby: false,
            lose_streak: None,
        }
    }

    fn member(display_name: &str, username: &str) -> DiscordPlayerInfo {
        DiscordPlayerInfo {
            id: None,
            display_name: display_name.into(),
            username: username.into(),
            avatar_url: Some(format!("https://cdn/{username}.png")),
        }
    }

    fn state() -> EloEloState {
        EloEloState {
            left_players: vec![player("a", Some("alice"))],
            reserve_players: vec![player("b", Some("bob")), player("c", None)],
            ..EloEloState::default()
        }
    }

    #[test]
    fn candidates_exclude_known_players_and_sort_by_display_name() {
        let discord = vec![
            member("zed", "zed_"),
            member("Alice", "alice"),
            member("Bob", "bob"),
            member("carl", "carl_"),
        ];
        let names: Vec<_> = players_to_add(&state(), &discord)
            .into_iter()
            .map(|info| info.display_name)
            .collect();
        assert_eq!(names, ["carl", "zed"]);
    }

    #[test]
    fn reserve_flags_follow_phase_and_edit_mode() {
        let discord = vec![member("Bob", "bob")];
        let avatars = eloelo_shared::view::extract_avatars(&discord);
        let view = build_reserve(&state(), &discord, &avatars, false);
        assert!(view.add_enabled);
        assert!(!view.show_delete);
        assert_eq!(view.rows[0].avatar_url.as_deref(), Some("https://cdn/bob.png"));
        assert_eq!(view.rows[1].avatar_url, None);

        let mut in_match = state();
        in_match.game_state = GameState::MatchInProgress;
        let view = build_reserve(&in_match, &discord, &avatars, true);
        assert!(!view.add_enabled);
        assert!(view.show_delete);
    }

    #[test]
    fn new_player_maps_display_name_to_username() {
        let candidates = vec![member("Carl", "carl_")];
        assert_eq!(
            new_player_command(" Carl ", &candidates),
            Some(UiCommand::AddNewPlayer {
                name: "Carl".into(),
                discord_username: Some("carl_".into()),
            })
        );
        assert_eq!(
            new_player_command("Dave", &candidates),
            Some(UiCommand::AddNewPlayer {
                name: "Dave".into(),
                discord_username: None,
            })
        );
        assert_eq!(new_player_command("   ", &candidates), None);
    }

    #[test]
    fn row_commands() {
        let view = build_reserve(&state(), &[], &[], true);
        assert_eq!(
            view.rows[0].add_to_team_command(Side::Right),
            UiCommand::AddPlayerToTeam {
                id: PlayerId::from("b"),
                team: Side::Right,
            }
        );
        assert_eq!(
            view.rows[1].delete_command(),
            UiCommand::RemovePlayer {
                id: PlayerId::from("c"),
            }
        );
    }
}
