use eloelo_shared::{
    domain::{GameState, PlayerId},
    protocol::PityBonus,
};

use super::*;

fn player(id: &str, elo: i32, discord: Option<&str>, lose_streak: Option<i32>) -> Player {
    Player {
        id: PlayerId::from(id),
        name: id.to_uppercase(),
        discord_username: discord.map(str::to_string),
        elo,
        present_in_lobby: true,
        lose_streak,
    }
}

fn team_pity(real_elo: i32, pity_elo: i32, mul: f64) -> TeamPityBonus {
    TeamPityBonus {
        real_elo,
        pity_elo,
        pity_bonus_mul: mul,
        pity_bonus_add: pity_elo - real_elo,
    }
}

fn sample_state() -> EloEloState {
    EloEloState {
        left_players: vec![
            player("a", 900, Some("alice"), Some(2)),
            player("b", 1100, None, Some(4)),
            player("c", 1000, Some("carol"), None),
        ],
        right_players: vec![player("d", 1200, None, Some(4)), player("e", 800, None, Some(0))],
        pity_bonus: Some(PityBonus {
            left: team_pity(3000, 3000, 1.0),
            right: team_pity(2000, 2080, 0.96),
        }),
        ..EloEloState::default()
    }
}

#[test]
fn rows_are_sorted_by_elo_descending() {
    let roster = build_team_roster(&sample_state(), Side::Left, &[]);
    let elos: Vec<_> = roster.rows.iter().map(|row| row.elo).collect();
    assert_eq!(elos, [1100, 1000, 900]);
    assert_eq!(roster.elo_sum, 3000);
    assert_eq!(roster.team_name, "Left team");
}

#[test]
fn crown_goes_to_every_max_streak_holder() {
    let state = sample_state();
    assert_eq!(max_lose_streak(&state), Some(4));
    let left = build_team_roster(&state, Side::Left, &[]);
    let right = build_team_roster(&state, Side::Right, &[]);
    let crowned: Vec<_> = left
        .rows
        .iter()
        .chain(&right.rows)
        .filter(|row| row.crowned)
        .map(|row| row.id.as_str())
        .collect();
    assert_eq!(crowned, ["b", "d"]);
    assert_eq!(right.rows[0].display_name(), "👑 D");
}

#[test]
fn nobody_is_crowned_without_streaks() {
    let state = EloEloState {
        left_players: vec![player("a", 1000, None, None), player("b", 1000, None, Some(0))],
        ..EloEloState::default()
    };
    assert_eq!(max_lose_streak(&state), None);
    let roster = build_team_roster(&state, Side::Left, &[]);
    assert!(roster.rows.iter().all(|row| !row.crowned));
}

#[test]
fn streak_indicator() {
    assert_eq!(streak_label(Some(3)), "-3▼");
    assert_eq!(streak_label(Some(0)), "");
    assert_eq!(streak_label(None), "");
}

#[test]
fn pity_label_shows_percentage_bonus() {
    let roster = build_team_roster(&sample_state(), Side::Right, &[]);
    assert_eq!(
        roster.pity_label.as_deref(),
        Some("2080 with pity bonus of -4%")
    );
    assert_eq!(
        pity_label(&team_pity(3000, 3000, 1.0)),
        "3000 with pity bonus of -0%"
    );
}

#[test]
fn avatars_resolve_by_discord_username() {
    let avatars = vec![PlayerAvatar {
        username: "alice".into(),
        avatar_url: Some("https://cdn/a.png".into()),
    }];
    let roster = build_team_roster(&sample_state(), Side::Left, &avatars);
    let alice = roster
        .rows
        .iter()
        .find(|row| row.id.as_str() == "a")
        .expect("alice row");
    assert_eq!(alice.avatar_url.as_deref(), Some("https://cdn/a.png"));
    assert!(roster
        .rows
        .iter()
        .filter(|row| row.id.as_str() != "a")
        .all(|row| row.avatar_url.is_none()));
}

#[test]
fn actions_only_while_assembling() {
    let mut state = sample_state();
    assert!(build_team_roster(&state, Side::Left, &[]).actions_enabled);
    state.game_state = GameState::MatchInProgress;
    assert!(!build_team_roster(&state, Side::Left, &[]).actions_enabled);
}

#[test]
fn row_commands() {
    let roster = build_team_roster(&sample_state(), Side::Left, &[]);
    let row = &roster.rows[0];
    assert_eq!(
        row.toggle_presence_command(),
        UiCommand::PresentInLobbyChange {
            id: PlayerId::from("b"),
            present: false,
        }
    );
    assert_eq!(row.move_command().name(), "move_player_to_other_team");
    assert_eq!(row.remove_command().name(), "remove_player_from_team");
    assert_eq!(row.call_command().name(), "call_player");
}
