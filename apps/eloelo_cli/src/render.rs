//! Plain-text rendering of snapshots for `eloelo watch`.

use eloelo_client::present::{
    build_reserve, build_team_roster, win_prediction_label, PlayerRow, TeamRosterView,
};
use eloelo_shared::{
    domain::{GameState, Side},
    protocol::{DiscordPlayerInfo, PlayerAvatar},
    view::EloEloState,
};

fn phase_label(game_state: GameState) -> &'static str {
    match game_state {
        GameState::AssemblingTeams => "assembling teams",
        GameState::MatchInProgress => "Fight!",
    }
}

fn player_line(row: &PlayerRow) -> String {
    let mut line = format!("  {:<24} {:>5}", row.display_name(), row.elo);
    if !row.streak_label.is_empty() {
        line.push_str(&format!("  {}", row.streak_label));
    }
    if row.present_in_lobby {
        line.push_str("  [lobby]");
    }
    line
}

fn roster_lines(roster: &TeamRosterView, lines: &mut Vec<String>) {
    let mut header = format!("{} ({})", roster.team_name, roster.elo_sum);
    if let Some(pity) = &roster.pity_label {
        header.push_str(&format!(" | {pity}"));
    }
    lines.push(header);
    lines.extend(roster.rows.iter().map(player_line));
}

pub fn render_snapshot(state: &EloEloState, avatars: &[PlayerAvatar]) -> String {
    let game = if state.selected_game.as_str().is_empty() {
        "<no game>"
    } else {
        state.selected_game.as_str()
    };
    let mut lines = vec![format!("== {game}: {} ==", phase_label(state.game_state))];

    for side in [Side::Left, Side::Right] {
        roster_lines(&build_team_roster(state, side, avatars), &mut lines);
    }

    let reserve = build_reserve(state, &[], avatars, false);
    lines.push(format!("Reserve ({})", reserve.rows.len()));
    lines.extend(reserve.rows.iter().map(|row| {
        let lobby = if row.present_in_lobby { "  [lobby]" } else { "" };
        format!("  {:<24} {:>5}{lobby}", row.name, row.elo)
    }));

    if let Some(prediction) = win_prediction_label(state.win_prediction) {
        lines.push(prediction);
    }
    lines.push(format!(
        "History: {} matches",
        state.history_for_selected_game().len()
    ));
    lines.join("\n")
}

pub fn render_discord_summary(discord_info: &[DiscordPlayerInfo], avatars: &[PlayerAvatar]) -> String {
    let with_avatar = avatars.iter().filter(|a| a.avatar_url.is_some()).count();
    format!(
        "Discord: {} members, {} avatars ({} with image)",
        discord_info.len(),
        avatars.len(),
        with_avatar
    )
}

#[cfg(test)]
mod tests {
    use eloelo_shared::{protocol::EloEloStateTransport, view::parse_elo_elo_state};
    use serde_json::json;

    use super::*;

    fn state() -> EloEloState {
        let transport: EloEloStateTransport = serde_json::from_value(json!({
            "availableGames": [{ "name": "dota", "leftTeam": "Radiant", "rightTeam": "Dire" }],
            "selectedGame": "dota",
            "gameState": "matchInProgress",
            "leftPlayers": [
                { "id": "a", "name": "Alice", "elo": 900, "presentInLobby": true, "loseStreak": 3 },
                { "id": "b", "name": "Bob", "elo": 1100 }
            ],
            "rightPlayers": [{ "id": "c", "name": "Carol", "elo": 1000 }],
            "reservePlayers": [{ "id": "d", "name": "Dan", "elo": 950, "presentInLobby": true }],
            "winPrediction": 0.42,
            "history": { "entries": { "dota": [
                { "timestamp": "2024-03-01T20:00:00Z", "winner": ["a"], "loser": ["c"] }
            ] } }
        }))
        .expect("transport");
        parse_elo_elo_state(transport).expect("state")
    }

    #[test]
    fn snapshot_lists_rosters_reserve_and_labels() {
        let text = render_snapshot(&state(), &[]);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "== dota: Fight! ==");
        assert_eq!(lines[1], "Radiant (2000)");
        assert!(lines[2].contains("Bob"));
        assert!(lines[3].contains("👑 Alice"));
        assert!(lines[3].ends_with("-3▼  [lobby]"));
        assert_eq!(lines[4], "Dire (1000)");
        assert_eq!(lines[6], "Reserve (1)");
        assert!(text.contains("Right team win chance: 42%"));
        assert!(text.ends_with("History: 1 matches"));
    }

    #[test]
    fn empty_state_renders() {
        let text = render_snapshot(&EloEloState::default(), &[]);
        assert!(text.starts_with("== <no game>: assembling teams =="));
        assert!(text.contains("Left team (0)"));
        assert!(!text.contains("win chance"));
    }

    #[test]
    fn discord_summary_counts() {
        let info = vec![DiscordPlayerInfo {
            id: None,
            display_name: "Alice".into(),
            username: "alice".into(),
            avatar_url: Some("https://cdn/a.png".into()),
        }];
        let avatars = eloelo_shared::view::extract_avatars(&info);
        assert_eq!(
            render_discord_summary(&info, &avatars),
            "Discord: 1 members, 1 avatars (1 with image)"
        );
    }
}
