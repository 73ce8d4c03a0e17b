use chrono::Utc;
use eloelo_shared::{
    domain::GameId,
    protocol::EloEloStateTransport,
    view::parse_elo_elo_state,
};
use serde_json::json;

use super::*;

fn state() -> EloEloState {
    let transport: EloEloStateTransport = serde_json::from_value(json!({
        "selectedGame": "dota",
        "leftPlayers": [{ "id": "a", "name": "Alice", "elo": 1000, "discordUsername": "alice" }],
        "reservePlayers": [{ "id": "b", "name": "Bob", "elo": 990 }],
        "history": { "entries": {
            "dota": [{
                "entry": {
                    "timestamp": "2024-03-01T20:05:00+01:00",
                    "winner": ["a", "ghost"],
                    "loser": ["b"],
                    "duration": 3960,
                    "scale": "Pwnage",
                    "fake": true
                },
                "metadata": { "winnerElo": 2000, "loserElo": 990, "winnerChance": 0.734 }
            }],
            "lol": [{ "timestamp": "2024-03-02T10:00:00Z", "winner": [], "loser": [] }]
        } }
    }))
    .expect("transport");
    parse_elo_elo_state(transport).expect("state")
}

#[test]
fn rows_only_cover_the_selected_game() {
    let rows = build_history_in(&state(), &[], &Utc);
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.timestamp_label, "2024-03-01 19:05:00");
    assert_eq!(row.scale, WinScale::Pwnage);
    assert_eq!(row.duration_label, "1h6m");
    assert!(row.fake);
    assert_eq!(row.metadata.winner_elo, 2000);
    assert_eq!(row.winner_chance_label(), "73%");
}

#[test]
fn unknown_ids_become_placeholders() {
    let avatars = vec![PlayerAvatar {
        username: "alice".into(),
        avatar_url: Some("https://cdn/a.png".into()),
    }];
    let rows = build_history_in(&state(), &avatars, &Utc);
    let winners = &rows[0].winners;
    assert_eq!(winners[0].name, "Alice");
    assert_eq!(winners[0].avatar_url.as_deref(), Some("https://cdn/a.png"));
    assert_eq!(winners[1].id, PlayerId::from("ghost"));
    assert_eq!(winners[1].name, "ghost");
    assert_eq!(winners[1].initial(), "g");
    assert_eq!(winners[1].avatar_url, None);
    assert_eq!(rows[0].losers[0].name, "Bob");
}

#[test]
fn other_game_is_empty_until_selected() {
    let mut state = state();
    state.selected_game = GameId::from("cs");
    assert!(build_history(&state, &[]).is_empty());
    state.selected_game = GameId::from("lol");
    let rows = build_history_in(&state, &[], &Utc);
    assert_eq!(rows[0].duration_label, "45m");
    assert_eq!(rows[0].scale, WinScale::Even);
}

#[test]
fn highlight_toggles_and_dims_others() {
    let alice = PlayerId::from("a");
    let bob = PlayerId::from("b");
    let mut highlight = HistoryHighlight::default();
    assert!(!highlight.is_dimmed(&alice));
    assert!(!highlight.is_dimmed(&bob));

    highlight.toggle(&alice);
    assert_eq!(highlight.selected(), Some(&alice));
    assert!(!highlight.is_dimmed(&alice));
    assert!(highlight.is_dimmed(&bob));

    highlight.toggle(&bob);
    assert!(highlight.is_dimmed(&alice));

    highlight.toggle(&bob);
    assert_eq!(highlight.selected(), None);
    assert!(!highlight.is_dimmed(&alice));
}
