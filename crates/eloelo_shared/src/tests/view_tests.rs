use super::*;
use chrono::{TimeZone, Utc};
use serde_json::json;

fn player(id: &str, elo: i32) -> serde_json::Value {
    json!({ "id": id, "name": id.to_uppercase(), "elo": elo, "presentInLobby": true })
}

fn history_row(timestamp: &str, scale: &str) -> serde_json::Value {
    json!({
        "entry": {
            "timestamp": timestamp,
            "winner": ["a"],
            "loser": ["b"],
            "duration": 1800,
            "scale": scale,
            "fake": false
        },
        "metadata": { "winnerElo": 1010, "loserElo": 990, "winnerChance": 0.52 }
    })
}

fn transport(value: serde_json::Value) -> EloEloStateTransport {
    serde_json::from_value(value).expect("transport state")
}

#[test]
fn default_state_is_empty() {
    let state = EloEloState::default();
    assert!(state.available_games.is_empty());
    assert_eq!(state.selected_game.as_str(), "");
    assert!(state.game_state.is_assembling());
    assert!(state.history_for_selected_game().is_empty());
    assert!(state.pity_bonus.is_none());
    assert!(state.options.is_empty());
}

#[test]
fn maps_every_history_entry_of_every_game() {
    let scales = ["Pwnage", "Advantage", "Even"];
    let games = ["dota", "lol", "cs"];
    let mut entries = serde_json::Map::new();
    for game in games {
        let rows: Vec<_> = scales
            .iter()
            .map(|scale| history_row("2024-03-01T20:00:00+01:00", scale))
            .collect();
        entries.insert(game.to_string(), json!(rows));
    }

    let state = parse_elo_elo_state(transport(json!({
        "selectedGame": "dota",
        "history": { "entries": entries }
    })))
    .expect("parse");

    assert_eq!(state.history.entries.len(), games.len());
    assert_eq!(state.history.total_entries(), games.len() * scales.len());
    for rows in state.history.entries.values() {
        let parsed: Vec<_> = rows.iter().map(|row| row.entry.scale).collect();
        assert_eq!(parsed, WinScale::ALL.to_vec());
        for row in rows {
            assert_eq!(
                row.entry.timestamp.with_timezone(&Utc),
                Utc.with_ymd_and_hms(2024, 3, 1, 19, 0, 0).unwrap()
            );
        }
    }
    assert_eq!(state.history_for_selected_game().len(), scales.len());
}

#[test]
fn naive_timestamp_is_read_as_utc() {
    let state = parse_elo_elo_state(transport(json!({
        "selectedGame": "dota",
        "history": { "entries": { "dota": [history_row("2024-03-01T20:00:00.250", "Even")] } }
    })))
    .expect("parse");
    let entry = &state.history_for_selected_game()[0].entry;
    assert_eq!(entry.timestamp.offset().local_minus_utc(), 0);
    assert_eq!(entry.timestamp.timestamp_millis() % 1000, 250);
}

#[test]
fn bad_timestamp_names_the_game() {
    let err = parse_elo_elo_state(transport(json!({
        "history": { "entries": { "lol": [history_row("yesterday", "Even")] } }
    })))
    .expect_err("should fail");
    match err {
        StateParseError::Timestamp { game, value, .. } => {
            assert_eq!(game, "lol");
            assert_eq!(value, "yesterday");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn unknown_scale_is_rejected() {
    let err = parse_elo_elo_state(transport(json!({
        "history": { "entries": { "lol": [history_row("2024-03-01T20:00:00Z", "Stomp")] } }
    })))
    .expect_err("should fail");
    assert!(matches!(err, StateParseError::Scale { .. }));
}

#[test]
fn bare_history_rows_get_zero_metadata() {
    let state = parse_elo_elo_state(transport(json!({
        "selectedGame": "dota",
        "history": { "entries": { "dota": [
            { "timestamp": "2024-03-01T20:00:00Z", "winner": ["a"], "loser": ["b"] }
        ] } }
    })))
    .expect("parse");
    let row = &state.history_for_selected_game()[0];
    assert_eq!(row.metadata, HistoryMetadata::default());
    assert_eq!(row.entry.scale, WinScale::Even);
    assert_eq!(row.entry.duration, 2700);
}

#[test]
fn serialized_view_parses_back_unchanged() {
    let state = parse_elo_elo_state(transport(json!({
        "availableGames": [{ "name": "dota", "leftTeam": "Radiant", "rightTeam": "Dire" }],
        "selectedGame": "dota",
        "leftPlayers": [player("a", 1010)],
        "rightPlayers": [player("b", 990)],
        "reservePlayers": [player("c", 1000)],
        "gameState": "matchInProgress",
        "history": { "entries": { "dota": [history_row("2024-03-01T20:00:00.5+01:00", "Advantage")] } },
        "pityBonus": {
            "left": { "realElo": 1010, "pityElo": 1010, "pityBonusMul": 1.0, "pityBonusAdd": 0 },
            "right": { "realElo": 990, "pityElo": 1030, "pityBonusMul": 0.96, "pityBonusAdd": 40 }
        },
        "winPrediction": "0.47",
        "shuffleTemperature": 50
    })))
    .expect("parse");

    let json = serde_json::to_value(&state).expect("serialize view");
    assert_eq!(
        json["history"]["entries"]["dota"][0]["entry"]["scale"],
        json!("advantage")
    );
    let reparsed = parse_elo_elo_state(transport(json)).expect("reparse");
    assert_eq!(reparsed, state);
}

#[test]
fn selected_game_lookups() {
    let state = parse_elo_elo_state(transport(json!({
        "availableGames": [{ "name": "dota" }, { "name": "lol" }],
        "selectedGame": "lol",
        "leftPlayers": [player("a", 1)],
        "reservePlayers": [player("c", 3)]
    })))
    .expect("parse");
    let game = state.selected_game_data().expect("selected game");
    assert_eq!(game.left_team, "Left team");
    assert!(state.history_for_selected_game().is_empty());
    assert_eq!(state.all_players().count(), 2);
    assert!(state.find_player(&PlayerId::from("c")).is_some());
    assert!(state.team(Side::Right).is_empty());
}

#[test]
fn stream_frame_with_state_and_discord_info() {
    let text = json!({
        "success": {
            "state": { "selectedGame": "dota", "leftPlayers": [player("a", 1000)] },
            "discordInfo": [
                { "displayName": "Alice", "username": "alice", "avatarUrl": "https://cdn/a.png" },
                { "displayName": "Bob", "username": "bob" }
            ]
        }
    })
    .to_string();
    let message = parse_ui_stream_frame(&text).expect("frame");
    assert!(message.error.is_none());
    assert_eq!(
        message.state.map(|state| state.left_players.len()),
        Some(1)
    );
    let avatars = extract_avatars(&message.discord_info.expect("discord info"));
    assert_eq!(avatars[0].avatar_url.as_deref(), Some("https://cdn/a.png"));
    assert_eq!(avatars[1].username, "bob");
    assert_eq!(avatars[1].avatar_url, None);
}

#[test]
fn stream_error_frame() {
    let message = parse_ui_stream_frame(r#"{"error":"lost"}"#).expect("frame");
    assert_eq!(message.error.as_deref(), Some("lost"));
    assert!(message.state.is_none());
    assert!(parse_ui_stream_frame("not json").is_err());
}
