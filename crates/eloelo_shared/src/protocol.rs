use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

use crate::domain::{GameId, GameState, PlayerId, Side, WinScale};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_username: Option<String>,
    pub elo: i32,
    #[serde(default)]
    pub present_in_lobby: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lose_streak: Option<i32>,
}

impl Player {
    /// Stand-in for ids referenced by history but missing from every roster.
    pub fn placeholder(id: &PlayerId) -> Self {
        Self {
            id: id.clone(),
            name: id.to_string(),
            discord_username: None,
            elo: 0,
            present_in_lobby: false,
            lose_streak: Some(0),
        }
    }
}

fn left_team_default() -> String {
    "Left team".to_string()
}

fn right_team_default() -> String {
    "Right team".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub name: GameId,
    #[serde(default = "left_team_default")]
    pub left_team: String,
    #[serde(default = "right_team_default")]
    pub right_team: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPityBonus {
    pub real_elo: i32,
    pub pity_elo: i32,
    #[serde(default)]
    pub pity_bonus_mul: f64,
    #[serde(default)]
    pub pity_bonus_add: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PityBonus {
    pub left: TeamPityBonus,
    pub right: TeamPityBonus,
}

impl PityBonus {
    pub fn for_side(&self, side: Side) -> &TeamPityBonus {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Option value tagged the way the backend describes its settings schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum OptionValue {
    Boolean(bool),
    Integer(i64),
    Decimal(#[serde(deserialize_with = "decimal_literal")] String),
    #[serde(alias = "text")]
    String(String),
}

impl OptionValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Boolean(_) => "boolean",
            OptionValue::Integer(_) => "integer",
            OptionValue::Decimal(_) => "decimal",
            OptionValue::String(_) => "string",
        }
    }

    /// JSON value sent back in the `options` command. Decimals stay literal strings.
    pub fn to_json(&self) -> Value {
        match self {
            OptionValue::Boolean(v) => Value::Bool(*v),
            OptionValue::Integer(v) => Value::from(*v),
            OptionValue::Decimal(v) | OptionValue::String(v) => Value::String(v.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribedOption {
    pub key: String,
    pub name: String,
    #[serde(flatten)]
    pub value: OptionValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsGroup {
    pub name: String,
    pub key: String,
    #[serde(default)]
    pub options: Vec<DescribedOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryMetadata {
    #[serde(default)]
    pub winner_elo: i32,
    #[serde(default)]
    pub loser_elo: i32,
    #[serde(default)]
    pub winner_chance: f64,
}

fn default_match_duration() -> u64 {
    45 * 60
}

fn default_scale() -> String {
    "Even".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryFields {
    pub timestamp: String,
    #[serde(default)]
    pub winner: Vec<PlayerId>,
    #[serde(default)]
    pub loser: Vec<PlayerId>,
    #[serde(default = "default_match_duration")]
    pub duration: u64,
    #[serde(default = "default_scale")]
    pub scale: String,
    #[serde(default)]
    pub fake: bool,
}

/// History rows arrive either wrapped with derived metadata or as bare entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryEntryTransport {
    WithMetadata {
        entry: HistoryEntryFields,
        #[serde(default)]
        metadata: HistoryMetadata,
    },
    Bare(HistoryEntryFields),
}

impl HistoryEntryTransport {
    pub fn into_parts(self) -> (HistoryEntryFields, HistoryMetadata) {
        match self {
            HistoryEntryTransport::WithMetadata { entry, metadata } => (entry, metadata),
            HistoryEntryTransport::Bare(entry) => (entry, HistoryMetadata::default()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryTransport {
    #[serde(default)]
    pub entries: HashMap<GameId, Vec<HistoryEntryTransport>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EloEloStateTransport {
    #[serde(default)]
    pub available_games: Vec<Game>,
    #[serde(default)]
    pub selected_game: GameId,
    #[serde(default)]
    pub left_players: Vec<Player>,
    #[serde(default)]
    pub right_players: Vec<Player>,
    #[serde(default)]
    pub reserve_players: Vec<Player>,
    #[serde(default)]
    pub game_state: GameState,
    #[serde(default)]
    pub history: HistoryTransport,
    #[serde(default)]
    pub pity_bonus: Option<PityBonus>,
    #[serde(default)]
    pub options: Vec<OptionsGroup>,
    #[serde(default, deserialize_with = "lenient_probability")]
    pub win_prediction: Option<f64>,
    #[serde(default)]
    pub shuffle_temperature: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordPlayerInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PlayerId>,
    pub display_name: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAvatar {
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiStreamSuccess {
    #[serde(default)]
    pub state: Option<EloEloStateTransport>,
    #[serde(default)]
    pub discord_info: Option<Vec<DiscordPlayerInfo>>,
}

/// One WebSocket text frame of `api/v1/ui_stream`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UiStreamFrame {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub success: Option<UiStreamSuccess>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationPayload {
    pub secs: u64,
    pub nanos: u32,
}

/// `{ group: { option: value } }` payload of the `options` command.
pub type GenericOptions = BTreeMap<String, BTreeMap<String, OptionValue>>;

#[derive(Debug, Clone, PartialEq)]
pub enum FinishMatch {
    Cancelled,
    Finished {
        winner: Side,
        scale: WinScale,
        duration: DurationPayload,
        fake: bool,
    },
}

/// Every remote command the operator client can fire.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    InitializeUi,
    ChangeGame { id: GameId },
    RefreshElo,
    StartMatch,
    ShuffleTeams,
    FinishMatch(FinishMatch),
    AddNewPlayer {
        name: String,
        discord_username: Option<String>,
    },
    RemovePlayer { id: PlayerId },
    AddPlayerToTeam { id: PlayerId, team: Side },
    RemovePlayerFromTeam { id: PlayerId },
    MovePlayerToOtherTeam { id: PlayerId },
    PresentInLobbyChange { id: PlayerId, present: bool },
    CallPlayer { id: PlayerId },
    CallToLobby,
    ClearLobby,
    FillLobby,
    Options(GenericOptions),
}

impl UiCommand {
    pub fn name(&self) -> &'static str {
        match self {
            UiCommand::InitializeUi => "initialize_ui",
            UiCommand::ChangeGame { .. } => "change_game",
            UiCommand::RefreshElo => "refresh_elo",
            UiCommand::StartMatch => "start_match",
            UiCommand::ShuffleTeams => "shuffle_teams",
            UiCommand::FinishMatch(_) => "finish_match",
            UiCommand::AddNewPlayer { .. } => "add_new_player",
            UiCommand::RemovePlayer { .. } => "remove_player",
            UiCommand::AddPlayerToTeam { .. } => "add_player_to_team",
            UiCommand::RemovePlayerFromTeam { .. } => "remove_player_from_team",
            UiCommand::MovePlayerToOtherTeam { .. } => "move_player_to_other_team",
            UiCommand::PresentInLobbyChange { .. } => "present_in_lobby_change",
            UiCommand::CallPlayer { .. } => "call_player",
            UiCommand::CallToLobby => "call_to_lobby",
            UiCommand::ClearLobby => "clear_lobby",
            UiCommand::FillLobby => "fill_lobby",
            UiCommand::Options(_) => "options",
        }
    }

    /// JSON argument object posted with the command.
    pub fn args(&self) -> Value {
        match self {
            UiCommand::InitializeUi
            | UiCommand::RefreshElo
            | UiCommand::StartMatch
            | UiCommand::ShuffleTeams
            | UiCommand::CallToLobby
            | UiCommand::ClearLobby
            | UiCommand::FillLobby => json!({}),
            UiCommand::ChangeGame { id } => json!({ "id": id }),
            UiCommand::FinishMatch(FinishMatch::Cancelled) => json!({}),
            UiCommand::FinishMatch(FinishMatch::Finished {
                winner,
                scale,
                duration,
                fake,
            }) => json!({
                "winner": winner,
                "scale": scale,
                "duration": duration,
                "fake": fake,
            }),
            UiCommand::AddNewPlayer {
                name,
                discord_username,
            } => {
                let mut args = Map::new();
                args.insert("name".into(), Value::String(name.clone()));
                if let Some(username) = discord_username {
                    args.insert("discord_username".into(), Value::String(username.clone()));
                }
                Value::Object(args)
            }
            UiCommand::RemovePlayer { id }
            | UiCommand::RemovePlayerFromTeam { id }
            | UiCommand::MovePlayerToOtherTeam { id }
            | UiCommand::CallPlayer { id } => json!({ "id": id }),
            UiCommand::AddPlayerToTeam { id, team } => json!({ "id": id, "team": team }),
            UiCommand::PresentInLobbyChange { id, present } => {
                json!({ "id": id, "present": present })
            }
            UiCommand::Options(groups) => Value::Object(
                groups
                    .iter()
                    .map(|(group, values)| {
                        let values = values
                            .iter()
                            .map(|(key, value)| (key.clone(), value.to_json()))
                            .collect::<Map<_, _>>();
                        (group.clone(), Value::Object(values))
                    })
                    .collect(),
            ),
        }
    }
}

fn decimal_literal<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected decimal string or number, got {other}"
        ))),
    }
}

fn lenient_probability<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => Ok(number.as_f64()),
        Some(Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected probability number or decimal string, got {other}"
        ))),
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
