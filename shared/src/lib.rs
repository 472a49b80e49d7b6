//! Wire protocol for the jet duel client.
//!
//! Everything here mirrors what the game server serializes: camelCase JSON
//! payloads wrapped in `{type, payload}` envelopes on the WebSocket, plus the
//! leaderboard rows served over REST. The server is authoritative for all
//! gameplay state; these types only describe what travels on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const GAME_WIDTH: f32 = 800.0;
pub const GAME_HEIGHT: f32 = 600.0;
pub const PLAYER_WIDTH: f32 = 50.0;
pub const PLAYER_HEIGHT: f32 = 30.0;
pub const BULLET_WIDTH: f32 = 10.0;
pub const BULLET_HEIGHT: f32 = 5.0;
pub const BULLET_SPEED: f32 = 10.0;
pub const POWERUP_SIZE: f32 = 20.0;
pub const MATCH_SECONDS: u64 = 60;

/// One authoritative description of all entity states at a point in time.
/// Sent as the payload of `GAME_START`, `SCORE_UPDATE` and `GAME_OVER`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub players: Vec<PlayerState>,
    #[serde(default)]
    pub bullets: Vec<BulletState>,
    #[serde(default)]
    pub power_ups: Vec<PowerUpState>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_player_width")]
    pub width: f32,
    #[serde(default = "default_player_height")]
    pub height: f32,
    #[serde(default)]
    pub score: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BulletState {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_bullet_width")]
    pub width: f32,
    #[serde(default = "default_bullet_height")]
    pub height: f32,
    #[serde(default = "default_bullet_speed")]
    pub speed: f32,
    pub shooter_name: String,
}

/// Power-ups are an opaque passthrough: the client only ever reads the
/// position and the first character of `type`. Unknown kinds must survive.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PowerUpState {
    pub x: f32,
    pub y: f32,
    #[serde(rename = "type")]
    pub kind: String,
}

fn default_player_width() -> f32 {
    PLAYER_WIDTH
}

fn default_player_height() -> f32 {
    PLAYER_HEIGHT
}

fn default_bullet_width() -> f32 {
    BULLET_WIDTH
}

fn default_bullet_height() -> f32 {
    BULLET_HEIGHT
}

fn default_bullet_speed() -> f32 {
    BULLET_SPEED
}

/// Semantic player action, the only three things the client may request.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Up,
    Down,
    Shoot,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlayerAction {
    pub player: String,
    pub action: Action,
}

/// Messages broadcast by the server on the game topic.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMessage {
    WaitingForPlayer(String),
    GameStart(Snapshot),
    ScoreUpdate(Snapshot),
    GameOver(Snapshot),
}

/// Messages the client sends: the join request carries only the display
/// name, actions carry `{player, action}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    Join(String),
    Action(PlayerAction),
}

/// One leaderboard row as served by `GET /api/leaderboard`. `matchDate` is
/// epoch milliseconds.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub score: i32,
    #[serde(default)]
    pub match_date: i64,
}

#[derive(Debug)]
pub enum DecodeError {
    /// The envelope parsed but carried a `type` this client does not handle.
    /// The dispatcher logs and ignores these, never treats them as fatal.
    UnknownType(String),
    Malformed(serde_json::Error),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::UnknownType(kind) => write!(f, "unknown message type: {}", kind),
            DecodeError::Malformed(err) => write!(f, "malformed message: {}", err),
        }
    }
}

impl std::error::Error for DecodeError {}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    message_type: String,
    #[serde(default)]
    payload: Value,
}

/// Decodes one inbound text frame. Unknown `type` values are reported as
/// [`DecodeError::UnknownType`] so callers can tell them apart from broken
/// frames.
pub fn decode_server_message(text: &str) -> Result<ServerMessage, DecodeError> {
    let envelope: Envelope = serde_json::from_str(text).map_err(DecodeError::Malformed)?;
    let message = match envelope.message_type.as_str() {
        "WAITING_FOR_PLAYER" => ServerMessage::WaitingForPlayer(
            serde_json::from_value(envelope.payload).map_err(DecodeError::Malformed)?,
        ),
        "GAME_START" => ServerMessage::GameStart(
            serde_json::from_value(envelope.payload).map_err(DecodeError::Malformed)?,
        ),
        "SCORE_UPDATE" => ServerMessage::ScoreUpdate(
            serde_json::from_value(envelope.payload).map_err(DecodeError::Malformed)?,
        ),
        "GAME_OVER" => ServerMessage::GameOver(
            serde_json::from_value(envelope.payload).map_err(DecodeError::Malformed)?,
        ),
        other => return Err(DecodeError::UnknownType(other.to_string())),
    };
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_snapshot_json() -> Value {
        json!({
            "players": [
                {"name": "Maverick", "x": 50.0, "y": 285.0, "width": 50, "height": 30, "score": 3},
                {"name": "Iceman", "x": 700.0, "y": 285.0, "width": 50, "height": 30, "score": 1}
            ],
            "bullets": [
                {"x": 120.0, "y": 300.0, "width": 10.0, "height": 5.0, "speed": 10.0, "shooterName": "Maverick"}
            ],
            "powerUps": [
                {"type": "DOUBLE_SCORE", "x": 400.0, "y": 200.0, "duration": 5000}
            ]
        })
    }

    #[test]
    fn decodes_waiting_for_player() {
        let text = r#"{"type":"WAITING_FOR_PLAYER","payload":"Maverick"}"#;
        match decode_server_message(text).unwrap() {
            ServerMessage::WaitingForPlayer(name) => assert_eq!(name, "Maverick"),
            other => panic!("wrong message: {:?}", other),
        }
    }

    #[test]
    fn decodes_game_start_snapshot() {
        let text = json!({"type": "GAME_START", "payload": sample_snapshot_json()}).to_string();
        match decode_server_message(&text).unwrap() {
            ServerMessage::GameStart(snapshot) => {
                assert_eq!(snapshot.players.len(), 2);
                assert_eq!(snapshot.players[0].name, "Maverick");
                assert_eq!(snapshot.players[0].score, 3);
                assert_eq!(snapshot.bullets.len(), 1);
                assert_eq!(snapshot.bullets[0].shooter_name, "Maverick");
                assert_eq!(snapshot.power_ups.len(), 1);
                assert_eq!(snapshot.power_ups[0].kind, "DOUBLE_SCORE");
            }
            other => panic!("wrong message: {:?}", other),
        }
    }

    #[test]
    fn decodes_score_update_and_game_over() {
        for kind in ["SCORE_UPDATE", "GAME_OVER"] {
            let text = json!({"type": kind, "payload": sample_snapshot_json()}).to_string();
            let message = decode_server_message(&text).unwrap();
            match (kind, message) {
                ("SCORE_UPDATE", ServerMessage::ScoreUpdate(_)) => {}
                ("GAME_OVER", ServerMessage::GameOver(_)) => {}
                (kind, other) => panic!("{} decoded as {:?}", kind, other),
            }
        }
    }

    #[test]
    fn unknown_type_is_distinguishable() {
        // POWERUP_SPAWN exists on the server but this client never handles it.
        let text = r#"{"type":"POWERUP_SPAWN","payload":{"type":"BIG_BULLET","x":1.0,"y":2.0}}"#;
        match decode_server_message(text) {
            Err(DecodeError::UnknownType(kind)) => assert_eq!(kind, "POWERUP_SPAWN"),
            other => panic!("expected unknown type, got {:?}", other),
        }
    }

    #[test]
    fn malformed_frames_are_rejected() {
        assert!(matches!(
            decode_server_message("not json at all"),
            Err(DecodeError::Malformed(_))
        ));
        // Valid envelope, wrong payload shape for the type.
        assert!(matches!(
            decode_server_message(r#"{"type":"GAME_START","payload":"oops"}"#),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn snapshot_lists_default_to_empty() {
        let text = r#"{"type":"SCORE_UPDATE","payload":{}}"#;
        match decode_server_message(text).unwrap() {
            ServerMessage::ScoreUpdate(snapshot) => {
                assert!(snapshot.players.is_empty());
                assert!(snapshot.bullets.is_empty());
                assert!(snapshot.power_ups.is_empty());
            }
            other => panic!("wrong message: {:?}", other),
        }
    }

    #[test]
    fn player_dimensions_fall_back_to_defaults() {
        let player: PlayerState =
            serde_json::from_value(json!({"name": "Maverick", "x": 1.0, "y": 2.0})).unwrap();
        assert_eq!(player.width, PLAYER_WIDTH);
        assert_eq!(player.height, PLAYER_HEIGHT);
        assert_eq!(player.score, 0);
    }

    #[test]
    fn join_request_carries_only_the_name() {
        let value = serde_json::to_value(ClientMessage::Join("Maverick".to_string())).unwrap();
        assert_eq!(value, json!({"type": "JOIN", "payload": "Maverick"}));
    }

    #[test]
    fn action_request_matches_wire_contract() {
        let action = ClientMessage::Action(PlayerAction {
            player: "Iceman".to_string(),
            action: Action::Shoot,
        });
        let value = serde_json::to_value(action).unwrap();
        assert_eq!(
            value,
            json!({"type": "ACTION", "payload": {"player": "Iceman", "action": "SHOOT"}})
        );
    }

    #[test]
    fn leaderboard_rows_parse_from_server_json() {
        let rows: Vec<LeaderboardEntry> = serde_json::from_value(json!([
            {"id": 1, "playerName": "Maverick", "score": 12, "matchDate": 1754524800000i64},
            {"id": 2, "playerName": "Iceman", "score": 9, "matchDate": 1754438400000i64}
        ]))
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player_name, "Maverick");
        assert_eq!(rows[0].score, 12);
        assert_eq!(rows[1].match_date, 1754438400000);
    }
}
