//! Protocol Messages
//!
//! Wire format shared with the backend. Inbound lifecycle events and the
//! outbound local snapshot travel as JSON text; the flat snapshot struct
//! also has a binary (bincode) encoding.

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;
use crate::game::input::Direction;

// =============================================================================
// SERVER -> CLIENT EVENTS
// =============================================================================

/// Remote entity lifecycle event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NetworkEvent {
    /// Another participant appeared.
    PlayerJoined(JoinedPayload),

    /// Another participant reported a new position.
    PlayerMoved(MovedPayload),

    /// Another participant left.
    PlayerLeft {
        /// Participant id.
        id: String,
    },
}

/// Payload of `player_joined`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedPayload {
    /// Participant id.
    pub id: String,
    /// World X.
    pub x: f32,
    /// World Y.
    pub y: f32,
    /// Display colour.
    #[serde(default)]
    pub color: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Facing.
    #[serde(default)]
    pub direction: Option<Direction>,
}

/// Payload of `player_moved`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovedPayload {
    /// Participant id.
    pub id: String,
    /// New target X.
    pub x: f32,
    /// New target Y.
    pub y: f32,
    /// New facing, if changed.
    #[serde(default)]
    pub direction: Option<Direction>,
    /// New colour, if changed.
    #[serde(default)]
    pub color: Option<String>,
    /// New name, if changed.
    #[serde(default)]
    pub name: Option<String>,
}

impl JoinedPayload {
    /// Position as a vector.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl MovedPayload {
    /// Position as a vector.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl NetworkEvent {
    /// Id the event refers to.
    pub fn id(&self) -> &str {
        match self {
            NetworkEvent::PlayerJoined(p) => &p.id,
            NetworkEvent::PlayerMoved(p) => &p.id,
            NetworkEvent::PlayerLeft { id } => id,
        }
    }

    /// Short event name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            NetworkEvent::PlayerJoined(_) => "joined",
            NetworkEvent::PlayerMoved(_) => "moved",
            NetworkEvent::PlayerLeft { .. } => "left",
        }
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

// =============================================================================
// CLIENT -> SERVER MESSAGES
// =============================================================================

/// Snapshot of the local actor for transmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalSnapshot {
    /// Local actor id.
    pub id: String,
    /// World X.
    pub x: f32,
    /// World Y.
    pub y: f32,
    /// Facing.
    pub direction: Direction,
    /// Display colour.
    pub color: String,
    /// Display name.
    pub name: String,
}

impl LocalSnapshot {
    /// Serialize to binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserialize from binary.
    pub fn from_bytes(data: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(data)
    }
}

/// Messages sent from the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Periodic local actor state.
    PlayerUpdate(LocalSnapshot),
}

impl OutboundMessage {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_from_backend_json() {
        let json = r##"{"type":"player_joined","id":"test_1","x":64,"y":96,"color":"#2ecc71","name":"Alice","direction":"down"}"##;
        let event = NetworkEvent::from_json(json).unwrap();

        let NetworkEvent::PlayerJoined(payload) = event else {
            panic!("Wrong event type");
        };
        assert_eq!(payload.id, "test_1");
        assert_eq!(payload.position(), Vec2::new(64.0, 96.0));
        assert_eq!(payload.name.as_deref(), Some("Alice"));
        assert_eq!(payload.direction, Some(Direction::Down));
    }

    #[test]
    fn test_moved_without_direction() {
        let event = NetworkEvent::from_json(r#"{"type":"player_moved","id":"p1","x":1.5,"y":2}"#).unwrap();
        assert_eq!(event.kind(), "moved");
        assert_eq!(event.id(), "p1");
        let NetworkEvent::PlayerMoved(payload) = event else {
            panic!("Wrong event type");
        };
        assert_eq!(payload.direction, None);
    }

    #[test]
    fn test_left_event() {
        let event = NetworkEvent::from_json(r#"{"type":"player_left","id":"p1"}"#).unwrap();
        assert_eq!(event, NetworkEvent::PlayerLeft { id: "p1".to_string() });
        assert!(event.to_json().unwrap().contains("player_left"));
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(NetworkEvent::from_json(r#"{"type":"player_teleported","id":"p1"}"#).is_err());
    }

    #[test]
    fn test_outbound_snapshot_json_shape() {
        let msg = OutboundMessage::PlayerUpdate(LocalSnapshot {
            id: "me".to_string(),
            x: 10.0,
            y: 20.0,
            direction: Direction::Left,
            color: "#3498db".to_string(),
            name: "Player".to_string(),
        });

        let json = msg.to_json().unwrap();
        assert!(json.contains("\"type\":\"player_update\""));
        assert!(json.contains("\"direction\":\"left\""));
        assert_eq!(OutboundMessage::from_json(&json).unwrap(), msg);
    }

    #[test]
    fn test_binary_snapshot() {
        // Tagged enums don't survive bincode; the flat snapshot does
        let snapshot = LocalSnapshot {
            id: "me".to_string(),
            x: -3.25,
            y: 6.5,
            direction: Direction::Up,
            color: "red".to_string(),
            name: "n".to_string(),
        };
        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(LocalSnapshot::from_bytes(&bytes).unwrap(), snapshot);
    }
}
