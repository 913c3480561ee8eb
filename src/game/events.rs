//! Session Events
//!
//! Events generated during a tick, for presentation and logging.

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;
use crate::game::input::Direction;

/// Something observable that happened this tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The world scrolled under the actor
    Moved {
        /// Direction walked
        direction: Direction,
        /// Offset applied to the world
        offset: Vec2,
    },

    /// A step was refused by an obstacle
    MovementBlocked {
        /// Direction attempted
        direction: Direction,
    },

    /// A gateway matched and input is suspended
    TeleportStarted {
        /// Gateway entered
        source_id: u32,
        /// Gateway to land on
        destination_id: u32,
    },

    /// The world was re-anchored onto the destination gateway
    TeleportCompleted {
        /// Gateway entered
        source_id: u32,
        /// Gateway landed on
        destination_id: u32,
        /// Offset applied to the world
        offset: Vec2,
    },

    /// A pending re-anchor was dropped
    TeleportDiscarded {
        /// Gateway entered
        source_id: u32,
    },

    /// A gateway's pair is absent from the map
    GatewayPairMissing {
        /// Gateway entered
        gateway_id: u32,
        /// Pair that could not be found
        destination_id: u32,
    },

    /// A remote entity appeared
    RemoteJoined {
        /// Remote id
        id: String,
    },

    /// A remote entity went away
    RemoteLeft {
        /// Remote id
        id: String,
    },

    /// A network event was not applied
    RemoteEventDropped {
        /// Event kind
        kind: String,
        /// Referenced id
        id: String,
        /// Why it was dropped
        reason: String,
    },
}

impl SessionEvent {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
