//! Remote Entity Interpolation
//!
//! Remote entities glide toward the last position the network reported.
//! They ignore local collision and teleport state entirely.

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;
use crate::game::input::Direction;

/// Distance per tick a remote entity covers.
pub const REMOTE_SPEED: f32 = 2.0;

/// Within this distance the entity snaps onto its target.
pub const SNAP_THRESHOLD: f32 = 1.0;

/// Walk-cycle frames gained per moving tick.
const ANIM_RATE: f32 = 0.2;

/// Local proxy of another participant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemoteEntity {
    /// Network id
    pub id: String,
    /// Rendered position
    pub current: Vec2,
    /// Last reported position
    pub target: Vec2,
    /// Facing for sprite selection
    pub facing: Direction,
    /// Still travelling toward target
    pub is_moving: bool,
    /// Display colour
    pub color: String,
    /// Display name
    pub name: String,
    /// Walk-cycle phase, 0 at rest
    pub anim_frame: f32,
}

impl RemoteEntity {
    /// Create at rest on `position`.
    pub fn new(id: impl Into<String>, position: Vec2, facing: Direction) -> Self {
        Self {
            id: id.into(),
            current: position,
            target: position,
            facing,
            is_moving: false,
            color: String::new(),
            name: String::new(),
            anim_frame: 0.0,
        }
    }

    /// Replace the target. Last write wins.
    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Advance one tick toward the target.
    ///
    /// A remaining distance of at most one step lands exactly on the target
    /// instead of taking a full step past it, so `is_moving` turns false on
    /// the same tick `current == target` rather than one tick later.
    /// Idempotent once `current == target`.
    pub fn advance(&mut self) {
        let delta = self.target - self.current;
        let distance = self.current.distance(self.target);

        if distance > SNAP_THRESHOLD && distance > REMOTE_SPEED {
            self.current += delta.scale(REMOTE_SPEED / distance);
        } else {
            // Within one step or inside the snap radius: land exactly
            self.current = self.target;
        }

        self.is_moving = self.current != self.target;
        if self.is_moving {
            self.anim_frame += ANIM_RATE;
        } else {
            self.anim_frame = 0.0;
        }
    }
}
