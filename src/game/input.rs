//! Input Capture and Normalization
//!
//! Turns the `{direction, pressed}` event stream from the keyboard collaborator
//! into a single active direction per tick. Last pressed wins while it is held.

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;

// =============================================================================
// DIRECTION
// =============================================================================

/// One of the four movement directions. Doubles as the actor's facing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards the top of the screen
    Up,
    /// Towards the bottom of the screen
    #[default]
    Down,
    /// Towards the left edge
    Left,
    /// Towards the right edge
    Right,
}

impl Direction {
    /// All directions in a fixed order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Offset applied to the world when the actor walks this way.
    ///
    /// The actor stays put and the world scrolls the opposite way:
    /// walking up pushes the world down the screen (+y).
    #[inline]
    pub fn world_step(self, step: f32) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, step),
            Direction::Down => Vec2::new(0.0, -step),
            Direction::Left => Vec2::new(step, 0.0),
            Direction::Right => Vec2::new(-step, 0.0),
        }
    }

    /// Wire name (`"up"`, `"down"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

// =============================================================================
// INPUT EVENTS
// =============================================================================

/// Discrete key transition from the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Direction key involved
    pub direction: Direction,
    /// true on press, false on release
    pub pressed: bool,
}

impl InputEvent {
    /// Key pressed.
    pub const fn press(direction: Direction) -> Self {
        Self { direction, pressed: true }
    }

    /// Key released.
    pub const fn release(direction: Direction) -> Self {
        Self { direction, pressed: false }
    }
}

/// Held-key tracker.
///
/// Each held direction remembers the sequence number of its latest press, so
/// the active direction is the newest press that has not been released yet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    /// Press sequence per direction (None = released)
    held: [Option<u64>; 4],
    /// Monotonic press counter
    sequence: u64,
}

impl InputState {
    /// Create with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition.
    ///
    /// Presses while `suspended` are dropped. Releases always apply so a key
    /// let go during a teleport does not stay stuck.
    pub fn apply(&mut self, event: InputEvent, suspended: bool) {
        let slot = event.direction.index();
        if event.pressed {
            if suspended {
                return;
            }
            self.sequence += 1;
            self.held[slot] = Some(self.sequence);
        } else {
            self.held[slot] = None;
        }
    }

    /// Direction to evaluate this tick, if any.
    pub fn active_direction(&self) -> Option<Direction> {
        Direction::ALL
            .iter()
            .filter_map(|dir| self.held[dir.index()].map(|seq| (seq, *dir)))
            .max_by_key(|(seq, _)| *seq)
            .map(|(_, dir)| dir)
    }

    /// Release every key.
    pub fn clear(&mut self) {
        self.held = [None; 4];
    }
}
