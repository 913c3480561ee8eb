//! Game Logic Module
//!
//! Local simulation: map build, movement, teleports and remote smoothing.
//!
//! ## Module Structure
//!
//! - `input`: Direction keys and held-key tracking
//! - `map`: Symbol grid classification and footprint placement
//! - `gateway`: Gateways and their directional routes
//! - `state`: Local actor, scrolling world, session state
//! - `collision`: Movement resolution against obstacles
//! - `teleport`: Gateway transition state machine
//! - `interpolation`: Remote entity smoothing
//! - `effects`: Cosmetic teleport bursts
//! - `tick`: Per-tick update order
//! - `events`: Events emitted by a tick

pub mod input;
pub mod map;
pub mod gateway;
pub mod state;
pub mod collision;
pub mod teleport;
pub mod interpolation;
pub mod effects;
pub mod tick;
pub mod events;

// Re-export key types
pub use input::{Direction, InputEvent, InputState};
pub use map::{MapLayout, TileKind};
pub use gateway::{Gateway, GatewayRegistry, GatewayRoute};
pub use state::{LocalActor, SessionState, WorldState};
pub use collision::{resolve_movement, MoveResolution};
pub use teleport::{TeleportOutcome, TeleportPhase, TeleportStateMachine, TELEPORT_DELAY_MS};
pub use interpolation::RemoteEntity;
pub use tick::{tick, TickResult};
pub use events::SessionEvent;
