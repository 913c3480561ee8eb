//! # Tilescroll
//!
//! Tile-based top-down movement engine. The local actor is fixed on screen
//! and the world scrolls underneath it; paired gateways teleport the actor
//! after a short visual handoff; remote participants are smoothed toward
//! their last reported positions.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        TILESCROLL                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Geometry primitives                      │
//! │  ├── vec2.rs      - 2D vector                                │
//! │  ├── rect.rs      - Axis-aligned rectangle + overlap test    │
//! │  └── rng.rs       - Seeded Xorshift128+ for particles        │
//! │                                                              │
//! │  config.rs        - Engine settings and ConfigurationError   │
//! │                                                              │
//! │  game/            - Local simulation                         │
//! │  ├── map.rs       - Symbol grid -> obstacles + gateways      │
//! │  ├── gateway.rs   - Gateway registry and routes              │
//! │  ├── collision.rs - Movement resolution                      │
//! │  ├── teleport.rs  - Gateway transition state machine         │
//! │  ├── interpolation.rs - Remote entity smoothing              │
//! │  ├── effects.rs   - Cosmetic particle bursts                 │
//! │  └── tick.rs      - Per-tick update order                    │
//! │                                                              │
//! │  network/         - Backend ingress/egress                   │
//! │  ├── protocol.rs  - joined / moved / left + snapshots        │
//! │  ├── sync.rs      - Remote entity ownership                  │
//! │  └── client.rs    - WebSocket transport                      │
//! │                                                              │
//! │  session.rs       - Session facade and render view           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use tilescroll::{EngineConfig, Session};
//! use tilescroll::game::{Direction, InputEvent};
//!
//! let mut session = Session::new(EngineConfig::default(), &[vec![0, 0], vec![0, 0]]).unwrap();
//! session.handle_input(InputEvent::press(Direction::Up));
//! let result = session.step();
//! assert_eq!(result.world_offset.y, 3.25);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod config;
pub mod game;
pub mod network;
pub mod session;

// Re-export commonly used types
pub use self::core::{ParticleRng, Rect, Vec2};
pub use config::{ConfigurationError, EngineConfig};
pub use game::{Direction, InputEvent, SessionEvent, TickResult};
pub use network::{LocalSnapshot, NetworkEvent};
pub use session::{RenderView, Session};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
