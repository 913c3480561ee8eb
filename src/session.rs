//! Session
//!
//! Owns one play session: the built world, the local actor, the teleport
//! machine, remote entities and the session clock. Input and network events
//! are queued into state between ticks; [`Session::step`] advances time.

use tracing::{debug, info};

use crate::config::{ConfigurationError, EngineConfig};
use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::effects::ParticleBurst;
use crate::game::events::SessionEvent;
use crate::game::gateway::Gateway;
use crate::game::input::InputEvent;
use crate::game::interpolation::RemoteEntity;
use crate::game::map::symbol_rows_from_stream;
use crate::game::state::{LocalActor, SessionState, WorldState};
use crate::game::teleport::TeleportPhase;
use crate::game::tick::{tick, TickResult};
use crate::network::protocol::{LocalSnapshot, NetworkEvent};
use crate::network::sync::{NetworkSyncAdapter, SyncChange};

/// A running session.
#[derive(Debug)]
pub struct Session {
    config: EngineConfig,
    state: SessionState,
    closed: bool,
}

impl Session {
    /// Validate `config` and build the world from a 2D symbol grid.
    pub fn new(config: EngineConfig, rows: &[Vec<u32>]) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let world = WorldState::from_rows(rows, &config)?;
        let state = SessionState::new(world, &config);

        info!(
            "Session started for {} ({} obstacles, {} gateways)",
            state.actor.id,
            state.world.obstacles.len(),
            state.world.gateways.len()
        );

        Ok(Self { config, state, closed: false })
    }

    /// Build from a flat symbol stream of `config.map_columns` per row.
    pub fn from_stream(config: EngineConfig, symbols: &[u32]) -> Result<Self, ConfigurationError> {
        let rows = symbol_rows_from_stream(symbols, config.map_columns)?;
        Self::new(config, &rows)
    }

    /// Record a key press or release. Presses are dropped mid-teleport.
    pub fn handle_input(&mut self, event: InputEvent) {
        if self.closed {
            return;
        }
        let suspended = self.state.teleport.is_suspended();
        if suspended && event.pressed {
            debug!("Ignoring {} press during teleport", event.direction.as_str());
        }
        self.state.input.apply(event, suspended);
    }

    /// Apply one backend event to the remote entities.
    ///
    /// Returns `None` for plain target updates.
    pub fn handle_network_event(&mut self, event: NetworkEvent) -> Option<SessionEvent> {
        if self.closed {
            return None;
        }
        let kind = event.kind();
        let id = event.id().to_string();

        match self.state.remotes.on_event(event) {
            Ok(SyncChange::Joined(id)) => Some(SessionEvent::RemoteJoined { id }),
            Ok(SyncChange::Left(id)) => Some(SessionEvent::RemoteLeft { id }),
            Ok(SyncChange::Updated(_)) => None,
            Err(e) => {
                debug!("Dropped {} event: {}", kind, e);
                Some(SessionEvent::RemoteEventDropped {
                    kind: kind.to_string(),
                    id,
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Advance the clock by one tick duration and run a tick.
    pub fn step(&mut self) -> TickResult {
        if self.closed {
            return TickResult {
                world_offset: self.state.world.offset,
                ..TickResult::default()
            };
        }
        self.state.now_ms += self.config.tick_duration_ms();
        tick(&mut self.state, &self.config)
    }

    /// Run `count` ticks, collecting every event and the last snapshot.
    pub fn run_ticks(&mut self, count: usize) -> TickResult {
        let mut combined = TickResult::default();
        for _ in 0..count {
            let result = self.step();
            combined.events.extend(result.events);
            if result.snapshot.is_some() {
                combined.snapshot = result.snapshot;
            }
            combined.world_offset = result.world_offset;
        }
        combined
    }

    /// Current local snapshot, regardless of the periodic schedule.
    pub fn snapshot(&self) -> LocalSnapshot {
        NetworkSyncAdapter::snapshot(&self.state.actor, self.state.world.offset)
    }

    /// Read-only view for presentation.
    pub fn view(&self) -> RenderView<'_> {
        RenderView {
            background: self.state.world.background,
            background_size: self.state.world.background_size,
            world_offset: self.state.world.offset,
            obstacles: &self.state.world.obstacles,
            gateways: self.state.world.gateway_list(),
            actor: &self.state.actor,
            remotes: &self.state.remotes,
            bursts: self.state.effects.bursts(),
            teleport_phase: self.state.teleport.phase(),
        }
    }

    /// Tear the world down and discard any pending re-anchor.
    pub fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.state.world.teardown();
        if let Some(transition) = self.state.teleport.cancel_pending() {
            info!(
                "Discarded pending teleport {} -> {}",
                transition.source_id, transition.destination_id
            );
        }
        self.state.effects.clear();
        self.state.input.clear();
        self.state.remotes.clear();
        self.closed = true;
        info!("Session for {} closed after {} ticks", self.state.actor.id, self.state.tick);
    }

    /// Whether [`Session::shutdown`] has run.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Session configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Full mutable-by-tick state, read-only.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Session clock.
    pub fn now_ms(&self) -> u64 {
        self.state.now_ms
    }
}

/// Borrowed snapshot of everything the presenter draws.
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    /// Background top-left on screen
    pub background: Vec2,
    /// Background extent
    pub background_size: Vec2,
    /// Accumulated world scroll
    pub world_offset: Vec2,
    /// Obstacle footprints on screen
    pub obstacles: &'a [Rect],
    /// Gateways on screen
    pub gateways: &'a [Gateway],
    /// Screen-fixed local actor
    pub actor: &'a LocalActor,
    /// Remote entities in world coordinates
    pub remotes: &'a NetworkSyncAdapter,
    /// Active particle bursts
    pub bursts: &'a [ParticleBurst],
    /// Teleport phase, for the overlay
    pub teleport_phase: TeleportPhase,
}

impl<'a> RenderView<'a> {
    /// Remote entities with their on-screen position.
    pub fn remote_sprites(&self) -> impl Iterator<Item = (&'a RemoteEntity, Vec2)> + 'a {
        let offset = self.world_offset;
        self.remotes.entities().map(move |entity| (entity, entity.current + offset))
    }

    /// Whether a teleport overlay should be shown.
    pub fn is_teleporting(&self) -> bool {
        self.teleport_phase != TeleportPhase::Idle
    }
}
