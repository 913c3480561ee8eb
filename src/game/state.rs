//! World State
//!
//! The local actor is pinned to the screen. Everything else is world-anchored
//! and scrolls underneath it through [`WorldState::apply_offset`].

use serde::{Serialize, Deserialize};

use crate::config::{ConfigurationError, EngineConfig};
use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::effects::EffectLayer;
use crate::game::gateway::{Gateway, GatewayRegistry};
use crate::game::input::{Direction, InputState};
use crate::game::map::MapLayout;
use crate::game::teleport::TeleportStateMachine;
use crate::network::sync::NetworkSyncAdapter;

// =============================================================================
// LOCAL ACTOR
// =============================================================================

/// The locally controlled actor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalActor {
    /// Network id
    pub id: String,
    /// Display name
    pub name: String,
    /// Display colour
    pub color: String,
    /// Screen-fixed rectangle, never offset
    pub rect: Rect,
    /// Last direction moved or attempted
    pub facing: Direction,
    /// Moved this tick
    pub is_moving: bool,
}

impl LocalActor {
    /// Create from config, minting a UUID when no id is configured.
    pub fn from_config(config: &EngineConfig) -> Self {
        let actor = &config.local_actor;
        Self {
            id: actor
                .id
                .clone()
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            name: actor.name.clone(),
            color: actor.color.clone(),
            rect: actor.rect,
            facing: Direction::default(),
            is_moving: false,
        }
    }

    /// Centre of the actor on screen.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// Actor position in world coordinates, given the accumulated world offset.
    #[inline]
    pub fn world_position(&self, world_offset: Vec2) -> Vec2 {
        self.rect.origin() - world_offset
    }
}

// =============================================================================
// WORLD STATE
// =============================================================================

/// World-anchored entities of a session.
#[derive(Clone, Debug)]
pub struct WorldState {
    /// Top-left of the background image
    pub background: Vec2,
    /// Background extent
    pub background_size: Vec2,
    /// Blocked-tile footprints
    pub obstacles: Vec<Rect>,
    /// Gateways and routes
    pub gateways: GatewayRegistry,
    /// Sum of every offset applied so far
    pub offset: Vec2,
    /// Bumped on teardown; pending work from older generations is stale
    generation: u64,
    /// False once torn down
    live: bool,
}

impl WorldState {
    /// Create from a built map layout.
    pub fn new(layout: MapLayout, config: &EngineConfig) -> Self {
        Self {
            background: Vec2::ZERO,
            background_size: layout.size,
            obstacles: layout.obstacles,
            gateways: GatewayRegistry::new(layout.gateways, config.gateway_routes.clone()),
            offset: Vec2::ZERO,
            generation: 0,
            live: true,
        }
    }

    /// Build the map and the world in one step.
    pub fn from_rows(rows: &[Vec<u32>], config: &EngineConfig) -> Result<Self, ConfigurationError> {
        let layout = MapLayout::build(rows, config)?;
        Ok(Self::new(layout, config))
    }

    /// Translate every world-anchored entity once.
    pub fn apply_offset(&mut self, offset: Vec2) {
        if offset.is_zero() || !self.live {
            return;
        }
        self.background += offset;
        for obstacle in &mut self.obstacles {
            obstacle.translate(offset);
        }
        self.gateways.translate_all(offset);
        self.offset += offset;
    }

    /// Gateway slice in map order.
    pub fn gateway_list(&self) -> &[Gateway] {
        self.gateways.gateways()
    }

    /// Current liveness generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the world still accepts mutation.
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Mark the world as torn down. Later offsets are ignored.
    pub fn teardown(&mut self) {
        self.live = false;
        self.generation += 1;
    }
}

// =============================================================================
// SESSION STATE
// =============================================================================

/// Everything a tick mutates.
#[derive(Clone, Debug)]
pub struct SessionState {
    /// World-anchored entities
    pub world: WorldState,
    /// Screen-fixed local actor
    pub actor: LocalActor,
    /// Held directions
    pub input: InputState,
    /// Gateway transition lifecycle
    pub teleport: TeleportStateMachine,
    /// Remote entities
    pub remotes: NetworkSyncAdapter,
    /// Cosmetic bursts
    pub effects: EffectLayer,
    /// Ticks run so far
    pub tick: u64,
    /// Session clock
    pub now_ms: u64,
}

impl SessionState {
    /// Fresh state over a built world.
    pub fn new(world: WorldState, config: &EngineConfig) -> Self {
        Self {
            world,
            actor: LocalActor::from_config(config),
            input: InputState::new(),
            teleport: TeleportStateMachine::new(),
            remotes: NetworkSyncAdapter::new(),
            effects: EffectLayer::new(config.particle_seed, config.particle_count),
            tick: 0,
            now_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> WorldState {
        let config = EngineConfig::default();
        WorldState::from_rows(&[vec![8193, 44, 0], vec![0, 0, 55]], &config).unwrap()
    }

    #[test]
    fn test_apply_offset_moves_all_world_entities() {
        let mut world = world();
        let obstacle_before = world.obstacles[0];
        let gateway_before = world.gateway_list()[0].rect;

        world.apply_offset(Vec2::new(3.25, -1.0));
        world.apply_offset(Vec2::new(1.0, 1.0));

        assert_eq!(world.background, Vec2::new(4.25, 0.0));
        assert_eq!(world.offset, Vec2::new(4.25, 0.0));
        assert_eq!(world.obstacles[0], obstacle_before.translated(Vec2::new(4.25, 0.0)));
        assert_eq!(world.gateway_list()[0].rect, gateway_before.translated(Vec2::new(4.25, 0.0)));
    }

    #[test]
    fn test_world_position_tracks_scroll() {
        let config = EngineConfig::default();
        let actor = LocalActor::from_config(&config);
        // World scrolled down by 10: actor is 10 units further up the map
        let pos = actor.world_position(Vec2::new(0.0, 10.0));
        assert_eq!(pos, Vec2::new(actor.rect.x, actor.rect.y - 10.0));
    }

    #[test]
    fn test_local_actor_id_from_config_or_uuid() {
        let mut config = EngineConfig::default();
        let generated = LocalActor::from_config(&config);
        assert!(uuid::Uuid::parse_str(&generated.id).is_ok());

        config.local_actor.id = Some("me".to_string());
        assert_eq!(LocalActor::from_config(&config).id, "me");
    }

    #[test]
    fn test_teardown_bumps_generation() {
        let mut world = world();
        assert!(world.is_live());
        let gen = world.generation();
        world.teardown();
        assert!(!world.is_live());
        assert_eq!(world.generation(), gen + 1);

        world.apply_offset(Vec2::new(5.0, 5.0));
        assert_eq!(world.offset, Vec2::ZERO);
    }
}
