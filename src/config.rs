//! Engine Configuration
//!
//! Tunables for map construction, movement and networking. Defaults reproduce
//! the office map client; any field can be overridden from JSON.

use std::path::Path;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::gateway::GatewayRoute;

/// Fatal setup errors. A session never starts after one of these.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Tile width or height is zero or negative.
    #[error("tile size must be positive, got {width}x{height}")]
    NonPositiveTileSize { width: f32, height: f32 },

    /// Obstacle/gateway footprint is zero or negative.
    #[error("tile footprint must be positive, got {width}x{height}")]
    NonPositiveFootprint { width: f32, height: f32 },

    /// Movement step is zero or negative.
    #[error("movement step must be positive, got {0}")]
    NonPositiveStep(f32),

    /// Tick rate of zero.
    #[error("tick rate must be at least 1 Hz")]
    ZeroTickRate,

    /// Map has no rows or no symbols.
    #[error("symbol stream is empty")]
    EmptyMap,

    /// Flat stream cannot be split with zero columns.
    #[error("map column count must be positive")]
    ZeroColumns,

    /// Flat stream length is not a multiple of the column count.
    #[error("symbol stream of length {len} does not divide into rows of {columns}")]
    PartialRow { len: usize, columns: usize },

    /// Row length differs from the first row.
    #[error("row {row} has {found} symbols, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    /// The blocked code also appears as a gateway code.
    #[error("symbol {0} is configured as both blocked and gateway")]
    BlockedCodeIsGateway(u32),

    /// A route sends a gateway to itself.
    #[error("gateway route {0} points to itself")]
    SelfRoute(u32),

    /// Local actor rectangle has a non-positive size.
    #[error("local actor rectangle must have positive size")]
    InvalidActorRect,

    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// File that failed
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config JSON is malformed.
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Width of one map tile
    pub tile_width: f32,
    /// Height of one map tile
    pub tile_height: f32,
    /// Size of the collision footprint placed in each blocked/gateway tile
    pub footprint: Vec2,
    /// Offset of the footprint from the tile corner
    pub origin_offset: Vec2,
    /// Symbol that marks a blocked tile
    pub blocked_code: u32,
    /// Symbols per row when the map arrives as a flat stream
    pub map_columns: usize,
    /// World scroll per tick while a direction is held
    pub step: f32,
    /// Simulation rate (Hz)
    pub tick_rate: u32,
    /// Ticks between outbound local snapshots (0 disables)
    pub snapshot_interval_ticks: u32,
    /// Particles per teleport burst
    pub particle_count: usize,
    /// Seed for cosmetic particles
    pub particle_seed: u64,
    /// Directional gateway pairing table
    pub gateway_routes: Vec<GatewayRoute>,
    /// Local actor settings
    pub local_actor: LocalActorConfig,
}

/// Local actor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalActorConfig {
    /// Network id (random UUID when unset)
    pub id: Option<String>,
    /// Display name
    pub name: String,
    /// Display colour
    pub color: String,
    /// Screen-fixed rectangle
    pub rect: Rect,
}

impl Default for LocalActorConfig {
    fn default() -> Self {
        // Near the centre of the 2048x2048 canvas
        Self {
            id: None,
            name: "Player".to_string(),
            color: "#3498db".to_string(),
            rect: Rect { x: 986.0, y: 1208.0, width: 32.0, height: 32.0 },
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tile_width: 32.0,
            tile_height: 32.5,
            footprint: Vec2::new(12.0, 12.0),
            origin_offset: Vec2::new(10.0, 10.0),
            blocked_code: 8193,
            map_columns: 64,
            step: 3.25,
            tick_rate: 60,
            snapshot_interval_ticks: 6, // 10 Hz at 60 Hz ticks
            particle_count: 20,
            particle_seed: 0x7e1e_9047,
            gateway_routes: GatewayRoute::defaults(),
            local_actor: LocalActorConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse overrides from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load overrides from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.tile_width > 0.0 && self.tile_height > 0.0) {
            return Err(ConfigurationError::NonPositiveTileSize {
                width: self.tile_width,
                height: self.tile_height,
            });
        }
        if !(self.footprint.x > 0.0 && self.footprint.y > 0.0) {
            return Err(ConfigurationError::NonPositiveFootprint {
                width: self.footprint.x,
                height: self.footprint.y,
            });
        }
        if !(self.step > 0.0) {
            return Err(ConfigurationError::NonPositiveStep(self.step));
        }
        if self.tick_rate == 0 {
            return Err(ConfigurationError::ZeroTickRate);
        }
        if self.map_columns == 0 {
            return Err(ConfigurationError::ZeroColumns);
        }
        for route in &self.gateway_routes {
            if route.from == self.blocked_code || route.to == self.blocked_code {
                return Err(ConfigurationError::BlockedCodeIsGateway(self.blocked_code));
            }
            if route.from == route.to {
                return Err(ConfigurationError::SelfRoute(route.from));
            }
        }
        let actor = &self.local_actor.rect;
        if !(actor.width > 0.0 && actor.height > 0.0) {
            return Err(ConfigurationError::InvalidActorRect);
        }
        Ok(())
    }

    /// True when `symbol` names a gateway in the routing table.
    pub fn is_gateway_code(&self, symbol: u32) -> bool {
        self.gateway_routes
            .iter()
            .any(|route| route.from == symbol || route.to == symbol)
    }

    /// Milliseconds per simulation tick.
    pub fn tick_duration_ms(&self) -> u64 {
        // Rounded up so 60 Hz gives 17 ms and a 500 ms delay spans 30 ticks
        (1000 + self.tick_rate as u64 - 1) / self.tick_rate as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::input::Direction;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gateway_routes.len(), 4);
        assert!(config.is_gateway_code(44));
        assert!(config.is_gateway_code(77));
        assert!(!config.is_gateway_code(8193));
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = EngineConfig::from_json_str(r#"{ "step": 4.0, "tick_rate": 30 }"#).unwrap();
        assert_eq!(config.step, 4.0);
        assert_eq!(config.tick_rate, 30);
        assert_eq!(config.tile_width, 32.0);
        assert_eq!(config.tick_duration_ms(), 34);
    }

    #[test]
    fn test_rejects_bad_tile_size() {
        let err = EngineConfig::from_json_str(r#"{ "tile_width": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigurationError::NonPositiveTileSize { .. }));
    }

    #[test]
    fn test_rejects_self_route() {
        let mut config = EngineConfig::default();
        config.gateway_routes.push(GatewayRoute { from: 88, approach: Direction::Left, to: 88 });
        assert!(matches!(config.validate(), Err(ConfigurationError::SelfRoute(88))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = EngineConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigurationError::Parse(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = EngineConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
