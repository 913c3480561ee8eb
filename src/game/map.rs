//! Collision Grid
//!
//! Builds the static obstacle and gateway rectangles from the map's symbol grid.
//! Runs once per session; the result is read-only apart from world scrolling.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::config::{ConfigurationError, EngineConfig};
use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::gateway::Gateway;

/// Classification of one tile symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    /// Impassable
    Blocked,
    /// Free to walk over
    Walkable,
    /// Gateway carrying its symbol as id
    Gateway(u32),
}

impl TileKind {
    /// Pure function of the symbol and the configured codes.
    pub fn classify(symbol: u32, config: &EngineConfig) -> TileKind {
        if symbol == config.blocked_code {
            TileKind::Blocked
        } else if config.is_gateway_code(symbol) {
            TileKind::Gateway(symbol)
        } else {
            TileKind::Walkable
        }
    }
}

/// Obstacles and gateways derived from a symbol grid.
#[derive(Clone, Debug, Default)]
pub struct MapLayout {
    /// Footprints of blocked tiles
    pub obstacles: Vec<Rect>,
    /// Footprints of gateway tiles
    pub gateways: Vec<Gateway>,
    /// Map extent in world units (columns * tile width, rows * tile height)
    pub size: Vec2,
}

impl MapLayout {
    /// Build the layout from row-major symbol rows.
    ///
    /// Every blocked or gateway tile at `(row i, col j)` gets a footprint at
    /// `(j * tile_width + offset.x, i * tile_height + offset.y)`. The footprint
    /// is smaller than the tile, leaving a walkable margin around it.
    pub fn build(rows: &[Vec<u32>], config: &EngineConfig) -> Result<MapLayout, ConfigurationError> {
        if !(config.tile_width > 0.0 && config.tile_height > 0.0) {
            return Err(ConfigurationError::NonPositiveTileSize {
                width: config.tile_width,
                height: config.tile_height,
            });
        }

        let columns = rows.first().map(Vec::len).unwrap_or(0);
        if columns == 0 {
            return Err(ConfigurationError::EmptyMap);
        }

        let mut layout = MapLayout {
            size: Vec2::new(
                columns as f32 * config.tile_width,
                rows.len() as f32 * config.tile_height,
            ),
            ..Default::default()
        };

        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(ConfigurationError::RaggedRow {
                    row: i,
                    expected: columns,
                    found: row.len(),
                });
            }

            for (j, &symbol) in row.iter().enumerate() {
                let kind = TileKind::classify(symbol, config);
                if kind == TileKind::Walkable {
                    continue;
                }

                let rect = Rect::new(
                    j as f32 * config.tile_width + config.origin_offset.x,
                    i as f32 * config.tile_height + config.origin_offset.y,
                    config.footprint.x,
                    config.footprint.y,
                )
                .ok_or(ConfigurationError::NonPositiveFootprint {
                    width: config.footprint.x,
                    height: config.footprint.y,
                })?;

                match kind {
                    TileKind::Blocked => layout.obstacles.push(rect),
                    TileKind::Gateway(id) => layout.gateways.push(Gateway { id, rect }),
                    TileKind::Walkable => {}
                }
            }
        }

        debug!(
            "Map built: {}x{} tiles, {} obstacles, {} gateways",
            columns,
            rows.len(),
            layout.obstacles.len(),
            layout.gateways.len()
        );

        Ok(layout)
    }
}

/// Split a flat symbol stream into rows of `columns` symbols.
pub fn symbol_rows_from_stream(flat: &[u32], columns: usize) -> Result<Vec<Vec<u32>>, ConfigurationError> {
    if columns == 0 {
        return Err(ConfigurationError::ZeroColumns);
    }
    if flat.is_empty() {
        return Err(ConfigurationError::EmptyMap);
    }
    if flat.len() % columns != 0 {
        return Err(ConfigurationError::PartialRow { len: flat.len(), columns });
    }
    Ok(flat.chunks(columns).map(<[u32]>::to_vec).collect())
}
