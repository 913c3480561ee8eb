//! Gateway Registry
//!
//! Gateways are tagged tiles that relocate the actor to their paired tile.
//! Pairing is directional: each route names the approach direction that
//! activates it, so gateway 44 only routes to 55 when entered walking up.

use serde::{Serialize, Deserialize};

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::input::Direction;

/// Directional pairing entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayRoute {
    /// Gateway being entered
    pub from: u32,
    /// Direction the actor must be facing
    pub approach: Direction,
    /// Paired gateway the actor lands on
    pub to: u32,
}

impl GatewayRoute {
    /// Default office map routes: two stairwells, up one way, down the other.
    pub fn defaults() -> Vec<GatewayRoute> {
        vec![
            GatewayRoute { from: 44, approach: Direction::Up, to: 55 },
            GatewayRoute { from: 55, approach: Direction::Down, to: 44 },
            GatewayRoute { from: 66, approach: Direction::Up, to: 77 },
            GatewayRoute { from: 77, approach: Direction::Down, to: 66 },
        ]
    }
}

/// A gateway tile placed in the world.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gateway {
    /// Tile symbol that produced this gateway
    pub id: u32,
    /// World-anchored footprint
    pub rect: Rect,
}

impl Gateway {
    /// Centre of the footprint.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

/// Gateways of one map plus their routing table.
#[derive(Clone, Debug, Default)]
pub struct GatewayRegistry {
    gateways: Vec<Gateway>,
    routes: Vec<GatewayRoute>,
}

impl GatewayRegistry {
    /// Create a registry.
    pub fn new(gateways: Vec<Gateway>, routes: Vec<GatewayRoute>) -> Self {
        Self { gateways, routes }
    }

    /// All gateways in map order.
    pub fn gateways(&self) -> &[Gateway] {
        &self.gateways
    }

    /// Paired id for entering `id` while facing `facing`.
    ///
    /// None when no route matches; the gateway is inert for that approach.
    pub fn destination_for(&self, id: u32, facing: Direction) -> Option<u32> {
        self.routes
            .iter()
            .find(|route| route.from == id && route.approach == facing)
            .map(|route| route.to)
    }

    /// First gateway carrying `id`.
    pub fn find(&self, id: u32) -> Option<&Gateway> {
        self.gateways.iter().find(|gateway| gateway.id == id)
    }

    /// Move every gateway by `offset`.
    pub fn translate_all(&mut self, offset: Vec2) {
        for gateway in &mut self.gateways {
            gateway.rect.translate(offset);
        }
    }

    /// Number of gateways.
    pub fn len(&self) -> usize {
        self.gateways.len()
    }

    /// True when the map has no gateways.
    pub fn is_empty(&self) -> bool {
        self.gateways.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(id: u32, x: f32) -> Gateway {
        Gateway { id, rect: Rect::new(x, 0.0, 12.0, 12.0).unwrap() }
    }

    #[test]
    fn test_destination_requires_matching_approach() {
        let registry = GatewayRegistry::new(vec![gateway(44, 0.0), gateway(55, 100.0)], GatewayRoute::defaults());

        assert_eq!(registry.destination_for(44, Direction::Up), Some(55));
        assert_eq!(registry.destination_for(44, Direction::Down), None);
        assert_eq!(registry.destination_for(55, Direction::Down), Some(44));
        assert_eq!(registry.destination_for(55, Direction::Up), None);
        // Unknown code
        assert_eq!(registry.destination_for(12, Direction::Up), None);
    }

    #[test]
    fn test_find_and_translate() {
        let mut registry = GatewayRegistry::new(vec![gateway(44, 0.0), gateway(55, 100.0)], GatewayRoute::defaults());
        registry.translate_all(Vec2::new(5.0, -5.0));

        let found = registry.find(55).unwrap();
        assert_eq!(found.rect.origin(), Vec2::new(105.0, -5.0));
        assert!(registry.find(66).is_none());
    }
}
