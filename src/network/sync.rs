//! Remote Entity Sync
//!
//! Applies backend lifecycle events to the local set of remote entities and
//! builds the outbound snapshot of the local actor. Events are applied in
//! arrival order; nothing is queued or reordered.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::core::vec2::Vec2;
use crate::game::interpolation::RemoteEntity;
use crate::game::state::LocalActor;
use crate::network::protocol::{JoinedPayload, LocalSnapshot, MovedPayload, NetworkEvent};

/// Reasons an event was not applied. All are recovered by dropping the event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// `moved` or `left` for an id that is not present.
    #[error("unknown entity reference in {kind} event: {id}")]
    UnknownEntity {
        /// Event kind
        kind: &'static str,
        /// Referenced id
        id: String,
    },

    /// `joined` for an id that already exists.
    #[error("entity already present: {0}")]
    DuplicateEntity(String),
}

/// Effect of an applied event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncChange {
    /// Entity created
    Joined(String),
    /// Target or attributes updated
    Updated(String),
    /// Entity removed
    Left(String),
}

/// Owns every remote entity of the session.
#[derive(Debug, Clone, Default)]
pub struct NetworkSyncAdapter {
    entities: BTreeMap<String, RemoteEntity>,
}

impl NetworkSyncAdapter {
    /// Create an empty adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event.
    pub fn on_event(&mut self, event: NetworkEvent) -> Result<SyncChange, SyncError> {
        match event {
            NetworkEvent::PlayerJoined(payload) => self.joined(payload),
            NetworkEvent::PlayerMoved(payload) => self.moved(payload),
            NetworkEvent::PlayerLeft { id } => self.left(id),
        }
    }

    fn joined(&mut self, payload: JoinedPayload) -> Result<SyncChange, SyncError> {
        if self.entities.contains_key(&payload.id) {
            return Err(SyncError::DuplicateEntity(payload.id));
        }

        let mut entity = RemoteEntity::new(
            payload.id.clone(),
            payload.position(),
            payload.direction.unwrap_or_default(),
        );
        entity.color = payload.color.unwrap_or_default();
        entity.name = payload.name.unwrap_or_default();

        info!("Remote {} joined at {}", payload.id, entity.current);
        self.entities.insert(payload.id.clone(), entity);
        Ok(SyncChange::Joined(payload.id))
    }

    fn moved(&mut self, payload: MovedPayload) -> Result<SyncChange, SyncError> {
        let Some(entity) = self.entities.get_mut(&payload.id) else {
            return Err(SyncError::UnknownEntity { kind: "moved", id: payload.id });
        };

        entity.set_target(payload.position());
        if let Some(direction) = payload.direction {
            entity.facing = direction;
        }
        if let Some(color) = payload.color {
            entity.color = color;
        }
        if let Some(name) = payload.name {
            entity.name = name;
        }
        Ok(SyncChange::Updated(payload.id))
    }

    fn left(&mut self, id: String) -> Result<SyncChange, SyncError> {
        if self.entities.remove(&id).is_none() {
            return Err(SyncError::UnknownEntity { kind: "left", id });
        }
        info!("Remote {} left", id);
        Ok(SyncChange::Left(id))
    }

    /// Advance every entity one tick.
    pub fn advance_all(&mut self) {
        for entity in self.entities.values_mut() {
            entity.advance();
        }
    }

    /// Look up one entity.
    pub fn get(&self, id: &str) -> Option<&RemoteEntity> {
        self.entities.get(id)
    }

    /// Entities in id order.
    pub fn entities(&self) -> impl Iterator<Item = &RemoteEntity> {
        self.entities.values()
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// No remote entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop every entity.
    pub fn clear(&mut self) {
        if !self.entities.is_empty() {
            debug!("Clearing {} remote entities", self.entities.len());
        }
        self.entities.clear();
    }

    /// Snapshot of the local actor in world coordinates.
    pub fn snapshot(actor: &LocalActor, world_offset: Vec2) -> LocalSnapshot {
        let position = actor.world_position(world_offset);
        LocalSnapshot {
            id: actor.id.clone(),
            x: position.x,
            y: position.y,
            direction: actor.facing,
            color: actor.color.clone(),
            name: actor.name.clone(),
        }
    }
}
