//! Gateway Teleports
//!
//! `Idle -> Triggered -> Suspended -> Idle`. While a teleport is pending, no
//! movement input is processed and no gateway is checked. When the delay
//! elapses the world is re-anchored once so the actor stands on the paired
//! gateway, unless the world was torn down in the meantime.

use serde::{Serialize, Deserialize};
use tracing::{debug, info, warn};

use crate::core::vec2::Vec2;
use crate::game::collision::overlapping;
use crate::game::gateway::Gateway;
use crate::game::state::{LocalActor, WorldState};

/// Fixed visual handoff between leaving one gateway and arriving at its pair.
pub const TELEPORT_DELAY_MS: u64 = 500;

/// Teleport lifecycle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeleportPhase {
    /// Accepting input, checking gateways
    #[default]
    Idle,
    /// Gateway matched, transition recorded
    Triggered,
    /// Waiting for the re-anchor to fire
    Suspended,
}

/// Record of an in-flight teleport.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeleportTransition {
    /// Session time at trigger
    pub started_at_ms: u64,
    /// Gateway entered
    pub source_id: u32,
    /// Gateway to land on
    pub destination_id: u32,
    /// Entered gateway centre at trigger
    pub source_center: Vec2,
    /// Paired gateway centre at trigger
    pub destination_center: Vec2,
}

/// Deferred re-anchor with its liveness guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledReanchor {
    /// Earliest session time it may fire
    pub fire_at_ms: u64,
    /// World generation it was scheduled against
    pub generation: u64,
}

/// What a check or poll did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TeleportOutcome {
    /// Nothing happened
    None,
    /// A teleport began; input is now suspended
    Started(TeleportTransition),
    /// The re-anchor fired with this offset
    Completed {
        /// The finished transition
        transition: TeleportTransition,
        /// Offset applied to the world
        offset: Vec2,
    },
    /// The re-anchor was dropped because the world went away
    Discarded(TeleportTransition),
    /// An approach matched but the paired gateway is not on the map
    PairMissing {
        /// Gateway entered
        gateway_id: u32,
        /// Pair that could not be found
        destination_id: u32,
    },
}

/// Per-session teleport state machine.
#[derive(Clone, Debug, Default)]
pub struct TeleportStateMachine {
    phase: TeleportPhase,
    transition: Option<TeleportTransition>,
    scheduled: Option<ScheduledReanchor>,
    /// Missing pair already reported for the current overlap
    reported_missing: Option<(u32, u32)>,
}

impl TeleportStateMachine {
    /// Create in `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> TeleportPhase {
        self.phase
    }

    /// True while movement input must be ignored.
    pub fn is_suspended(&self) -> bool {
        self.phase != TeleportPhase::Idle
    }

    /// In-flight transition, if any.
    pub fn transition(&self) -> Option<&TeleportTransition> {
        self.transition.as_ref()
    }

    /// Pending re-anchor, if any.
    pub fn scheduled(&self) -> Option<&ScheduledReanchor> {
        self.scheduled.as_ref()
    }

    /// Test the actor against every gateway. Only runs in `Idle`.
    ///
    /// A gateway triggers when it overlaps the actor and the actor's facing
    /// matches the gateway's approach. Overlaps from other directions are
    /// walked through without effect. A gateway whose pair is absent is
    /// reported once per entry; staying on it stays quiet until the actor
    /// leaves or approaches another unpaired gateway.
    pub fn check(&mut self, world: &WorldState, actor: &LocalActor, now_ms: u64) -> TeleportOutcome {
        if self.phase != TeleportPhase::Idle || !world.is_live() {
            return TeleportOutcome::None;
        }

        let gateways = world.gateway_list();
        let mut missing = None;

        for index in overlapping(&actor.rect, gateways, |g: &Gateway| &g.rect) {
            let source = gateways[index];
            let Some(destination_id) = world.gateways.destination_for(source.id, actor.facing) else {
                continue;
            };

            let Some(destination) = world.gateways.find(destination_id) else {
                missing = Some((source.id, destination_id));
                continue;
            };

            let transition = TeleportTransition {
                started_at_ms: now_ms,
                source_id: source.id,
                destination_id,
                source_center: source.center(),
                destination_center: destination.center(),
            };
            self.reported_missing = None;
            self.trigger(transition);
            self.suspend(now_ms, world.generation());
            return TeleportOutcome::Started(transition);
        }

        let Some((gateway_id, destination_id)) = missing else {
            self.reported_missing = None;
            return TeleportOutcome::None;
        };
        if self.reported_missing == missing {
            debug!("Gateway {} still unpaired", gateway_id);
            return TeleportOutcome::None;
        }

        warn!("Gateway {} routes to {} which is not on the map", gateway_id, destination_id);
        self.reported_missing = missing;
        TeleportOutcome::PairMissing { gateway_id, destination_id }
    }

    /// Fire the re-anchor once its time has come.
    pub fn poll(&mut self, world: &mut WorldState, actor: &LocalActor, now_ms: u64) -> TeleportOutcome {
        let Some(scheduled) = self.scheduled else {
            return TeleportOutcome::None;
        };
        if now_ms < scheduled.fire_at_ms {
            return TeleportOutcome::None;
        }

        self.scheduled = None;
        self.phase = TeleportPhase::Idle;
        let Some(transition) = self.transition.take() else {
            return TeleportOutcome::None;
        };

        if !world.is_live() || world.generation() != scheduled.generation {
            warn!("Discarding re-anchor for gateway {}: world torn down", transition.source_id);
            return TeleportOutcome::Discarded(transition);
        }

        // Use the pair's current position; the world may not be where it was at trigger
        let Some(destination) = world.gateways.find(transition.destination_id) else {
            warn!("Gateway {} vanished before re-anchor", transition.destination_id);
            return TeleportOutcome::Discarded(transition);
        };

        let offset = actor.center() - destination.center();
        world.apply_offset(offset);

        info!(
            "Teleport {} -> {} complete, world re-anchored by {}",
            transition.source_id, transition.destination_id, offset
        );

        TeleportOutcome::Completed { transition, offset }
    }

    /// Drop any pending re-anchor and return to `Idle`.
    pub fn cancel_pending(&mut self) -> Option<TeleportTransition> {
        self.scheduled = None;
        self.phase = TeleportPhase::Idle;
        self.transition.take()
    }

    fn trigger(&mut self, transition: TeleportTransition) {
        debug!("Teleport triggered at gateway {}", transition.source_id);
        self.phase = TeleportPhase::Triggered;
        self.transition = Some(transition);
    }

    fn suspend(&mut self, now_ms: u64, generation: u64) {
        self.scheduled = Some(ScheduledReanchor {
            fire_at_ms: now_ms + TELEPORT_DELAY_MS,
            generation,
        });
        self.phase = TeleportPhase::Suspended;
        if let Some(transition) = &self.transition {
            info!(
                "Teleport {} -> {} started, input suspended for {} ms",
                transition.source_id, transition.destination_id, TELEPORT_DELAY_MS
            );
        }
    }
}
