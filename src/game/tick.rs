//! Simulation Tick
//!
//! One fixed step of the session. Order matters:
//!
//! 1. resolve held input against the obstacles (skipped while suspended)
//! 2. check gateways
//! 3. fire a due re-anchor; input resumes on the next tick
//! 4. advance remote entities
//! 5. advance cosmetic bursts
//! 6. emit the periodic local snapshot

use crate::config::EngineConfig;
use crate::core::vec2::Vec2;
use crate::game::collision::resolve_movement;
use crate::game::events::SessionEvent;
use crate::game::state::SessionState;
use crate::game::teleport::TeleportOutcome;
use crate::network::protocol::LocalSnapshot;
use crate::network::sync::NetworkSyncAdapter;

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<SessionEvent>,
    /// Local snapshot due for transmission
    pub snapshot: Option<LocalSnapshot>,
    /// Accumulated world offset after the tick
    pub world_offset: Vec2,
}

/// Run one simulation tick.
///
/// The session clock is read, not advanced; callers move `state.now_ms`
/// forward before calling.
pub fn tick(state: &mut SessionState, config: &EngineConfig) -> TickResult {
    let mut result = TickResult::default();
    state.tick += 1;

    // 1. Movement, gated by the teleport suspend flag
    apply_movement(state, config, &mut result);

    // 2. Gateways
    let outcome = state.teleport.check(&state.world, &state.actor, state.now_ms);
    record_teleport(state, outcome, &mut result);

    // 3. Pending re-anchor
    let outcome = state.teleport.poll(&mut state.world, &state.actor, state.now_ms);
    record_teleport(state, outcome, &mut result);

    // 4. Remote entities follow their targets regardless of local state
    state.remotes.advance_all();

    // 5. Cosmetics
    state.effects.step();

    // 6. Outbound snapshot
    let interval = config.snapshot_interval_ticks as u64;
    if interval > 0 && state.tick % interval == 0 {
        result.snapshot = Some(NetworkSyncAdapter::snapshot(&state.actor, state.world.offset));
    }

    result.world_offset = state.world.offset;

    #[cfg(feature = "debug-tracing")]
    tracing::trace!(
        tick = state.tick,
        now_ms = state.now_ms,
        events = result.events.len(),
        "tick offset={}",
        result.world_offset
    );

    result
}

fn apply_movement(state: &mut SessionState, config: &EngineConfig, result: &mut TickResult) {
    state.actor.is_moving = false;

    if state.teleport.is_suspended() {
        return;
    }
    let Some(direction) = state.input.active_direction() else {
        return;
    };

    // Facing follows the attempt, so a blocked push still counts as an approach
    state.actor.facing = direction;

    let resolution = resolve_movement(&state.actor.rect, direction, config.step, &state.world.obstacles);
    if resolution.accepted {
        state.world.apply_offset(resolution.offset);
        state.actor.is_moving = true;
        result.events.push(SessionEvent::Moved { direction, offset: resolution.offset });
    } else {
        result.events.push(SessionEvent::MovementBlocked { direction });
    }
}

fn record_teleport(state: &mut SessionState, outcome: TeleportOutcome, result: &mut TickResult) {
    match outcome {
        TeleportOutcome::None => {}
        TeleportOutcome::Started(transition) => {
            state.effects.burst(state.actor.center());
            result.events.push(SessionEvent::TeleportStarted {
                source_id: transition.source_id,
                destination_id: transition.destination_id,
            });
        }
        TeleportOutcome::Completed { transition, offset } => {
            state.effects.burst(state.actor.center());
            result.events.push(SessionEvent::TeleportCompleted {
                source_id: transition.source_id,
                destination_id: transition.destination_id,
                offset,
            });
        }
        TeleportOutcome::Discarded(transition) => {
            result.events.push(SessionEvent::TeleportDiscarded { source_id: transition.source_id });
        }
        TeleportOutcome::PairMissing { gateway_id, destination_id } => {
            result.events.push(SessionEvent::GatewayPairMissing { gateway_id, destination_id });
        }
    }
}
