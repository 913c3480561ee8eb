//! Collision Detection
//!
//! Movement is resolved by asking whether the actor would overlap any obstacle
//! once the world has scrolled by the candidate step. The actor never moves.

use serde::{Serialize, Deserialize};

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::input::Direction;

/// Outcome of one movement request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveResolution {
    /// Whether the step is free
    pub accepted: bool,
    /// Offset to apply to the world (zero when rejected)
    pub offset: Vec2,
}

impl MoveResolution {
    /// Step was blocked.
    pub const BLOCKED: Self = Self { accepted: false, offset: Vec2::ZERO };
}

/// First obstacle the actor would hit after the world scrolls by `offset`.
pub fn first_blocking(actor: &Rect, offset: Vec2, obstacles: &[Rect]) -> Option<usize> {
    obstacles
        .iter()
        .position(|obstacle| actor.overlaps(&obstacle.translated(offset)))
}

/// Resolve one tick of movement in `direction`.
///
/// An actor already overlapping an obstacle is not pushed out; it can only
/// take steps that leave it clear of every obstacle.
pub fn resolve_movement(actor: &Rect, direction: Direction, step: f32, obstacles: &[Rect]) -> MoveResolution {
    let candidate = direction.world_step(step);
    if first_blocking(actor, candidate, obstacles).is_some() {
        MoveResolution::BLOCKED
    } else {
        MoveResolution { accepted: true, offset: candidate }
    }
}

/// Indices of `items` whose rectangle overlaps the actor, in slice order.
pub fn overlapping<'a, T: 'a>(
    actor: &'a Rect,
    items: &'a [T],
    rect_of: impl Fn(&T) -> &Rect + 'a,
) -> impl Iterator<Item = usize> + 'a {
    items
        .iter()
        .enumerate()
        .filter(move |(_, item)| actor.overlaps(rect_of(item)))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const STEP: f32 = 3.25;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h).unwrap()
    }

    #[test]
    fn test_free_step_is_accepted() {
        let actor = rect(100.0, 100.0, 32.0, 32.0);
        let obstacles = vec![rect(10.0, 10.0, 12.0, 12.0)];

        let result = resolve_movement(&actor, Direction::Up, STEP, &obstacles);
        assert!(result.accepted);
        assert_eq!(result.offset, Vec2::new(0.0, STEP));
    }

    #[test]
    fn test_blocked_tile_at_origin_rejects_right_move() {
        // Single blocked tile at (row 0, col 0): footprint (10, 10, 12, 12)
        let obstacles = vec![rect(10.0, 10.0, 12.0, 12.0)];
        let actor = rect(2.0, 12.0, 8.0, 8.0);

        let result = resolve_movement(&actor, Direction::Right, STEP, &obstacles);
        assert!(!result.accepted);
        assert_eq!(result.offset, Vec2::ZERO);
    }

    #[test]
    fn test_step_into_gap_checks_shifted_obstacle() {
        // Obstacle directly above the actor, 2 units of clearance
        let actor = rect(0.0, 20.0, 10.0, 10.0);
        let obstacles = vec![rect(0.0, 0.0, 10.0, 18.0)];

        // Walking up scrolls the obstacle down by 3.25 -> bottom edge at 21.25
        assert!(!resolve_movement(&actor, Direction::Up, STEP, &obstacles).accepted);
        // Walking down moves it away
        assert!(resolve_movement(&actor, Direction::Down, STEP, &obstacles).accepted);
    }

    #[test]
    fn test_resting_overlap_is_not_corrected() {
        // Actor already inside the obstacle: every direction stays blocked, nothing is pushed
        let actor = rect(12.0, 12.0, 4.0, 4.0);
        let obstacles = vec![rect(10.0, 10.0, 12.0, 12.0)];

        for dir in Direction::ALL {
            assert_eq!(resolve_movement(&actor, dir, STEP, &obstacles), MoveResolution::BLOCKED);
        }
    }

    #[test]
    fn test_first_blocking_reports_index() {
        let actor = rect(0.0, 0.0, 10.0, 10.0);
        let obstacles = vec![rect(100.0, 100.0, 5.0, 5.0), rect(11.0, 0.0, 5.0, 5.0)];
        assert_eq!(first_blocking(&actor, Vec2::new(-3.25, 0.0), &obstacles), Some(1));
        assert_eq!(first_blocking(&actor, Vec2::new(3.25, 0.0), &obstacles), None);
    }

    #[test]
    fn test_overlapping_indices() {
        let actor = rect(0.0, 0.0, 10.0, 10.0);
        let items = vec![rect(5.0, 5.0, 2.0, 2.0), rect(50.0, 50.0, 2.0, 2.0), rect(10.0, 10.0, 1.0, 1.0)];
        let hits: Vec<usize> = overlapping(&actor, &items, |r| r).collect();
        assert_eq!(hits, vec![0, 2]);
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn prop_overlapping_step_is_rejected(
            ax in -200.0f32..200.0, ay in -200.0f32..200.0,
            ox in -200.0f32..200.0, oy in -200.0f32..200.0,
            dir in direction(),
        ) {
            let actor = rect(ax, ay, 32.0, 32.0);
            let obstacle = rect(ox, oy, 12.0, 12.0);
            let shifted = obstacle.translated(dir.world_step(STEP));
            let result = resolve_movement(&actor, dir, STEP, &[obstacle]);

            if actor.overlaps(&shifted) {
                prop_assert!(!result.accepted);
                prop_assert_eq!(result.offset, Vec2::ZERO);
            } else {
                prop_assert!(result.accepted);
                prop_assert_eq!(result.offset, dir.world_step(STEP));
            }
        }

        #[test]
        fn prop_no_obstacles_always_full_step(dir in direction(), step in 0.5f32..16.0) {
            let actor = rect(0.0, 0.0, 32.0, 32.0);
            let result = resolve_movement(&actor, dir, step, &[]);
            prop_assert!(result.accepted);
            prop_assert_eq!(result.offset, dir.world_step(step));
        }
    }
}
