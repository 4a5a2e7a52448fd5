//! # Body vs. Block Collision
//!
//! Per-axis swept resolution of a [`PhysicsBody`] against the block list,
//! x before y. Each axis looks for the blocks the tentative move would
//! penetrate from outside and stops at the nearest one; if several are
//! equally near, the earliest in the list wins.
//!
//! Only blocks that are collidable and not destroyed take part.

use std::cmp::Ordering;

use crate::engine_state::blocks::Block;
use crate::engine_state::entities::body::PhysicsBody;

/// Parameters of one resolution pass.
#[derive(Copy, Clone, Debug)]
pub struct ResolveParams {
    /// Added to vertical velocity before moving
    pub gravity: f32,
    /// Lower bound of the world
    pub world_height: f32,
    /// Distance below `world_height` that triggers a respawn
    pub respawn_margin: f32,
    /// Respawn coordinate
    pub spawn: [f32; 2],
    /// Upward impulse applied when blocked horizontally, for bodies that hop
    pub hop_strength: Option<f32>,
}

/// What happened to a body during one resolution pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Horizontal motion was stopped by a block
    pub blocked_x: bool,
    /// The body hopped because it was blocked
    pub hopped: bool,
    /// The body landed on a block
    pub grounded: bool,
    /// The body struck a block from below
    pub hit_ceiling: bool,
    /// The body fell out of the world and was reset to the spawn point
    pub respawned: bool,
}

/// Result of the vertical axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VerticalContact {
    Landed,
    Ceiling,
    Free,
}

/// Applies gravity and resolves both axes for one tick.
pub fn resolve_body(
    body: &mut PhysicsBody,
    blocks: &[Block],
    params: &ResolveParams,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    body.velocity.y += params.gravity;

    outcome.blocked_x = resolve_horizontal(body, blocks);
    if outcome.blocked_x {
        if let Some(strength) = params.hop_strength {
            outcome.hopped = body.try_jump(strength);
        }
    }

    match resolve_vertical(body, blocks) {
        VerticalContact::Landed => outcome.grounded = true,
        VerticalContact::Ceiling => outcome.hit_ceiling = true,
        VerticalContact::Free => {
            if body.aabb.y > params.world_height + params.respawn_margin {
                body.respawn(params.spawn);
                outcome.respawned = true;
            }
        }
    }

    outcome
}

/// Moves the body along x, stopping flush against the nearest obstacle.
///
/// A block qualifies if it overlaps the body's current vertical span, the
/// body is currently clear of it on the side of travel, and the tentative
/// position would cross its near edge.
///
/// # Returns
/// `true` if the body was stopped; its horizontal velocity is then zero.
pub fn resolve_horizontal(body: &mut PhysicsBody, blocks: &[Block]) -> bool {
    let velocity_x = body.velocity.x;
    if velocity_x == 0.0 {
        return false;
    }

    let aabb = body.aabb;
    let next_x = aabb.x + velocity_x;

    // (distance to travel, resolved x)
    let stop = blocks
        .iter()
        .filter(|block| block.is_solid() && aabb.overlaps_vertically(&block.aabb))
        .filter_map(|block| {
            let other = &block.aabb;
            if velocity_x > 0.0 && aabb.right() <= other.left() && next_x + aabb.width > other.left()
            {
                Some((other.left() - aabb.right(), other.left() - aabb.width))
            } else if velocity_x < 0.0 && aabb.left() >= other.right() && next_x < other.right() {
                Some((aabb.left() - other.right(), other.right()))
            } else {
                None
            }
        })
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    match stop {
        Some((_, resolved_x)) => {
            body.aabb.x = resolved_x;
            body.velocity.x = 0.0;
            true
        }
        None => {
            body.aabb.x = next_x;
            false
        }
    }
}

/// Moves the body along y using its (possibly already adjusted) x position.
///
/// Falling bodies land on the nearest block top they would cross and are
/// grounded; rising bodies stop under the nearest block bottom they would
/// cross.
pub fn resolve_vertical(body: &mut PhysicsBody, blocks: &[Block]) -> VerticalContact {
    let velocity_y = body.velocity.y;
    let aabb = body.aabb;
    let next_y = aabb.y + velocity_y;
    let falling = velocity_y >= 0.0;

    let candidates = blocks
        .iter()
        .filter(|block| block.is_solid() && aabb.overlaps_horizontally(&block.aabb));

    let nearest = |a: &(f32, f32), b: &(f32, f32)| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal);

    if falling {
        let landing = candidates
            .filter_map(|block| {
                let top = block.aabb.top();
                (aabb.bottom() <= top && next_y + aabb.height > top)
                    .then(|| (top - aabb.bottom(), top))
            })
            .min_by(nearest);

        if let Some((_, top)) = landing {
            body.aabb.y = top - aabb.height;
            body.ground();
            return VerticalContact::Landed;
        }
    } else {
        let ceiling = candidates
            .filter_map(|block| {
                let bottom = block.aabb.bottom();
                (aabb.top() >= bottom && next_y < bottom).then(|| (aabb.top() - bottom, bottom))
            })
            .min_by(nearest);

        if let Some((_, bottom)) = ceiling {
            body.aabb.y = bottom;
            body.velocity.y = 0.0;
            return VerticalContact::Ceiling;
        }
    }

    body.aabb.y = next_y;
    VerticalContact::Free
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::blocks::block_type::BlockType;
    use crate::engine_state::geometry::Aabb;
    use approx::assert_relative_eq;

    const TILE: f32 = 32.0;

    fn params() -> ResolveParams {
        ResolveParams {
            gravity: 0.5,
            world_height: 720.0,
            respawn_margin: 10.0,
            spawn: [100.0, 100.0],
            hop_strength: None,
        }
    }

    fn body_at(x: f32, y: f32, w: f32, h: f32) -> PhysicsBody {
        PhysicsBody::new(Aabb::new(x, y, w, h), 1)
    }

    fn stone(x: f32, y: f32) -> Block {
        Block::new(BlockType::Stone, x, y, TILE)
    }

    fn block_at(x: f32, y: f32) -> Block {
        Block::with_geometry(
            BlockType::Stone,
            Aabb::new(x, y, TILE, TILE),
            BlockType::Stone.default_color(),
        )
    }

    #[test]
    fn moving_right_stops_flush_against_block() {
        // right edge at 100, block left edge at 103, tentative right edge 105
        let mut body = body_at(60.0, 0.0, 40.0, 40.0);
        body.velocity.x = 5.0;
        let blocks = vec![block_at(103.0, 10.0)];

        assert!(resolve_horizontal(&mut body, &blocks));
        assert_relative_eq!(body.aabb.right(), 103.0);
        assert_eq!(body.velocity.x, 0.0);
    }

    #[test]
    fn moving_left_stops_flush_against_block() {
        let mut body = body_at(70.0, 0.0, 20.0, 20.0);
        body.velocity.x = -8.0;
        let blocks = vec![stone(32.0, 0.0)];

        assert!(resolve_horizontal(&mut body, &blocks));
        assert_eq!(body.aabb.x, 64.0);
    }

    #[test]
    fn nearest_obstacle_wins_regardless_of_order() {
        let mut body = body_at(0.0, 0.0, 20.0, 20.0);
        body.velocity.x = 40.0;
        let blocks = vec![block_at(50.0, 0.0), block_at(25.0, 0.0)];

        assert!(resolve_horizontal(&mut body, &blocks));
        assert_eq!(body.aabb.right(), 25.0);
    }

    #[test]
    fn passable_and_destroyed_blocks_are_ignored() {
        let mut body = body_at(0.0, 0.0, 20.0, 20.0);
        body.velocity.x = 20.0;
        let mut destroyed = block_at(25.0, 0.0);
        destroyed.destroy();
        let leaf = Block::new(BlockType::Leaf, 32.0, 0.0, TILE);
        let blocks = vec![destroyed, leaf];

        assert!(!resolve_horizontal(&mut body, &blocks));
        assert_eq!(body.aabb.x, 20.0);
    }

    #[test]
    fn blocks_outside_vertical_span_do_not_stop() {
        let mut body = body_at(0.0, 0.0, 20.0, 20.0);
        body.velocity.x = 20.0;
        let blocks = vec![block_at(25.0, 20.0)];

        assert!(!resolve_horizontal(&mut body, &blocks));
    }

    #[test]
    fn landing_grounds_the_body() {
        let mut body = body_at(32.0, 100.0, 20.0, 28.0);
        body.velocity.y = 6.0;
        body.jump_count = 1;
        let blocks = vec![stone(32.0, 128.0)];

        let outcome = resolve_body(&mut body, &blocks, &params());
        assert!(outcome.grounded);
        assert_eq!(body.aabb.bottom(), 128.0);
        assert_eq!(body.velocity.y, 0.0);
        assert_eq!(body.jump_count, 0);
    }

    #[test]
    fn lands_on_nearest_top() {
        let mut body = body_at(0.0, 0.0, 20.0, 20.0);
        body.velocity.y = 100.0;
        let blocks = vec![block_at(0.0, 90.0), block_at(0.0, 40.0)];

        assert_eq!(resolve_vertical(&mut body, &blocks), VerticalContact::Landed);
        assert_eq!(body.aabb.bottom(), 40.0);
    }

    #[test]
    fn rising_body_stops_under_ceiling() {
        let mut body = body_at(0.0, 50.0, 20.0, 20.0);
        body.velocity.y = -15.0;
        let blocks = vec![block_at(0.0, 10.0)];

        assert_eq!(resolve_vertical(&mut body, &blocks), VerticalContact::Ceiling);
        assert_eq!(body.aabb.top(), 42.0);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn resting_body_stays_grounded() {
        let mut body = body_at(0.0, 12.0, 20.0, 20.0);
        let blocks = vec![stone(0.0, 32.0)];
        for _ in 0..5 {
            let outcome = resolve_body(&mut body, &blocks, &params());
            assert!(outcome.grounded);
            assert_eq!(body.aabb.bottom(), 32.0);
        }
    }

    #[test]
    fn falling_out_of_the_world_respawns() {
        let mut body = body_at(500.0, 730.0, 20.0, 20.0);
        body.velocity.x = 3.0;
        body.jump_count = 1;

        let outcome = resolve_body(&mut body, &[], &params());
        assert!(outcome.respawned);
        assert_eq!((body.aabb.x, body.aabb.y), (100.0, 100.0));
        assert_eq!(body.velocity.x, 0.0);
        assert_eq!(body.velocity.y, 0.0);
        assert_eq!(body.jump_count, 0);
    }

    #[test]
    fn blocked_hopper_jumps() {
        let mut body = body_at(11.0, 12.0, 20.0, 20.0);
        body.velocity.x = 2.0;
        let blocks = vec![stone(0.0, 32.0), stone(32.0, 0.0)];
        let hop = ResolveParams {
            hop_strength: Some(10.0),
            ..params()
        };

        let outcome = resolve_body(&mut body, &blocks, &hop);
        assert!(outcome.blocked_x);
        assert!(outcome.hopped);
        assert_eq!(body.jump_count, 1);
        assert!(body.velocity.y < 0.0);
    }
}
