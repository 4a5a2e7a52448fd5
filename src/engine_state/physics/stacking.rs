//! # Block Gravity and Pushing
//!
//! Non-rigid blocks fall until they come to rest on another block, on the
//! player, or on the world floor. This is softer than the body resolver: a
//! block lands on anything it would overlap next tick as long as its bottom is
//! no more than `stacking_tolerance` below the other block's top.
//!
//! Movable blocks additionally take on the player's walking velocity when the
//! player walks into them, then slow down by a constant friction factor.

use std::cmp::Ordering;

use crate::engine_state::blocks::Block;
use crate::engine_state::geometry::Aabb;

/// Distance at which a player counts as touching a block it pushes.
pub const PUSH_REACH: f32 = 1.0;

#[derive(Copy, Clone, Debug)]
pub struct StackingParams {
    pub gravity: f32,
    pub tolerance: f32,
    pub world_height: f32,
}

/// Applies one tick of gravity to the block at `index`.
///
/// Rigid and destroyed blocks are left alone. Collidable blocks also rest on
/// the `player` box so they never fall into it.
///
/// # Returns
/// `true` if the block is resting (landed on something or the floor).
pub fn settle_block(
    blocks: &mut [Block],
    index: usize,
    player: &Aabb,
    params: &StackingParams,
) -> bool {
    let block = &blocks[index];
    if block.rigid || block.destroyed {
        return false;
    }

    let aabb = block.aabb;
    let velocity_y = block.velocity.y + params.gravity;
    let next_y = aabb.y + velocity_y;
    let future = aabb.at(aabb.x, next_y);

    let lands_on = |other: &Aabb| {
        future.overlaps(other) && velocity_y >= 0.0 && aabb.bottom() <= other.top() + params.tolerance
    };

    let mut support = blocks
        .iter()
        .enumerate()
        .filter(|(other_index, other)| *other_index != index && !other.destroyed)
        .map(|(_, other)| other.aabb)
        .filter(|other| lands_on(other))
        .map(|other| other.top())
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    if block.collidable && lands_on(player) {
        support = Some(support.map_or(player.top(), |top| top.min(player.top())));
    }

    let block = &mut blocks[index];
    if let Some(top) = support {
        block.aabb.y = top - aabb.height;
        block.velocity.y = 0.0;
        true
    } else if aabb.bottom() + velocity_y > params.world_height {
        block.aabb.y = params.world_height - aabb.height;
        block.velocity.y = 0.0;
        true
    } else {
        block.aabb.y = next_y;
        block.velocity.y = velocity_y;
        false
    }
}

/// Applies one tick of horizontal push and friction to the block at `index`.
///
/// The block first moves by its current horizontal velocity (unless that
/// would drive it into a collidable block or the player), then the velocity
/// decays by `friction`. A movable block the player is walking into then
/// takes on the player's walking velocity for the next tick.
pub fn push_block(
    blocks: &mut [Block],
    index: usize,
    player: &Aabb,
    walk_velocity: f32,
    friction: f32,
) {
    let block = &blocks[index];
    if block.destroyed {
        return;
    }

    let aabb = block.aabb;
    let velocity_x = block.velocity.x;
    let mut moved_x = None;

    if velocity_x != 0.0 {
        let target = aabb.at(aabb.x + velocity_x, aabb.y);
        let obstructed = (block.collidable && target.overlaps(player))
            || blocks
                .iter()
                .enumerate()
                .any(|(other_index, other)| {
                    other_index != index && other.is_solid() && target.overlaps(&other.aabb)
                });
        moved_x = Some(if obstructed { aabb.x } else { target.x });
    }

    let movable = block.movable;
    let block = &mut blocks[index];
    match moved_x {
        Some(x) if x == aabb.x => block.velocity.x = 0.0,
        Some(x) => {
            block.aabb.x = x;
            block.velocity.x *= friction;
        }
        None => {}
    }

    if movable && is_pushing(player, walk_velocity, &block.aabb) {
        block.velocity.x = walk_velocity;
    }
}

/// Whether a player box walking at `walk_velocity` is pressing into `block`.
pub fn is_pushing(player: &Aabb, walk_velocity: f32, block: &Aabb) -> bool {
    if !player.overlaps_vertically(block) {
        return false;
    }
    if walk_velocity > 0.0 {
        (block.left() - player.right()).abs() <= PUSH_REACH
    } else if walk_velocity < 0.0 {
        (player.left() - block.right()).abs() <= PUSH_REACH
    } else {
        false
    }
}
