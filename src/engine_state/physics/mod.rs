//! # Physics
//!
//! The per-tick update phases, run strictly in this order by
//! [`EngineState::tick`](super::EngineState::tick):
//!
//! 1. [`update_player`]: gravity and swept collision for the player, then the
//!    camera follows.
//! 2. [`update_blocks`]: pickups, gravity stacking and pushing for every
//!    block near the viewport.
//! 3. [`update_creatures`]: wander behaviour, swept collision with hopping,
//!    and edge turning for every live creature.
//!
//! Each phase only marks entities as destroyed or killed; nothing is removed
//! from the world while it is being scanned.

use log::{debug, info};

use super::blocks::block_type::BlockType;
use super::config::EngineConfig;
use super::world::World;
use collision::{resolve_body, CollisionOutcome, ResolveParams};
use stacking::{push_block, settle_block, StackingParams};

pub mod collision;
pub mod stacking;

/// Resolves the player's motion for this tick and moves the camera.
pub fn update_player(world: &mut World, config: &EngineConfig) -> CollisionOutcome {
    let params = ResolveParams {
        gravity: config.physics.gravity,
        world_height: config.world_height,
        respawn_margin: config.physics.respawn_margin,
        spawn: config.physics.player_spawn,
        hop_strength: None,
    };

    let outcome = resolve_body(&mut world.player.body, &world.blocks, &params);

    if outcome.respawned {
        info!("Player fell out of the world; respawning");
        world.scroll.reset();
    } else {
        world.scroll.follow(
            &world.player.body.aabb,
            world.player.body.velocity.x,
            (config.viewport_width, config.viewport_height),
        );
    }

    outcome
}

/// Updates every live block inside the horizontal span of the viewport.
///
/// Blocks scrolled fully out of view are frozen until they come back.
///
/// # Returns
/// The number of blocks collected by the player this tick.
pub fn update_blocks(world: &mut World, config: &EngineConfig) -> usize {
    let params = StackingParams {
        gravity: config.physics.gravity,
        tolerance: config.physics.stacking_tolerance,
        world_height: config.world_height,
    };
    let mut collected = 0;

    for index in 0..world.blocks.len() {
        let block = &world.blocks[index];
        if block.destroyed
            || !world
                .scroll
                .is_horizontally_visible(&block.aabb, config.viewport_width)
        {
            continue;
        }

        if collect_pickup(world, index) {
            collected += 1;
            continue;
        }

        let player = world.player.body.aabb;
        settle_block(&mut world.blocks, index, &player, &params);
        push_block(
            &mut world.blocks,
            index,
            &player,
            world.player.walk_velocity,
            config.physics.push_friction,
        );
    }

    collected
}

/// Collects the block at `index` if it is a collectible touching the player.
fn collect_pickup(world: &mut World, index: usize) -> bool {
    let block = &mut world.blocks[index];
    if !block.block_type.is_interactable() || !block.aabb.overlaps(&world.player.body.aabb) {
        return false;
    }

    block.destroy();
    match block.block_type {
        BlockType::Coin => world.player.score += 1,
        BlockType::Gem => world.player.gems += 1,
        _ => {}
    }
    debug!("Collected {}", block.block_type);
    true
}

/// Advances every live creature by one tick.
pub fn update_creatures(world: &mut World, config: &EngineConfig, rng: &mut fastrand::Rng) {
    let creature_config = &config.creatures;
    let params = ResolveParams {
        gravity: config.physics.gravity,
        world_height: config.world_height,
        respawn_margin: config.physics.respawn_margin,
        spawn: creature_config.spawn,
        hop_strength: Some(config.physics.jump_strength),
    };
    let world_width = config.world_width();

    for creature in world.creatures.iter_mut().filter(|c| !c.killed) {
        creature.step_behavior(rng, creature_config);
        resolve_body(&mut creature.body, &world.blocks, &params);
        creature.turn_at_edges(world_width, creature_config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::blocks::Block;
    use crate::engine_state::entities::player::Player;

    fn world_with(blocks: Vec<Block>) -> (World, EngineConfig) {
        let config = EngineConfig::default();
        let world = World::new(blocks, Vec::new(), Player::new(&config));
        (world, config)
    }

    #[test]
    fn coins_and_gems_are_collected_once() {
        let (mut world, config) = world_with(Vec::new());
        let (px, py) = (world.player.body.aabb.x, world.player.body.aabb.y);
        world.blocks.push(Block::new(BlockType::Coin, px, py, 32.0));
        world.blocks.push(Block::new(BlockType::Gem, px, py + 32.0, 32.0));

        assert_eq!(update_blocks(&mut world, &config), 2);
        assert_eq!(world.player.score, 1);
        assert_eq!(world.player.gems, 1);
        assert!(world.blocks.iter().all(|b| b.destroyed));

        assert_eq!(update_blocks(&mut world, &config), 0);
        assert_eq!(world.player.score, 1);
    }

    #[test]
    fn offscreen_blocks_are_frozen() {
        let (mut world, config) = world_with(vec![Block::new(BlockType::Sand, 5000.0, 0.0, 32.0)]);
        update_blocks(&mut world, &config);
        assert_eq!(world.blocks[0].aabb.y, 0.0);
    }

    #[test]
    fn visible_sand_falls() {
        let (mut world, config) = world_with(vec![Block::new(BlockType::Sand, 640.0, 0.0, 32.0)]);
        update_blocks(&mut world, &config);
        assert!(world.blocks[0].aabb.y > 0.0);
    }

    #[test]
    fn player_respawn_resets_camera() {
        let (mut world, config) = world_with(Vec::new());
        world.scroll.offset.x = 300.0;
        world.player.body.aabb.y = config.world_height + 100.0;
        let outcome = update_player(&mut world, &config);
        assert!(outcome.respawned);
        assert_eq!(world.scroll.horizontal(), 0.0);
    }
}
