//! The player-controlled body.

use crate::application_state::input_state::InputIntent;
use crate::engine_state::config::{EngineConfig, PhysicsConfig};
use crate::engine_state::geometry::Aabb;

use super::body::PhysicsBody;
use super::inventory::Inventory;

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Physical state
    pub body: PhysicsBody,
    /// Coins collected
    pub score: u32,
    /// Gems collected
    pub gems: u32,
    /// Block stock and selected slot
    pub inventory: Inventory,
    /// Horizontal velocity requested by input this tick, before collisions.
    ///
    /// Pushable blocks inherit this rather than the post-collision velocity,
    /// which is zero whenever the player is pressed against them.
    pub walk_velocity: f32,
}

impl Player {
    /// A fresh player at the configured spawn point.
    pub fn new(config: &EngineConfig) -> Self {
        let physics = &config.physics;
        Player {
            body: PhysicsBody::new(
                Aabb::new(
                    physics.player_spawn[0],
                    physics.player_spawn[1],
                    physics.player_width,
                    physics.player_height,
                ),
                physics.max_jumps,
            ),
            score: 0,
            gems: 0,
            inventory: Inventory::starting(physics.starting_dirt),
            walk_velocity: 0.0,
        }
    }

    /// Converts this tick's movement intent into velocity.
    ///
    /// Horizontal velocity is recomputed from scratch every tick; left wins
    /// when both directions are held. A jump is only accepted while the jump
    /// budget allows it.
    pub fn apply_intent(&mut self, intent: &InputIntent, physics: &PhysicsConfig) {
        let speed = if intent.sprint {
            physics.move_speed * physics.sprint_multiplier
        } else {
            physics.move_speed
        };

        let mut velocity_x = 0.0;
        if intent.move_right {
            velocity_x = speed;
        }
        if intent.move_left {
            velocity_x = -speed;
        }
        self.body.velocity.x = velocity_x;
        self.walk_velocity = velocity_x;

        if intent.jump {
            self.body.try_jump(physics.jump_strength);
        }
    }

    pub fn aabb(&self) -> &Aabb {
        &self.body.aabb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> (Player, EngineConfig) {
        let config = EngineConfig::default();
        (Player::new(&config), config)
    }

    #[test]
    fn left_wins_over_right() {
        let (mut player, config) = player();
        let intent = InputIntent {
            move_left: true,
            move_right: true,
            ..InputIntent::default()
        };
        player.apply_intent(&intent, &config.physics);
        assert_eq!(player.body.velocity.x, -config.physics.move_speed);
    }

    #[test]
    fn sprint_scales_speed() {
        let (mut player, config) = player();
        let intent = InputIntent {
            move_right: true,
            sprint: true,
            ..InputIntent::default()
        };
        player.apply_intent(&intent, &config.physics);
        assert_eq!(player.body.velocity.x, config.physics.move_speed * 1.5);
        assert_eq!(player.walk_velocity, player.body.velocity.x);
    }

    #[test]
    fn second_jump_is_refused_in_the_air() {
        let (mut player, config) = player();
        let jump = InputIntent {
            jump: true,
            ..InputIntent::default()
        };
        player.apply_intent(&jump, &config.physics);
        assert_eq!(player.body.jump_count, 1);
        player.body.velocity.y = 3.0;
        player.apply_intent(&jump, &config.physics);
        assert_eq!(player.body.jump_count, 1);
        assert_eq!(player.body.velocity.y, 3.0);
    }

    #[test]
    fn starts_with_dirt_selected() {
        let (player, _) = player();
        assert_eq!(
            player.inventory.selected(),
            crate::engine_state::blocks::block_type::BlockType::Dirt
        );
        assert_eq!(player.inventory.count(player.inventory.selected()), 10);
    }
}
