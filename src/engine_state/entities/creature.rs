//! # Creatures
//!
//! Autonomous sheep. Each one runs a small wander state machine:
//!
//! ```text
//!   Idle --(timer)--> MovingLeft | MovingRight   (uniform)
//!   MovingLeft | MovingRight --(timer)--> Idle
//! ```
//!
//! Every transition draws a fresh random duration. Bumping into a world edge
//! overrides the timer and turns the creature around immediately.

use log::info;

use crate::engine_state::config::CreatureConfig;
use crate::engine_state::geometry::Aabb;

use super::body::PhysicsBody;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MovementState {
    Idle,
    MovingLeft,
    MovingRight,
}

impl MovementState {
    /// Horizontal direction: -1, 0 or 1.
    pub fn direction(self) -> f32 {
        match self {
            MovementState::Idle => 0.0,
            MovementState::MovingLeft => -1.0,
            MovementState::MovingRight => 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Creature {
    /// Physical state
    pub body: PhysicsBody,
    /// Remaining hit points
    pub health: i32,
    /// Soft-deleted; skipped by simulation and persistence
    pub killed: bool,
    /// Current wander state
    pub movement: MovementState,
    /// Ticks left in the current state
    pub countdown: u32,
}

impl Creature {
    /// Creates a creature at `(x, y)` in the neutral state.
    ///
    /// The countdown starts at zero, so the first tick picks a direction.
    pub fn new(x: f32, y: f32, config: &CreatureConfig) -> Self {
        Creature {
            body: PhysicsBody::new(Aabb::new(x, y, config.width, config.height), 1),
            health: config.health,
            killed: false,
            movement: MovementState::Idle,
            countdown: 0,
        }
    }

    pub fn aabb(&self) -> &Aabb {
        &self.body.aabb
    }

    /// Advances the wander state machine by one tick and derives horizontal velocity.
    pub fn step_behavior(&mut self, rng: &mut fastrand::Rng, config: &CreatureConfig) {
        if self.countdown == 0 {
            self.movement = match self.movement {
                MovementState::Idle => {
                    if rng.bool() {
                        MovementState::MovingLeft
                    } else {
                        MovementState::MovingRight
                    }
                }
                MovementState::MovingLeft | MovementState::MovingRight => MovementState::Idle,
            };
            self.countdown = rng.u32(0..config.max_state_ticks);
        }
        self.countdown = self.countdown.saturating_sub(1);

        self.body.velocity.x = self.movement.direction() * config.speed;
    }

    /// Keeps the creature inside `[0, world_width]`, turning it around at an edge.
    ///
    /// # Returns
    /// `true` if an edge was hit this tick.
    pub fn turn_at_edges(&mut self, world_width: f32, config: &CreatureConfig) -> bool {
        let aabb = &mut self.body.aabb;
        let turned_to = if aabb.x < 0.0 {
            aabb.x = 0.0;
            MovementState::MovingRight
        } else if aabb.right() > world_width {
            aabb.x = world_width - aabb.width;
            MovementState::MovingLeft
        } else {
            return false;
        };

        self.body.velocity.x = 0.0;
        self.movement = turned_to;
        self.countdown = config.edge_turn_ticks;
        true
    }

    /// Removes `amount` hit points, killing the creature at zero.
    pub fn damage(&mut self, amount: i32) {
        if self.killed {
            return;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.kill();
        }
    }

    pub fn kill(&mut self) {
        info!(
            "Creature at ({:.0}, {:.0}) killed",
            self.body.aabb.x, self.body.aabb.y
        );
        self.killed = true;
    }
}
