//! The physical core shared by the player and creatures.

use cgmath::{Vector2, Zero};

use crate::engine_state::geometry::Aabb;

/// A moving box with velocity and a jump budget.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsBody {
    /// Position and extent
    pub aabb: Aabb,
    /// Velocity in world units per tick
    pub velocity: Vector2<f32>,
    /// Jumps used since last touching the ground
    pub jump_count: u32,
    /// Jumps allowed before touching the ground again
    pub max_jumps: u32,
}

impl PhysicsBody {
    pub fn new(aabb: Aabb, max_jumps: u32) -> Self {
        PhysicsBody {
            aabb,
            velocity: Vector2::zero(),
            jump_count: 0,
            max_jumps,
        }
    }

    /// Whether another jump is allowed.
    pub fn can_jump(&self) -> bool {
        self.jump_count < self.max_jumps
    }

    /// Applies an upward impulse if the jump budget allows it.
    ///
    /// # Returns
    /// `true` if the jump happened.
    pub fn try_jump(&mut self, strength: f32) -> bool {
        if !self.can_jump() {
            return false;
        }
        self.velocity.y = -strength;
        self.jump_count += 1;
        true
    }

    /// Clears vertical motion and restores the jump budget.
    pub fn ground(&mut self) {
        self.velocity.y = 0.0;
        self.jump_count = 0;
    }

    /// Teleports the body to `spawn` at rest.
    pub fn respawn(&mut self, spawn: [f32; 2]) {
        self.aabb.x = spawn[0];
        self.aabb.y = spawn[1];
        self.velocity = Vector2::zero();
        self.jump_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_budget_is_capped() {
        let mut body = PhysicsBody::new(Aabb::new(0.0, 0.0, 10.0, 10.0), 1);
        assert!(body.try_jump(5.0));
        assert_eq!(body.velocity.y, -5.0);
        body.velocity.y = 1.0;
        assert!(!body.try_jump(5.0));
        assert_eq!(body.velocity.y, 1.0);
        assert_eq!(body.jump_count, 1);

        body.ground();
        assert_eq!(body.jump_count, 0);
        assert!(body.can_jump());
    }
}
