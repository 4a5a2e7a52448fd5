//! # Entities
//!
//! The moving actors of the world. Both the player and creatures wrap a
//! [`PhysicsBody`](body::PhysicsBody), which is what the collision resolver
//! operates on.

pub mod body;
pub mod creature;
pub mod inventory;
pub mod player;
