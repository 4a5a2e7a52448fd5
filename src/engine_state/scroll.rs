//! # Scroll Offset
//!
//! The camera over an unbounded horizontal world. Everything in the engine
//! lives in world coordinates; the scroll offset is the world position of the
//! viewport's top-left corner. When the player presses against a viewport
//! edge while still moving outward, the offset absorbs the motion so the
//! player stays pinned to that edge on screen.

use cgmath::{Vector2, Zero};

use super::geometry::Aabb;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollOffset {
    /// World position of the viewport's top-left corner
    pub offset: Vector2<f32>,
}

impl Default for ScrollOffset {
    fn default() -> Self {
        ScrollOffset {
            offset: Vector2::zero(),
        }
    }
}

impl ScrollOffset {
    pub fn horizontal(&self) -> f32 {
        self.offset.x
    }

    pub fn vertical(&self) -> f32 {
        self.offset.y
    }

    /// Converts a viewport coordinate into a world coordinate.
    pub fn to_world(&self, screen_x: f32, screen_y: f32) -> (f32, f32) {
        (screen_x + self.offset.x, screen_y + self.offset.y)
    }

    /// Converts a world coordinate into a viewport coordinate.
    pub fn to_screen(&self, world_x: f32, world_y: f32) -> (f32, f32) {
        (world_x - self.offset.x, world_y - self.offset.y)
    }

    /// Whether any part of `aabb` falls inside the horizontal span of the viewport.
    pub fn is_horizontally_visible(&self, aabb: &Aabb, viewport_width: f32) -> bool {
        let screen_x = aabb.x - self.offset.x;
        screen_x + aabb.width >= 0.0 && screen_x <= viewport_width
    }

    /// Shifts the view so the player stays inside the viewport.
    ///
    /// # Arguments
    /// * `player` - The player's box after collision resolution
    /// * `velocity_x` - The player's horizontal velocity; the horizontal edges only scroll
    ///   while the player is still moving outward
    /// * `viewport` - Viewport width and height
    pub fn follow(&mut self, player: &Aabb, velocity_x: f32, viewport: (f32, f32)) {
        let (width, height) = viewport;
        let (screen_x, screen_y) = self.to_screen(player.x, player.y);

        let right_edge = width - player.width;
        if screen_x <= 0.0 && velocity_x < 0.0 {
            self.offset.x = player.x;
        } else if screen_x >= right_edge && velocity_x > 0.0 {
            self.offset.x = player.x - right_edge;
        }

        // The world floor stays anchored to the bottom of the viewport, so the
        // view only ever moves up from its resting position.
        let bottom_edge = height - player.height;
        if screen_y < 0.0 {
            self.offset.y = player.y;
        } else if screen_y > bottom_edge && self.offset.y < 0.0 {
            self.offset.y = (player.y - bottom_edge).min(0.0);
        }
    }

    /// Places the view so `player` sits horizontally centered, without
    /// showing space left of the world origin unless the player is there.
    ///
    /// Used when a world is loaded or imported and there is no previous
    /// camera position to follow from.
    pub fn frame(&mut self, player: &Aabb, viewport_width: f32) {
        let centered = player.x - (viewport_width - player.width) / 2.0;
        self.offset.x = centered.max(0.0).min(player.x);
        self.offset.y = player.y.min(0.0);
    }

    pub fn reset(&mut self) {
        self.offset = Vector2::zero();
    }
}
