use bevy_ecs::prelude::Component;
use glam::{IVec2, Vec2};

use crate::components::rect::Rect;

/// Static grid cell. Tile entities also carry [`Flags`](super::flags::Flags)
/// and never move once spawned.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub width: f32,
    pub height: f32,
}

impl Tile {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Pixel rectangle covered by this tile at grid coordinate `coord`.
    pub fn rect_at(&self, coord: IVec2) -> Rect {
        Rect::new(
            Vec2::new(coord.x as f32 * self.width, coord.y as f32 * self.height),
            Vec2::new(self.width, self.height),
        )
    }
}
