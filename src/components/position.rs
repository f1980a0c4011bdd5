//! Pixel-space position plus the state derived from it each step.

use bevy_ecs::prelude::Component;
use glam::{IVec2, Vec2};

use crate::components::rect::Rect;

/// Horizontal facing. Renderers read it as `sign()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// `-1` for left, `1` for right.
    pub fn sign(self) -> i32 {
        match self {
            Facing::Left => -1,
            Facing::Right => 1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// Where an entity is and how it is oriented.
///
/// `tile_pos` is always `pixel_to_tile(pos)` once a step has run; it is only
/// set independently when the entity is spawned. `rect` is rebuilt from `pos`
/// and the entity's [`Graphics`](super::graphics::Graphics) size at the start
/// of every collision step and must not be treated as authoritative.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub pos: Vec2,
    pub tile_pos: IVec2,
    pub direction: Facing,
    pub on_ground: bool,
    /// Degrees. Only recomputed for rotatable entities.
    pub rot: f32,
    pub rect: Option<Rect>,
}

impl Position {
    pub fn new(pos: Vec2, tile_pos: IVec2) -> Self {
        Self {
            pos,
            tile_pos,
            direction: Facing::default(),
            on_ground: false,
            rot: 0.0,
            rect: None,
        }
    }

    pub fn with_direction(mut self, direction: Facing) -> Self {
        self.direction = direction;
        self
    }
}
