//! Velocity and locomotion tuning for a moving entity.
//!
//! The [`Movement`] component is written by the locomotion systems and
//! consumed by the tile collision system, which applies gravity and
//! integrates `vel` into the entity's [`Position`](super::position::Position).

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Kinematic state of a mover.
///
/// # Fields
/// - `vel` - pixels per step; `x` is scaled by the frame factor, `y` is not
/// - `speed` - maximum horizontal speed used by input and AI
/// - `gravity_acc` - added to `vel` every step; only `y` is applied
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    pub vel: Vec2,
    pub speed: f32,
    pub gravity_acc: Vec2,
}

impl Movement {
    /// A mover at rest with the given speed and downward gravity.
    pub fn new(speed: f32, gravity: f32) -> Self {
        Self {
            vel: Vec2::ZERO,
            speed,
            gravity_acc: Vec2::new(0.0, gravity),
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }
}
