//! Player control component.
//!
//! Entities with [`InputControlled`] are driven by the shared
//! [`InputState`](crate::resources::input::InputState) in
//! [`crate::systems::inputcontroller`]. The first such entity is also the
//! target rotatable entities turn towards.

use bevy_ecs::prelude::Component;

/// Movement intent derived from player keyboard input.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct InputControlled {
    /// Vertical velocity applied on jump. Negative is up.
    pub jump_velocity: f32,
}

impl InputControlled {
    pub fn new(jump_velocity: f32) -> Self {
        Self { jump_velocity }
    }
}
