//! Platformer input controller.
//!
//! Reads the shared [`InputState`](crate::resources::input::InputState) and
//! sets horizontal velocity, facing and jumps on entities with an
//! [`InputControlled`](crate::components::inputcontrolled::InputControlled)
//! component. Horizontal speed is not integrated: releasing both directions
//! stops the entity on the same frame.
use bevy_ecs::prelude::*;

use crate::components::inputcontrolled::InputControlled;
use crate::components::movement::Movement;
use crate::components::position::{Facing, Position};
use crate::resources::input::InputState;

/// Update each controlled entity's `Movement` from held and pressed buttons.
///
/// When left and right are both held, right wins because it is checked last.
pub fn player_input_controller(
    mut query: Query<(&InputControlled, &mut Position, &mut Movement)>,
    input_state: Res<InputState>,
) {
    for (controlled, mut position, mut movement) in query.iter_mut() {
        movement.vel.x = 0.0;

        if input_state.left.active {
            movement.vel.x = -movement.speed;
            position.direction = Facing::Left;
        }
        if input_state.right.active {
            movement.vel.x = movement.speed;
            position.direction = Facing::Right;
        }

        if input_state.jump_pressed() && position.on_ground {
            position.on_ground = false;
            movement.vel.y = controlled.jump_velocity;
        }
    }
}
