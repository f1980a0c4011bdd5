//! Per-frame input resource.
//!
//! Captures the logical buttons the simulation cares about and exposes them to
//! systems via the [`InputState`] resource. The host maps physical keys onto
//! buttons (e.g. both `A` and `Left` onto [`Button::Left`]) and calls
//! [`InputState::press`]/[`InputState::release`]; the edge flags are cleared
//! by [`InputState::end_frame`] once a step has consumed them.
use bevy_ecs::prelude::*;

/// Logical buttons read by the locomotion systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    JumpPrimary,
    JumpSecondary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean button state with its per-frame edges.
pub struct BoolState {
    /// Whether the button is currently held.
    pub active: bool,
    /// Whether the button went down this frame.
    pub just_pressed: bool,
    /// Whether the button went up this frame.
    pub just_released: bool,
}

impl BoolState {
    fn press(&mut self) {
        if !self.active {
            self.just_pressed = true;
        }
        self.active = true;
    }

    fn release(&mut self) {
        if self.active {
            self.just_released = true;
        }
        self.active = false;
    }

    fn clear_edges(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Resource capturing the per-frame button state relevant to gameplay.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub left: BoolState,
    pub right: BoolState,
    pub jump_primary: BoolState,
    pub jump_secondary: BoolState,
}

impl InputState {
    pub fn button(&self, button: Button) -> &BoolState {
        match button {
            Button::Left => &self.left,
            Button::Right => &self.right,
            Button::JumpPrimary => &self.jump_primary,
            Button::JumpSecondary => &self.jump_secondary,
        }
    }

    fn button_mut(&mut self, button: Button) -> &mut BoolState {
        match button {
            Button::Left => &mut self.left,
            Button::Right => &mut self.right,
            Button::JumpPrimary => &mut self.jump_primary,
            Button::JumpSecondary => &mut self.jump_secondary,
        }
    }

    /// Mark `button` held. Records a key-down edge if it was up.
    pub fn press(&mut self, button: Button) {
        self.button_mut(button).press();
    }

    pub fn release(&mut self, button: Button) {
        self.button_mut(button).release();
    }

    /// True when either jump button went down this frame.
    pub fn jump_pressed(&self) -> bool {
        self.jump_primary.just_pressed || self.jump_secondary.just_pressed
    }

    /// Drop this frame's edges; held state is kept.
    pub fn end_frame(&mut self) {
        self.left.clear_edges();
        self.right.clear_edges();
        self.jump_primary.clear_edges();
        self.jump_secondary.clear_edges();
    }
}
