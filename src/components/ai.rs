//! AI locomotion tags.
//!
//! Tags are independent of each other; an entity may carry several. Only
//! [`FollowsEntityClose`] changes velocity in the locomotion system, the
//! others are markers for behaviour that lives outside this crate.

use bevy_ecs::prelude::{Component, Entity};

/// Approach `entity_followed` while it is closer than `follow_range` tiles.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct FollowsEntityClose {
    pub entity_followed: Entity,
    pub follow_range: f32,
}

impl FollowsEntityClose {
    pub fn new(entity_followed: Entity, follow_range: f32) -> Self {
        Self {
            entity_followed,
            follow_range,
        }
    }
}

/// Marker for patrol behaviour. Has no effect on locomotion yet.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct BackAndForthMovement;

/// Marker for melee AI. Not read by locomotion or collision.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MeleeWeaponAttack {
    pub attack_range: f32,
}
