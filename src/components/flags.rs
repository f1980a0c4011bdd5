use bevy_ecs::prelude::Component;

/// Locomotion behaviour selected for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MobType {
    /// No built-in patrol; may still be driven by input or AI tags.
    #[default]
    Generic,
    /// Walks back and forth, turning at ledges and unwalkable tiles.
    WalkerEnemy,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
    /// Tiles carrying this flag block movement.
    pub collidable: bool,
    /// `rot` tracks the player every step.
    pub rotatable: bool,
    pub mob_type: MobType,
}

impl Flags {
    pub fn solid() -> Self {
        Self {
            collidable: true,
            ..Self::default()
        }
    }

    pub fn mob(mob_type: MobType) -> Self {
        Self {
            mob_type,
            ..Self::default()
        }
    }

    pub fn rotatable() -> Self {
        Self {
            rotatable: true,
            ..Self::default()
        }
    }
}
