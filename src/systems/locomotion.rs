//! AI locomotion and rotation.
//!
//! Decides the intended horizontal velocity and facing of non-player movers
//! before the collision step integrates them:
//! - rotatable entities turn towards the player
//! - [`FollowsEntityClose`] approaches its target while in range and guards
//!   against walking off platforms when the target is on another row
//! - [`MobType::WalkerEnemy`] patrols, turning at ledges and unwalkable tiles
//!
//! Positions of other entities are read from a snapshot taken before any
//! entity is updated, so the result does not depend on query order.
use bevy_ecs::prelude::*;
use glam::{IVec2, Vec2};
use log::debug;
use rustc_hash::FxHashMap;

use crate::components::ai::FollowsEntityClose;
use crate::components::flags::{Flags, MobType};
use crate::components::inputcontrolled::InputControlled;
use crate::components::movement::Movement;
use crate::components::position::{Facing, Position};
use crate::error::SimError;
use crate::resources::simconfig::SimConfig;
use crate::resources::tileindex::TileIndex;

#[derive(Debug, Clone, Copy)]
struct Seen {
    pos: Vec2,
    tile_pos: IVec2,
}

pub fn locomotion_system(
    mut positions: ParamSet<(
        Query<(Entity, &Position)>,
        Query<(
            Entity,
            &Flags,
            &mut Position,
            &mut Movement,
            Option<&FollowsEntityClose>,
        )>,
    )>,
    players: Query<Entity, With<InputControlled>>,
    tiles: Res<TileIndex>,
    config: Res<SimConfig>,
) {
    let seen: FxHashMap<Entity, Seen> = positions
        .p0()
        .iter()
        .map(|(entity, position)| {
            (
                entity,
                Seen {
                    pos: position.pos,
                    tile_pos: position.tile_pos,
                },
            )
        })
        .collect();
    let player = players
        .iter()
        .next()
        .and_then(|entity| seen.get(&entity).copied());
    let layer = config.ground_layer;

    let mut movers = positions.p1();
    for (entity, flags, mut position, mut movement, follows) in movers.iter_mut() {
        if flags.rotatable {
            if let Some(target) = player {
                position.rot = rotation_towards(position.pos, target.pos);
            }
        }

        let mut following = false;
        if let Some(follows) = follows {
            match seen.get(&follows.entity_followed) {
                Some(target) => {
                    following =
                        follow_close(&mut position, &mut movement, follows, target, &tiles, layer);
                }
                None => debug!(
                    "skipping follow AI: {}",
                    SimError::InvalidEntityReference {
                        entity,
                        referenced: follows.entity_followed,
                    }
                ),
            }
        }

        match flags.mob_type {
            MobType::WalkerEnemy if !following => {
                walker_patrol(entity, &mut position, &mut movement, &tiles, layer)
            }
            MobType::WalkerEnemy | MobType::Generic => {}
        }
    }
}

/// Signed angle in degrees from the `from -> to` vector to the +x axis.
///
/// With y pointing down, a target straight below gives -90 and one straight
/// above gives 90.
pub fn rotation_towards(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    -d.y.atan2(d.x).to_degrees()
}

/// Whether a tile sits one row below and `step` columns beside `here`.
fn has_floor(tiles: &TileIndex, layer: usize, here: IVec2, step: i32) -> bool {
    tiles.lookup(layer, here + IVec2::new(step, 1)).is_some()
}

/// Returns `true` when the target was in range and this behaviour took charge.
fn follow_close(
    position: &mut Position,
    movement: &mut Movement,
    follows: &FollowsEntityClose,
    target: &Seen,
    tiles: &TileIndex,
    layer: usize,
) -> bool {
    let distance = position
        .tile_pos
        .as_vec2()
        .distance(target.tile_pos.as_vec2());
    if distance >= follows.follow_range {
        return false;
    }

    let here = tiles.pixel_to_tile(position.pos);
    if target.tile_pos.y == position.tile_pos.y {
        if target.pos.x > position.pos.x && has_floor(tiles, layer, here, 1) {
            movement.vel.x = movement.speed;
            position.direction = Facing::Right;
        } else if target.pos.x < position.pos.x && has_floor(tiles, layer, here, -1) {
            movement.vel.x = -movement.speed;
            position.direction = Facing::Left;
        }
    } else if !has_floor(tiles, layer, here, position.direction.sign()) {
        // target on another row: do not walk off the platform chasing it
        movement.vel.x = -movement.vel.x;
        position.direction = position.direction.flipped();
    }
    true
}

fn walker_patrol(
    entity: Entity,
    position: &mut Position,
    movement: &mut Movement,
    tiles: &TileIndex,
    layer: usize,
) {
    movement.vel.x = movement.speed * position.direction.sign() as f32;

    let here = tiles.pixel_to_tile(position.pos);
    let step = if movement.vel.x.is_sign_negative() { -1 } else { 1 };
    let ahead = here + IVec2::new(step, 0);

    let turn = match tiles.lookup(layer, ahead) {
        Some(meta) => meta.unwalkable,
        None => tiles.lookup(layer, ahead + IVec2::Y).is_none(),
    };
    if turn {
        position.direction = position.direction.flipped();
        debug!("walker {entity} turns at {ahead}");
    }
}
