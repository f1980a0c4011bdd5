//! Gravity, integration and tile collision.
//!
//! For every mover with a [`Position`], [`Movement`] and [`Graphics`]:
//! 1. rebuild the collision rectangle from `pos` and `size`
//! 2. gather solid tiles in the neighbourhood of the current tile position
//! 3. add gravity to `vel.y` and clamp it to the configured fall speed
//! 4. move and resolve horizontally, then vertically
//! 5. write back `pos`, `tile_pos` and the grounded flag
//!
//! Resolution is per axis and discrete. A fast mover can pass through a
//! tile thinner than one step; the fall-speed clamp keeps that rare.
//!
//! Two asymmetries are kept on purpose. Only the horizontal step is scaled
//! by the frame factor. Only vertical contact zeroes velocity: a mover
//! pushed back by a wall keeps its `vel.x`.
use bevy_ecs::error::Result;
use bevy_ecs::prelude::*;
use glam::{IVec2, Vec2};
use log::trace;
use smallvec::SmallVec;

use crate::components::flags::Flags;
use crate::components::graphics::Graphics;
use crate::components::movement::Movement;
use crate::components::position::Position;
use crate::components::rect::Rect;
use crate::components::tile::Tile;
use crate::error::SimError;
use crate::resources::simconfig::SimConfig;
use crate::resources::tileindex::TileIndex;
use crate::resources::worldtime::WorldTime;

/// Sides on which a mover touched a solid tile this step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Contacts {
    pub fn any(&self) -> bool {
        self.top || self.bottom || self.left || self.right
    }
}

pub fn tile_collision_system(
    mut movers: Query<(Entity, &mut Position, &mut Movement, &Graphics)>,
    tiles: Query<(&Flags, &Tile)>,
    index: Res<TileIndex>,
    config: Res<SimConfig>,
    time: Res<WorldTime>,
) -> Result {
    for (entity, mut position, mut movement, graphics) in movers.iter_mut() {
        let mut rect = Rect::new(position.pos, graphics.size);
        let solids = solid_rects(&index, &tiles, position.tile_pos, config.neighbor_radius)?;

        // checked before the clamp: f32::min would turn NaN into the cap
        let fall = movement.vel.y + movement.gravity_acc.y;
        if !movement.vel.x.is_finite() || !fall.is_finite() {
            return Err(SimError::NonFiniteVelocity { entity }.into());
        }
        movement.vel.y = fall.min(config.max_fall_speed);

        let contacts = resolve_against_tiles(&mut rect, &mut movement.vel, &solids, time.delta);
        if contacts.bottom {
            position.on_ground = true;
            movement.vel.y = 0.0;
        }
        if contacts.any() {
            trace!("{entity} contacts {contacts:?} at {:?}", rect.origin());
        }

        position.pos = rect.origin();
        position.tile_pos = index.pixel_to_tile(position.pos);
        position.rect = Some(rect);
    }
    Ok(())
}

/// Rectangles of the collidable tiles within `radius` of `center`.
fn solid_rects(
    index: &TileIndex,
    tiles: &Query<(&Flags, &Tile)>,
    center: IVec2,
    radius: i32,
) -> Result<SmallVec<[Rect; 18]>, SimError> {
    let mut solids = SmallVec::new();
    for (tile_entity, coord) in index.neighbors_in_radius(center, radius) {
        let (flags, tile) = tiles
            .get(tile_entity)
            .map_err(|_| SimError::MissingComponent {
                entity: tile_entity,
                component: "Flags/Tile",
            })?;
        if flags.collidable {
            solids.push(tile.rect_at(coord));
        }
    }
    Ok(solids)
}

/// Move `rect` by `vel` against `solids`, x axis first.
///
/// `vel.x` is scaled by `dt`, `vel.y` is not. Horizontal overlap snaps the
/// leading edge to the solid and leaves `vel.x` alone; vertical overlap
/// snaps and zeroes `vel.y`.
pub fn resolve_against_tiles(rect: &mut Rect, vel: &mut Vec2, solids: &[Rect], dt: f32) -> Contacts {
    let mut contacts = Contacts::default();

    rect.x += vel.x * dt;
    for solid in solids {
        if solid.overlaps(rect) {
            if vel.x > 0.0 {
                rect.set_right(solid.left());
                contacts.right = true;
            } else if vel.x < 0.0 {
                rect.set_left(solid.right());
                contacts.left = true;
            }
        }
    }

    rect.y += vel.y;
    for solid in solids {
        if solid.overlaps(rect) {
            if vel.y > 0.0 {
                vel.y = 0.0;
                rect.set_bottom(solid.top());
                contacts.bottom = true;
            } else if vel.y < 0.0 {
                vel.y = 0.0;
                rect.set_top(solid.bottom());
                contacts.top = true;
            }
        }
    }

    contacts
}
