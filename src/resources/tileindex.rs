//! Sparse tile lookup.
//!
//! The [`TileIndex`] maps `(layer, tile coordinate)` to the tile entity that
//! occupies the cell plus the metadata AI needs for footing checks. Cells
//! outside the authored map are simply absent; every query treats that as
//! "no tile here" rather than an error.
//!
//! The index is filled once when a level is spawned and is read-only while
//! steps run.

use bevy_ecs::prelude::*;
use glam::{IVec2, Vec2};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Per-cell data read by locomotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileMeta {
    /// Tileset-local identifier.
    pub id: u32,
    /// Walkers turn around instead of walking into this tile.
    pub unwalkable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCell {
    pub entity: Entity,
    pub meta: TileMeta,
}

/// Tiles found around a point: `(tile entity, tile coordinate)`.
pub type Neighbors = SmallVec<[(Entity, IVec2); 18]>;

#[derive(Resource, Debug, Clone)]
pub struct TileIndex {
    pub tile_width: f32,
    pub tile_height: f32,
    layer_count: usize,
    cells: FxHashMap<(usize, IVec2), TileCell>,
}

impl Default for TileIndex {
    fn default() -> Self {
        Self::new(32.0, 32.0)
    }
}

impl TileIndex {
    pub fn new(tile_width: f32, tile_height: f32) -> Self {
        Self {
            tile_width,
            tile_height,
            layer_count: 0,
            cells: FxHashMap::default(),
        }
    }

    /// Register the tile at `coord` on `layer`, replacing any previous one.
    pub fn insert(&mut self, layer: usize, coord: IVec2, entity: Entity, meta: TileMeta) {
        self.layer_count = self.layer_count.max(layer + 1);
        self.cells.insert((layer, coord), TileCell { entity, meta });
    }

    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn lookup(&self, layer: usize, coord: IVec2) -> Option<&TileMeta> {
        self.cells.get(&(layer, coord)).map(|cell| &cell.meta)
    }

    pub fn entity_at(&self, layer: usize, coord: IVec2) -> Option<Entity> {
        self.cells.get(&(layer, coord)).map(|cell| cell.entity)
    }

    /// Every tile, on every layer, inside the square of `radius` tiles around
    /// `center` (inclusive).
    pub fn neighbors_in_radius(&self, center: IVec2, radius: i32) -> Neighbors {
        let mut found = Neighbors::new();
        for layer in 0..self.layer_count {
            for x in (center.x - radius)..=(center.x + radius) {
                for y in (center.y - radius)..=(center.y + radius) {
                    let coord = IVec2::new(x, y);
                    if let Some(cell) = self.cells.get(&(layer, coord)) {
                        found.push((cell.entity, coord));
                    }
                }
            }
        }
        found
    }

    /// Nearest tile index, rounding halves to even.
    pub fn pixel_to_tile(&self, pixel: Vec2) -> IVec2 {
        pixel_to_tile(pixel, self.tile_width, self.tile_height)
    }

    pub fn tile_to_pixel(&self, tile: IVec2) -> Vec2 {
        tile_to_pixel(tile, self.tile_width, self.tile_height)
    }
}

pub fn pixel_to_tile(pixel: Vec2, tile_width: f32, tile_height: f32) -> IVec2 {
    IVec2::new(
        (pixel.x / tile_width).round_ties_even() as i32,
        (pixel.y / tile_height).round_ties_even() as i32,
    )
}

pub fn tile_to_pixel(tile: IVec2, tile_width: f32, tile_height: f32) -> Vec2 {
    Vec2::new(tile.x as f32 * tile_width, tile.y as f32 * tile_height)
}
