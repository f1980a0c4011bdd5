//! Level data types.
//!
//! Simple serializable structs describing a tile map and the actors placed on
//! it. [`crate::level`] turns them into entities and a
//! [`TileIndex`](super::tileindex::TileIndex).

use serde::{Deserialize, Serialize};

fn yes() -> bool {
    true
}

/// Single tile placement within a layer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tileposition {
    /// X coordinate in tiles.
    pub x: i32,
    /// Y coordinate in tiles.
    pub y: i32,
    /// Tile identifier (tileset-local).
    #[serde(default)]
    pub id: u32,
    #[serde(default = "yes")]
    pub collidable: bool,
    #[serde(default)]
    pub unwalkable: bool,
}

/// A named tile layer containing positions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tilelayer {
    pub name: String,
    pub positions: Vec<Tileposition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Player,
    /// Patrols left and right between ledges and walls.
    Walker,
    /// Approaches the player while close.
    Follower,
    /// Static, turns to face the player.
    Turret,
}

/// An actor placed at a tile coordinate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActorSpawn {
    pub kind: ActorKind,
    pub x: i32,
    pub y: i32,
}

/// Tilemap metadata, layers and actor placements.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tilemap {
    /// Size of a tile in pixels.
    pub tile_size: u32,
    /// Map width in tiles.
    pub map_width: u32,
    /// Map height in tiles.
    pub map_height: u32,
    pub layers: Vec<Tilelayer>,
    #[serde(default)]
    pub actors: Vec<ActorSpawn>,
}
