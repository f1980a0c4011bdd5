//! Level loading and spawning.
//!
//! Reads a JSON [`Tilemap`], spawns one static entity per tile, installs the
//! matching [`TileIndex`] and spawns the actors the map places, tuned from the
//! current [`SimConfig`](crate::resources::simconfig::SimConfig).

use std::path::Path;

use bevy_ecs::prelude::Entity;
use glam::{IVec2, Vec2};
use log::{info, warn};

use crate::components::ai::{BackAndForthMovement, FollowsEntityClose, MeleeWeaponAttack};
use crate::components::flags::{Flags, MobType};
use crate::components::graphics::Graphics;
use crate::components::inputcontrolled::InputControlled;
use crate::components::movement::Movement;
use crate::components::position::Position;
use crate::components::tile::Tile;
use crate::error::SimError;
use crate::resources::tileindex::{TileIndex, TileMeta};
use crate::resources::tilemap::{ActorKind, ActorSpawn, Tilemap};
use crate::simulation::Simulation;

/// Reach, in tiles, given to followers' melee marker.
const FOLLOWER_ATTACK_RANGE: f32 = 1.0;

/// Entities created by [`spawn_level`].
#[derive(Debug, Clone, Default)]
pub struct SpawnedLevel {
    pub player: Option<Entity>,
    pub actors: Vec<Entity>,
    pub tile_count: usize,
}

pub fn load_level(path: impl AsRef<Path>) -> Result<Tilemap, SimError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let tilemap: Tilemap = serde_json::from_str(&json)?;
    info!(
        "Loaded level {:?}: {}x{} tiles of {}px, {} layers, {} actors",
        path,
        tilemap.map_width,
        tilemap.map_height,
        tilemap.tile_size,
        tilemap.layers.len(),
        tilemap.actors.len()
    );
    Ok(tilemap)
}

pub fn spawn_level(sim: &mut Simulation, tilemap: &Tilemap) -> Result<SpawnedLevel, SimError> {
    let size = tilemap.tile_size as f32;
    if size <= 0.0 {
        return Err(SimError::Level(format!("tile size must be positive, got {size}")));
    }
    let config = sim.config().clone();
    if size != config.tile_width || size != config.tile_height {
        warn!(
            "level tile size {size} differs from configured {}x{}; using the level's",
            config.tile_width, config.tile_height
        );
    }

    let mut index = TileIndex::new(size, size);
    for (layer_index, layer) in tilemap.layers.iter().enumerate() {
        for placed in &layer.positions {
            let flags = Flags {
                collidable: placed.collidable,
                ..Flags::default()
            };
            let entity = sim.spawn((Tile::new(size, size), flags));
            index.insert(
                layer_index,
                IVec2::new(placed.x, placed.y),
                entity,
                TileMeta {
                    id: placed.id,
                    unwalkable: placed.unwalkable,
                },
            );
        }
    }
    let tile_count = index.len();
    sim.set_tile_index(index);

    let mut spawned = SpawnedLevel {
        tile_count,
        ..SpawnedLevel::default()
    };

    let mut players = tilemap.actors.iter().filter(|a| a.kind == ActorKind::Player);
    if let Some(spawn) = players.next() {
        let entity = sim.spawn((
            InputControlled::new(config.jump_velocity),
            Flags::default(),
            place(spawn, size),
            Movement::new(config.player_speed, config.gravity),
            Graphics::new(size, size),
        ));
        spawned.player = Some(entity);
        spawned.actors.push(entity);
    }
    if players.next().is_some() {
        return Err(SimError::Level("more than one player spawn".to_string()));
    }

    for spawn in tilemap.actors.iter().filter(|a| a.kind != ActorKind::Player) {
        let entity = match spawn.kind {
            ActorKind::Player => continue,
            ActorKind::Walker => sim.spawn((
                Flags::mob(MobType::WalkerEnemy),
                place(spawn, size),
                Movement::new(config.walker_speed, config.gravity),
                Graphics::new(size, size),
                BackAndForthMovement,
            )),
            ActorKind::Follower => {
                let target = required_player(spawned.player, spawn)?;
                sim.spawn((
                    Flags::default(),
                    place(spawn, size),
                    Movement::new(config.follower_speed, config.gravity),
                    Graphics::new(size, size),
                    FollowsEntityClose::new(target, config.follow_range),
                    MeleeWeaponAttack {
                        attack_range: FOLLOWER_ATTACK_RANGE,
                    },
                ))
            }
            ActorKind::Turret => {
                required_player(spawned.player, spawn)?;
                sim.spawn((
                    Flags::rotatable(),
                    place(spawn, size),
                    Movement::new(0.0, 0.0),
                    Graphics::new(size, size),
                ))
            }
        };
        spawned.actors.push(entity);
    }

    info!(
        "Spawned {} tiles and {} actors",
        spawned.tile_count,
        spawned.actors.len()
    );
    Ok(spawned)
}

fn place(spawn: &ActorSpawn, size: f32) -> Position {
    let tile = IVec2::new(spawn.x, spawn.y);
    Position::new(Vec2::new(tile.x as f32 * size, tile.y as f32 * size), tile)
}

fn required_player(player: Option<Entity>, spawn: &ActorSpawn) -> Result<Entity, SimError> {
    player.ok_or_else(|| {
        SimError::Level(format!(
            "{:?} at ({}, {}) needs a player spawn",
            spawn.kind, spawn.x, spawn.y
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::simconfig::SimConfig;

    fn parse(json: &str) -> Tilemap {
        serde_json::from_str(json).unwrap()
    }

    const LEVEL: &str = r#"{
        "tile_size": 32, "map_width": 8, "map_height": 4,
        "layers": [
            { "name": "ground", "positions": [
                { "x": 0, "y": 3 }, { "x": 1, "y": 3 }, { "x": 2, "y": 3 },
                { "x": 3, "y": 2, "unwalkable": true },
                { "x": 4, "y": 1, "collidable": false }
            ] },
            { "name": "decor", "positions": [ { "x": 5, "y": 0, "collidable": false } ] }
        ],
        "actors": [
            { "kind": "walker", "x": 1, "y": 2 },
            { "kind": "player", "x": 0, "y": 2 },
            { "kind": "follower", "x": 2, "y": 2 },
            { "kind": "turret", "x": 6, "y": 0 }
        ]
    }"#;

    #[test]
    fn spawns_tiles_and_index() {
        let mut sim = Simulation::new(SimConfig::new());
        let spawned = spawn_level(&mut sim, &parse(LEVEL)).unwrap();

        assert_eq!(spawned.tile_count, 6);
        let index = sim.tile_index();
        assert_eq!(index.layer_count(), 2);
        assert!(index.lookup(0, IVec2::new(3, 2)).unwrap().unwalkable);

        let decor = index.entity_at(1, IVec2::new(5, 0)).unwrap();
        assert!(!sim.get::<Flags>(decor).unwrap().collidable);
        let ground = index.entity_at(0, IVec2::new(0, 3)).unwrap();
        assert!(sim.get::<Flags>(ground).unwrap().collidable);
        assert!(sim.has::<Tile>(ground));
    }

    #[test]
    fn player_is_spawned_first_and_followed() {
        let mut sim = Simulation::new(SimConfig::new());
        let spawned = spawn_level(&mut sim, &parse(LEVEL)).unwrap();

        let player = spawned.player.unwrap();
        assert_eq!(spawned.actors[0], player);
        assert_eq!(spawned.actors.len(), 4);
        assert!(sim.has::<InputControlled>(player));

        let follower = spawned.actors[2];
        assert_eq!(
            sim.get::<FollowsEntityClose>(follower).unwrap().entity_followed,
            player
        );
        let pos = sim.get::<Position>(follower).unwrap();
        assert_eq!(pos.pos, Vec2::new(64.0, 64.0));
        assert_eq!(pos.tile_pos, IVec2::new(2, 2));
    }

    #[test]
    fn follower_without_player_is_rejected() {
        let mut sim = Simulation::new(SimConfig::new());
        let map = parse(
            r#"{ "tile_size": 32, "map_width": 2, "map_height": 2, "layers": [],
                 "actors": [{ "kind": "follower", "x": 0, "y": 0 }] }"#,
        );
        assert!(matches!(spawn_level(&mut sim, &map), Err(SimError::Level(_))));
    }

    #[test]
    fn two_players_are_rejected() {
        let mut sim = Simulation::new(SimConfig::new());
        let map = parse(
            r#"{ "tile_size": 32, "map_width": 2, "map_height": 2, "layers": [],
                 "actors": [{ "kind": "player", "x": 0, "y": 0 }, { "kind": "player", "x": 1, "y": 0 }] }"#,
        );
        assert!(matches!(spawn_level(&mut sim, &map), Err(SimError::Level(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_level("/no/such/level.json"),
            Err(SimError::Io(_))
        ));
    }
}
