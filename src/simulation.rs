//! Simulation host façade.
//!
//! [`Simulation`] owns the ECS [`World`] that stores every entity and its
//! components, and the [`Schedule`] that advances it by one step:
//!
//! 1. [`player_input_controller`] – player velocity and jumps from input
//! 2. [`locomotion_system`] – rotation and AI velocities
//! 3. [`tile_collision_system`] – gravity, integration, tile collision
//!
//! Entities are plain ids. Queries are capability sets: an entity takes part
//! in a system only when it carries every component that system asks for, and
//! stops appearing as soon as it is despawned.

use std::any::type_name;

use bevy_ecs::component::Mutable;
use bevy_ecs::prelude::*;
use bevy_ecs::query::QueryFilter;
use serde::Serialize;

use crate::components::flags::Flags;
use crate::components::graphics::Graphics;
use crate::components::position::Position;
use crate::error::SimError;
use crate::resources::input::InputState;
use crate::resources::simconfig::SimConfig;
use crate::resources::tileindex::TileIndex;
use crate::resources::worldtime::WorldTime;
use crate::systems::inputcontroller::player_input_controller;
use crate::systems::locomotion::locomotion_system;
use crate::systems::tilecollision::tile_collision_system;
use crate::systems::time::update_world_time;

/// Render-facing state of one entity after a step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySnapshot {
    pub entity: u64,
    pub x: f32,
    pub y: f32,
    pub tile_x: i32,
    pub tile_y: i32,
    pub rot: f32,
    pub direction: i32,
    pub on_ground: bool,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

pub struct Simulation {
    world: World,
    schedule: Schedule,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(TileIndex::new(config.tile_width, config.tile_height));
        world.insert_resource(config);
        world.insert_resource(WorldTime::default());
        world.insert_resource(InputState::default());

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                player_input_controller,
                locomotion_system,
                tile_collision_system,
            )
                .chain(),
        );

        Self { world, schedule }
    }

    /// A new entity with no components.
    pub fn create_entity(&mut self) -> Entity {
        self.world.spawn_empty().id()
    }

    pub fn spawn(&mut self, bundle: impl Bundle) -> Entity {
        self.world.spawn(bundle).id()
    }

    /// Attach (or replace) `component` on `entity`.
    pub fn attach<C: Component>(&mut self, entity: Entity, component: C) -> Result<(), SimError> {
        let mut entity_mut = self
            .world
            .get_entity_mut(entity)
            .map_err(|_| SimError::NoSuchEntity(entity))?;
        entity_mut.insert(component);
        Ok(())
    }

    pub fn has<C: Component>(&self, entity: Entity) -> bool {
        self.world.get::<C>(entity).is_some()
    }

    pub fn get<C: Component>(&self, entity: Entity) -> Result<&C, SimError> {
        self.world
            .get::<C>(entity)
            .ok_or_else(|| missing::<C>(entity))
    }

    pub fn get_mut<C: Component<Mutability = Mutable>>(
        &mut self,
        entity: Entity,
    ) -> Result<Mut<'_, C>, SimError> {
        self.world
            .get_mut::<C>(entity)
            .ok_or_else(|| missing::<C>(entity))
    }

    /// Remove `entity` and all its components. Returns `false` if it was
    /// already gone.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        self.world.despawn(entity)
    }

    /// Entities that currently satisfy `F`, e.g.
    /// `(With<Position>, With<Movement>)`. Order is unspecified.
    pub fn entities_matching<F: QueryFilter>(&mut self) -> Vec<Entity> {
        let mut state = self.world.query_filtered::<Entity, F>();
        state.iter(&self.world).collect()
    }

    /// Whether `tile` blocks movement, read from its [`Flags`].
    pub fn is_collidable(&self, tile: Entity) -> Result<bool, SimError> {
        self.get::<Flags>(tile).map(|flags| flags.collidable)
    }

    pub fn set_tile_index(&mut self, index: TileIndex) {
        self.world.insert_resource(index);
    }

    pub fn tile_index(&self) -> &TileIndex {
        self.world.resource::<TileIndex>()
    }

    pub fn config(&self) -> &SimConfig {
        self.world.resource::<SimConfig>()
    }

    pub fn time(&self) -> WorldTime {
        *self.world.resource::<WorldTime>()
    }

    /// Button state for the next step. Edges are cleared after each step.
    pub fn input_mut(&mut self) -> Mut<'_, InputState> {
        self.world.resource_mut::<InputState>()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Advance the world by one frame with horizontal factor `dt`.
    ///
    /// # Panics
    /// A missing tile component or a non-finite velocity is a setup bug. The
    /// collision system returns it as an `Err`, which goes to the world's
    /// default error handler. That is [`bevy_ecs::error::panic`] unless the
    /// host has installed a different
    /// [`DefaultErrorHandler`](bevy_ecs::error::DefaultErrorHandler), so by
    /// default the step aborts.
    pub fn step(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
        self.world.resource_mut::<InputState>().end_frame();
        self.world.clear_trackers();
    }

    /// Positions, facing and rotation of every positioned entity, ordered by id.
    pub fn snapshot(&mut self) -> Vec<EntitySnapshot> {
        let mut state = self
            .world
            .query::<(Entity, &Position, Option<&Graphics>)>();
        let mut out: Vec<EntitySnapshot> = state
            .iter(&self.world)
            .map(|(entity, position, graphics)| EntitySnapshot {
                entity: entity.to_bits(),
                x: position.pos.x,
                y: position.pos.y,
                tile_x: position.tile_pos.x,
                tile_y: position.tile_pos.y,
                rot: position.rot,
                direction: position.direction.sign(),
                on_ground: position.on_ground,
                width: graphics.map(|g| g.size.x),
                height: graphics.map(|g| g.size.y),
            })
            .collect();
        out.sort_by_key(|s| s.entity);
        out
    }
}

fn missing<C: Component>(entity: Entity) -> SimError {
    SimError::MissingComponent {
        entity,
        component: type_name::<C>(),
    }
}
