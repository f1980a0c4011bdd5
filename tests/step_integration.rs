//! Whole-step integration tests: locomotion followed by tile collision,
//! driven through the `Simulation` façade.

use bevy_ecs::prelude::*;
use glam::{IVec2, Vec2};

use tilestep::components::ai::FollowsEntityClose;
use tilestep::components::flags::{Flags, MobType};
use tilestep::components::graphics::Graphics;
use tilestep::components::inputcontrolled::InputControlled;
use tilestep::components::movement::Movement;
use tilestep::components::position::{Facing, Position};
use tilestep::components::tile::Tile;
use tilestep::resources::input::Button;
use tilestep::resources::simconfig::SimConfig;
use tilestep::resources::tileindex::{TileIndex, TileMeta};
use tilestep::simulation::Simulation;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// A simulation whose layer 0 holds a tile at each of `solids`.
fn make_sim(solids: &[(i32, i32)]) -> Simulation {
    let mut sim = Simulation::new(SimConfig::new());
    let mut index = TileIndex::new(32.0, 32.0);
    for &(x, y) in solids {
        let tile = sim.spawn((Tile::new(32.0, 32.0), Flags::solid()));
        index.insert(0, IVec2::new(x, y), tile, TileMeta::default());
    }
    sim.set_tile_index(index);
    sim
}

fn mover(sim: &mut Simulation, pos: Vec2, vel: Vec2, gravity: f32) -> Entity {
    let tile_pos = sim.tile_index().pixel_to_tile(pos);
    sim.spawn((
        Position::new(pos, tile_pos),
        Movement::new(4.0, gravity).with_velocity(vel),
        Graphics::new(32.0, 32.0),
    ))
}

#[test]
fn free_fall_adds_gravity_then_moves() {
    let mut sim = make_sim(&[]);
    let e = mover(&mut sim, Vec2::new(100.0, 100.0), Vec2::new(0.0, 2.0), 1.5);

    sim.step(1.0);

    let movement = sim.get::<Movement>(e).unwrap();
    let position = sim.get::<Position>(e).unwrap();
    assert!(approx_eq(movement.vel.y, 3.5));
    assert!(approx_eq(position.pos.y, 103.5));
    assert!(!position.on_ground);
}

#[test]
fn fall_speed_is_clamped_to_seventeen() {
    let mut sim = make_sim(&[]);
    let e = mover(&mut sim, Vec2::new(0.0, 0.0), Vec2::new(0.0, 16.5), 2.0);

    sim.step(1.0);

    assert_eq!(sim.get::<Movement>(e).unwrap().vel.y, 17.0);
    assert_eq!(sim.get::<Position>(e).unwrap().pos.y, 17.0);
}

#[test]
fn landing_scenario_snaps_to_tile_top() {
    // entity at (0,0) 32x32, solid tile at (0,1), vel (0,5), gravity 1
    let mut sim = make_sim(&[(0, 1)]);
    let e = mover(&mut sim, Vec2::ZERO, Vec2::new(0.0, 5.0), 1.0);

    sim.step(1.0);

    let position = sim.get::<Position>(e).unwrap();
    let movement = sim.get::<Movement>(e).unwrap();
    assert_eq!(position.pos, Vec2::ZERO);
    assert_eq!(movement.vel.y, 0.0);
    assert!(position.on_ground);
    let rect = position.rect.unwrap();
    assert_eq!(rect.bottom(), 32.0);
}

#[test]
fn wall_contact_keeps_horizontal_velocity() {
    let mut sim = make_sim(&[(2, 1)]);
    let e = mover(&mut sim, Vec2::new(30.0, 32.0), Vec2::new(6.0, 0.0), 0.0);

    sim.step(1.0);

    let position = sim.get::<Position>(e).unwrap();
    assert_eq!(position.rect.unwrap().right(), 64.0);
    assert_eq!(position.pos.x, 32.0);
    assert_eq!(sim.get::<Movement>(e).unwrap().vel.x, 6.0);
}

#[test]
fn resting_entity_is_stable_across_steps() {
    let mut sim = make_sim(&[(0, 1), (1, 1)]);
    let resting = mover(&mut sim, Vec2::ZERO, Vec2::ZERO, 1.0);
    let floating = mover(&mut sim, Vec2::new(200.0, 0.0), Vec2::ZERO, 0.0);

    sim.step(1.0);
    let first = *sim.get::<Position>(resting).unwrap();
    let first_floating = *sim.get::<Position>(floating).unwrap();
    sim.step(1.0);
    let second = *sim.get::<Position>(resting).unwrap();
    let second_floating = *sim.get::<Position>(floating).unwrap();

    assert_eq!(first.pos, Vec2::ZERO);
    assert_eq!(second.pos, first.pos);
    assert_eq!(second.tile_pos, first.tile_pos);
    assert!(second.on_ground);
    assert_eq!(second_floating.pos, first_floating.pos);
    assert_eq!(second_floating.tile_pos, first_floating.tile_pos);
}

#[test]
fn tile_pos_follows_pos_after_step() {
    let mut sim = make_sim(&[]);
    let e = mover(&mut sim, Vec2::new(40.0, 0.0), Vec2::new(10.0, 0.0), 0.0);

    sim.step(1.0);

    let position = sim.get::<Position>(e).unwrap();
    assert_eq!(position.pos, Vec2::new(50.0, 0.0));
    assert_eq!(position.tile_pos, IVec2::new(2, 0));
}

#[test]
fn non_collidable_tiles_do_not_block() {
    let mut sim = Simulation::new(SimConfig::new());
    let mut index = TileIndex::new(32.0, 32.0);
    let ghost = sim.spawn((Tile::new(32.0, 32.0), Flags::default()));
    index.insert(0, IVec2::new(0, 1), ghost, TileMeta::default());
    sim.set_tile_index(index);
    let e = mover(&mut sim, Vec2::ZERO, Vec2::new(0.0, 5.0), 1.0);

    sim.step(1.0);

    assert_eq!(sim.get::<Position>(e).unwrap().pos.y, 6.0);
}

#[test]
fn rect_is_rebuilt_from_current_size() {
    let mut sim = make_sim(&[]);
    let e = mover(&mut sim, Vec2::ZERO, Vec2::ZERO, 0.0);
    sim.step(1.0);

    sim.get_mut::<Graphics>(e).unwrap().size = Vec2::new(16.0, 48.0);
    sim.step(1.0);

    let rect = sim.get::<Position>(e).unwrap().rect.unwrap();
    assert_eq!(rect.w, 16.0);
    assert_eq!(rect.h, 48.0);
}

#[test]
fn player_jumps_and_walks() {
    let mut sim = make_sim(&[(0, 1), (1, 1), (2, 1), (3, 1)]);
    let player = mover(&mut sim, Vec2::ZERO, Vec2::ZERO, 1.0);
    sim.attach(player, InputControlled::new(-10.0)).unwrap();

    // settle onto the floor
    sim.step(1.0);
    assert!(sim.get::<Position>(player).unwrap().on_ground);

    sim.input_mut().press(Button::Right);
    sim.input_mut().press(Button::JumpPrimary);
    sim.step(1.0);

    let position = sim.get::<Position>(player).unwrap();
    let movement = sim.get::<Movement>(player).unwrap();
    // jump -10 plus gravity 1, not integrated by the frame factor
    assert_eq!(movement.vel.y, -9.0);
    assert_eq!(position.pos, Vec2::new(4.0, -9.0));
    assert!(!position.on_ground);
    assert_eq!(position.direction, Facing::Right);

    // holding jump does not jump again
    sim.step(1.0);
    assert_eq!(sim.get::<Movement>(player).unwrap().vel.y, -8.0);
}

#[test]
fn walker_turns_at_ledge_in_same_step() {
    // walker on tile (5,5) facing right; floor only under (5,6)
    let mut sim = make_sim(&[(5, 6)]);
    let walker = mover(&mut sim, Vec2::new(160.0, 160.0), Vec2::ZERO, 1.0);
    sim.attach(walker, Flags::mob(MobType::WalkerEnemy)).unwrap();

    sim.step(1.0);

    assert_eq!(sim.get::<Position>(walker).unwrap().direction, Facing::Left);
    sim.step(1.0);
    assert_eq!(sim.get::<Movement>(walker).unwrap().vel.x, -4.0);
}

#[test]
fn follower_out_of_range_keeps_velocity() {
    let mut sim = make_sim(&[]);
    let target = mover(&mut sim, Vec2::new(15.0 * 32.0, 0.0), Vec2::ZERO, 0.0);
    let follower = mover(&mut sim, Vec2::ZERO, Vec2::new(1.5, 0.0), 0.0);
    sim.attach(follower, Flags::default()).unwrap();
    sim.attach(follower, FollowsEntityClose::new(target, 10.0)).unwrap();

    sim.step(1.0);

    assert_eq!(sim.get::<Movement>(follower).unwrap().vel.x, 1.5);
}

#[test]
fn follower_survives_target_removal() {
    let mut sim = make_sim(&[(0, 1), (1, 1)]);
    let target = mover(&mut sim, Vec2::new(32.0, 0.0), Vec2::ZERO, 0.0);
    let follower = mover(&mut sim, Vec2::ZERO, Vec2::ZERO, 1.0);
    sim.attach(follower, Flags::default()).unwrap();
    sim.attach(follower, FollowsEntityClose::new(target, 10.0)).unwrap();

    sim.despawn(target);
    sim.step(1.0);

    assert_eq!(sim.get::<Movement>(follower).unwrap().vel.x, 0.0);
    assert!(sim.get::<Position>(follower).unwrap().on_ground);
}

#[test]
fn turret_tracks_player() {
    let mut sim = make_sim(&[]);
    let player = mover(&mut sim, Vec2::new(64.0, 0.0), Vec2::ZERO, 0.0);
    sim.attach(player, InputControlled::new(-10.0)).unwrap();
    let turret = mover(&mut sim, Vec2::ZERO, Vec2::ZERO, 0.0);
    sim.attach(turret, Flags::rotatable()).unwrap();

    sim.step(1.0);
    assert!(approx_eq(sim.get::<Position>(turret).unwrap().rot, 0.0));

    sim.get_mut::<Position>(player).unwrap().pos = Vec2::new(0.0, -64.0);
    sim.step(1.0);
    assert!(approx_eq(sim.get::<Position>(turret).unwrap().rot, 90.0));
}

#[test]
fn snapshot_reports_movers_only() {
    let mut sim = make_sim(&[(0, 1)]);
    let e = mover(&mut sim, Vec2::ZERO, Vec2::ZERO, 1.0);
    sim.step(1.0);

    let snapshot = sim.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].entity, e.to_bits());
    assert!(snapshot[0].on_ground);
    assert_eq!(snapshot[0].direction, 1);
    assert_eq!(snapshot[0].width, Some(32.0));
}

#[test]
#[should_panic(expected = "non-finite velocity")]
fn nan_gravity_from_config_is_not_clamped() {
    let mut config = SimConfig::new();
    config.load_from_str("[physics]\ngravity = nan\n").unwrap();
    let mut sim = make_sim(&[]);
    let gravity = config.gravity;
    mover(&mut sim, Vec2::ZERO, Vec2::ZERO, gravity);

    sim.step(1.0);
}
