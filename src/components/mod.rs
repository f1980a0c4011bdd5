//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the simulated world. The set is closed: locomotion and collision query
//! entities by which of these they carry.
//!
//! Submodules overview:
//! - [`ai`] – AI locomotion tags (follow, patrol and melee markers)
//! - [`flags`] – collidable/rotatable flags and the locomotion behaviour enum
//! - [`graphics`] – render size used to build collision rectangles
//! - [`inputcontrolled`] – marks the player entity and its jump tuning
//! - [`movement`] – velocity, speed and gravity
//! - [`position`] – pixel position plus derived tile position, facing, rotation
//! - [`rect`] – axis-aligned rectangle value type
//! - [`tile`] – static grid cell dimensions

pub mod ai;
pub mod flags;
pub mod graphics;
pub mod inputcontrolled;
pub mod movement;
pub mod position;
pub mod rect;
pub mod tile;
