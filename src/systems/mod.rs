//! Simulation systems.
//!
//! This module groups the ECS systems that make up one simulation step. They
//! run in the order listed below; locomotion writes velocities that the
//! collision system consumes in the same step.
//!
//! Submodules overview
//! - [`time`] – update simulation time and the per-frame factor
//! - [`inputcontroller`] – translate button state into player velocity and jumps
//! - [`locomotion`] – rotation towards the player, follow AI, walker patrol
//! - [`tilecollision`] – gravity, integration and tile collision resolution

pub mod inputcontroller;
pub mod locomotion;
pub mod tilecollision;
pub mod time;
