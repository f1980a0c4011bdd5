//! Tilestep library.
//!
//! Per-frame entity simulation for a 2D tile world: locomotion (player input,
//! AI, rotation) followed by gravity, integration and collision against a
//! static tile grid. Rendering, audio and asset loading belong to the host;
//! it reads entity state back after each [`simulation::Simulation::step`].

pub mod components;
pub mod error;
pub mod level;
pub mod resources;
pub mod simulation;
pub mod systems;
