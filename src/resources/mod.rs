//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during a step: input state, timing, tuning, and the
//! tile lookup. Each submodule documents the semantics and intended usage of
//! its resource(s).
//!
//! Overview
//! - `input` – per-frame state of the logical buttons the player uses
//! - `simconfig` – tuning loaded from an INI file
//! - `tileindex` – sparse `(layer, tile)` lookup and pixel/tile conversion
//! - `tilemap` – serializable level format (layers and actor spawns)
//! - `worldtime` – simulation time and per-frame factor
pub mod input;
pub mod simconfig;
pub mod tileindex;
pub mod tilemap;
pub mod worldtime;
