//! Simulation configuration resource.
//!
//! Tuning loaded from an INI file. Every field has a default so a missing or
//! partial file still yields a usable configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [tiles]
//! width = 32
//! height = 32
//!
//! [physics]
//! max_fall_speed = 17
//! neighbor_radius = 1
//! ground_layer = 0
//! gravity = 1
//!
//! [player]
//! speed = 5
//! jump_velocity = -15
//!
//! [enemies]
//! walker_speed = 2
//! follower_speed = 3
//! follow_range = 10
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;

use crate::error::SimError;

const DEFAULT_TILE_WIDTH: f32 = 32.0;
const DEFAULT_TILE_HEIGHT: f32 = 32.0;
/// Caps `vel.y` before it moves anything; large steps otherwise tunnel.
const DEFAULT_MAX_FALL_SPEED: f32 = 17.0;
const DEFAULT_NEIGHBOR_RADIUS: i32 = 1;
const DEFAULT_GROUND_LAYER: usize = 0;
const DEFAULT_GRAVITY: f32 = 1.0;
const DEFAULT_PLAYER_SPEED: f32 = 5.0;
const DEFAULT_JUMP_VELOCITY: f32 = -15.0;
const DEFAULT_WALKER_SPEED: f32 = 2.0;
const DEFAULT_FOLLOWER_SPEED: f32 = 3.0;
const DEFAULT_FOLLOW_RANGE: f32 = 10.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Cell width in pixels.
    pub tile_width: f32,
    /// Cell height in pixels.
    pub tile_height: f32,
    pub max_fall_speed: f32,
    /// Radius, in tiles, of the neighbourhood checked for solid tiles.
    pub neighbor_radius: i32,
    /// Layer consulted by AI footing and ledge checks.
    pub ground_layer: usize,
    pub gravity: f32,
    pub player_speed: f32,
    pub jump_velocity: f32,
    pub walker_speed: f32,
    pub follower_speed: f32,
    pub follow_range: f32,
    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self {
            tile_width: DEFAULT_TILE_WIDTH,
            tile_height: DEFAULT_TILE_HEIGHT,
            max_fall_speed: DEFAULT_MAX_FALL_SPEED,
            neighbor_radius: DEFAULT_NEIGHBOR_RADIUS,
            ground_layer: DEFAULT_GROUND_LAYER,
            gravity: DEFAULT_GRAVITY,
            player_speed: DEFAULT_PLAYER_SPEED,
            jump_velocity: DEFAULT_JUMP_VELOCITY,
            walker_speed: DEFAULT_WALKER_SPEED,
            follower_speed: DEFAULT_FOLLOWER_SPEED,
            follow_range: DEFAULT_FOLLOW_RANGE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load values from `config_path`. Missing keys keep their current values.
    pub fn load_from_file(&mut self) -> Result<(), SimError> {
        let mut ini = Ini::new();
        ini.load(&self.config_path)
            .map_err(|reason| self.config_error(reason))?;
        self.apply(&ini);
        info!("Loaded config from {:?}: {:?}", self.config_path, self);
        Ok(())
    }

    /// Same as [`load_from_file`](Self::load_from_file) but from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), SimError> {
        let mut ini = Ini::new();
        ini.read(text.to_string())
            .map_err(|reason| self.config_error(reason))?;
        self.apply(&ini);
        Ok(())
    }

    pub fn save_to_file(&self) -> Result<(), SimError> {
        let mut ini = Ini::new();

        ini.set("tiles", "width", Some(self.tile_width.to_string()));
        ini.set("tiles", "height", Some(self.tile_height.to_string()));

        ini.set("physics", "max_fall_speed", Some(self.max_fall_speed.to_string()));
        ini.set("physics", "neighbor_radius", Some(self.neighbor_radius.to_string()));
        ini.set("physics", "ground_layer", Some(self.ground_layer.to_string()));
        ini.set("physics", "gravity", Some(self.gravity.to_string()));

        ini.set("player", "speed", Some(self.player_speed.to_string()));
        ini.set("player", "jump_velocity", Some(self.jump_velocity.to_string()));

        ini.set("enemies", "walker_speed", Some(self.walker_speed.to_string()));
        ini.set("enemies", "follower_speed", Some(self.follower_speed.to_string()));
        ini.set("enemies", "follow_range", Some(self.follow_range.to_string()));

        ini.write(&self.config_path)?;
        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }

    fn apply(&mut self, ini: &Ini) {
        let float = |section: &str, key: &str| ini.getfloat(section, key).ok().flatten();

        if let Some(v) = float("tiles", "width") {
            self.tile_width = v as f32;
        }
        if let Some(v) = float("tiles", "height") {
            self.tile_height = v as f32;
        }

        if let Some(v) = float("physics", "max_fall_speed") {
            self.max_fall_speed = v as f32;
        }
        if let Some(v) = ini.getint("physics", "neighbor_radius").ok().flatten() {
            self.neighbor_radius = v as i32;
        }
        if let Some(v) = ini.getuint("physics", "ground_layer").ok().flatten() {
            self.ground_layer = v as usize;
        }
        if let Some(v) = float("physics", "gravity") {
            self.gravity = v as f32;
        }

        if let Some(v) = float("player", "speed") {
            self.player_speed = v as f32;
        }
        if let Some(v) = float("player", "jump_velocity") {
            self.jump_velocity = v as f32;
        }

        if let Some(v) = float("enemies", "walker_speed") {
            self.walker_speed = v as f32;
        }
        if let Some(v) = float("enemies", "follower_speed") {
            self.follower_speed = v as f32;
        }
        if let Some(v) = float("enemies", "follow_range") {
            self.follow_range = v as f32;
        }
    }

    fn config_error(&self, reason: String) -> SimError {
        SimError::Config {
            path: self.config_path.clone(),
            reason,
        }
    }
}
