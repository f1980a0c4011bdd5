//! Error taxonomy for the simulation core.
//!
//! Tile lookups outside the authored map are not errors: they come back as
//! `None` from [`TileIndex`](crate::resources::tileindex::TileIndex).

use std::path::PathBuf;

use bevy_ecs::entity::Entity;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// A component assumed present is missing. Setup bug, never retried.
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },

    #[error("entity {0} does not exist")]
    NoSuchEntity(Entity),

    /// An AI component points at an entity that no longer has a position.
    #[error("entity {entity} references {referenced}, which no longer exists")]
    InvalidEntityReference { entity: Entity, referenced: Entity },

    #[error("entity {entity} has a non-finite velocity")]
    NonFiniteVelocity { entity: Entity },

    #[error("config {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("level: {0}")]
    Level(String),

    #[error("level json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
