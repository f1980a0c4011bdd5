use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Render-side data the simulation reads. Only `size` matters here: it is the
/// bounding box used to build the collision rectangle.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Graphics {
    pub size: Vec2,
}

impl Graphics {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }
}
