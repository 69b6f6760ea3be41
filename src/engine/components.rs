// ECS components shared between the simulation and whatever renders it.

use bevy_ecs::prelude::*;
use glam::Vec3;

/// World-space placement the renderer reads each frame.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform {
    pub position: Vec3,
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self { position }
    }
}
