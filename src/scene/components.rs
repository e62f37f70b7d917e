// Core ECS components shared by scenery props and NPCs.

use bevy_ecs::prelude::*;
use glam::Vec3;

use super::placement::PlacedInstance;
use super::renderer::NodeId;

/// Position and orientation of an entity in the scene.
#[derive(Component, Debug, Clone, Copy)]
pub struct Transform {
    pub position: Vec3,
    /// Rotation about +Y in radians; 0 faces +Z.
    pub yaw: f32,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

impl From<PlacedInstance> for Transform {
    fn from(inst: PlacedInstance) -> Self {
        Self {
            position: inst.position,
            yaw: inst.yaw,
            scale: inst.scale,
        }
    }
}

/// Marks static scenery generated by the placement batch. Never mutated
/// after spawn.
#[derive(Component, Debug, Clone, Copy)]
pub struct Prop;

/// The scene-graph node the host renderer created for this entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct RenderNode(pub NodeId);
