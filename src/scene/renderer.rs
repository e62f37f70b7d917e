// Seam to the host 3D renderer.
//
// The simulation owns no GPU or asset state. It resolves model paths to
// opaque handles, instances them as scene-graph nodes, and pushes transform
// updates back once per tick. Asset decoding, materials and the actual draw
// all live on the other side of this trait.

use std::collections::HashMap;
use std::collections::HashSet;

use glam::Vec3;
use thiserror::Error;

/// Opaque handle to a loaded model asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelHandle(pub u32);

/// Opaque handle to a scene-graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("model {path:?} failed to load: {reason}")]
    LoadFailed { path: String, reason: String },
}

/// What the simulation needs from the host renderer.
pub trait SceneRenderer {
    /// Resolve a model asset to a handle. Placement keyed to a model does
    /// not start until this has returned.
    fn load_model(&mut self, path: &str) -> Result<ModelHandle, AssetError>;

    /// Instance a loaded model into the scene graph.
    fn add_node(&mut self, model: ModelHandle, position: Vec3, yaw: f32, scale: f32) -> NodeId;

    /// Move and re-orient an existing node.
    fn set_node_transform(&mut self, node: NodeId, position: Vec3, yaw: f32);

    fn remove_node(&mut self, node: NodeId);

    /// Present one frame.
    fn render(&mut self);
}

// ============================================================================
// RECORDING RENDERER
// ============================================================================

/// Node state as last pushed by the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedNode {
    pub model: ModelHandle,
    pub position: Vec3,
    pub yaw: f32,
    pub scale: f32,
}

/// Headless renderer that records every call.
///
/// Backs the demo binary and the tests; a real renderer implements the same
/// trait on top of its scene graph.
pub struct RecordingRenderer {
    /// Loaded model paths, indexed by `ModelHandle`.
    pub models: Vec<String>,
    pub nodes: HashMap<NodeId, RecordedNode>,
    /// Paths that refuse to load, for exercising the skip-on-failure path.
    pub fail_paths: HashSet<String>,
    pub frames_rendered: u64,
    next_node: u64,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            models: Vec::new(),
            nodes: HashMap::new(),
            fail_paths: HashSet::new(),
            frames_rendered: 0,
            next_node: 0,
        }
    }

    /// Handle of an already-loaded model, by path.
    pub fn model_handle(&self, path: &str) -> Option<ModelHandle> {
        self.models
            .iter()
            .position(|p| p == path)
            .map(|i| ModelHandle(i as u32))
    }

    /// All live nodes instancing `model`.
    pub fn nodes_of(&self, model: ModelHandle) -> Vec<&RecordedNode> {
        self.nodes.values().filter(|n| n.model == model).collect()
    }
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRenderer for RecordingRenderer {
    fn load_model(&mut self, path: &str) -> Result<ModelHandle, AssetError> {
        if self.fail_paths.contains(path) {
            return Err(AssetError::LoadFailed {
                path: path.to_string(),
                reason: "asset unavailable".to_string(),
            });
        }
        if let Some(handle) = self.model_handle(path) {
            return Ok(handle);
        }
        self.models.push(path.to_string());
        Ok(ModelHandle(self.models.len() as u32 - 1))
    }

    fn add_node(&mut self, model: ModelHandle, position: Vec3, yaw: f32, scale: f32) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes.insert(
            id,
            RecordedNode {
                model,
                position,
                yaw,
                scale,
            },
        );
        id
    }

    fn set_node_transform(&mut self, node: NodeId, position: Vec3, yaw: f32) {
        if let Some(recorded) = self.nodes.get_mut(&node) {
            recorded.position = position;
            recorded.yaw = yaw;
        }
    }

    fn remove_node(&mut self, node: NodeId) {
        self.nodes.remove(&node);
    }

    fn render(&mut self) {
        self.frames_rendered += 1;
    }
}
