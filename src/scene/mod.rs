// Scene module - the walkthrough simulation core.
//
// Everything here is a pure data/geometry transform: the host owns the GPU,
// the assets and the window, and reaches us through `renderer::SceneRenderer`
// and `input::InputState`.

pub mod animation;
pub mod components;
pub mod config;
pub mod context;
pub mod input;
pub mod placement;
pub mod player;
pub mod renderer;
pub mod wander;
pub mod zone;

// Re-export commonly used items
pub use components::*;
pub use context::Scene;
