// Simulation core for an interactive 3D walkthrough scene: a landmark on a
// square base, a pedestrian path, procedurally scattered scenery, wandering
// NPCs and a third-person player avatar.
//
// Rendering, asset decoding and UI live in the host application behind the
// `SceneRenderer` trait; this crate only produces and mutates transforms.

pub mod scene;
