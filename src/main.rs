// Walkthrough demo binary.
//
// Drives the simulation core at the host frame rate with the recording
// renderer standing in for a real one: the window exists for input and
// pacing, the "frames" are transform pushes. A real renderer plugs in
// through the same SceneRenderer trait.

use std::time::Instant;

use winit::{
    event::{ElementState, Event as WinitEvent, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use promenade::scene::Scene;
use promenade::scene::config::SceneConfig;
use promenade::scene::input::InputState;
use promenade::scene::renderer::{RecordingRenderer, SceneRenderer};

fn main() {
    env_logger::init();

    // Optional config path as the first argument; defaults otherwise.
    let config = match std::env::args().nth(1) {
        Some(path) => match SceneConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{err}");
                std::process::exit(1);
            }
        },
        None => SceneConfig::default(),
    };

    let mut renderer = RecordingRenderer::new();
    let mut scene = match Scene::build(config, &mut renderer) {
        Ok(scene) => scene,
        Err(err) => {
            log::error!("scene build failed: {err}");
            std::process::exit(1);
        }
    };
    let mut input = InputState::new();

    let event_loop = EventLoop::new().unwrap();
    let window_attributes = Window::default_attributes()
        .with_title("Promenade - walkthrough simulation")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
    #[allow(deprecated)]
    let window = std::sync::Arc::new(event_loop.create_window(window_attributes).unwrap());

    let mut last_update = Instant::now();
    let mut frame_count = 0u32;
    let mut last_stats = Instant::now();

    #[allow(deprecated)]
    event_loop
        .run(move |event, control_flow| {
            match event {
                WinitEvent::WindowEvent {
                    ref event,
                    window_id,
                } if window_id == window.id() => {
                    input.process_event(event);
                    match event {
                        WindowEvent::CloseRequested
                        | WindowEvent::KeyboardInput {
                            event:
                                KeyEvent {
                                    state: ElementState::Pressed,
                                    physical_key: PhysicalKey::Code(KeyCode::Escape),
                                    ..
                                },
                            ..
                        } => {
                            scene.teardown(&mut renderer);
                            control_flow.exit();
                        }
                        WindowEvent::RedrawRequested => {
                            let now = Instant::now();
                            let dt = (now - last_update).as_secs_f32();
                            last_update = now;

                            if let Err(err) = scene.update(&input.snapshot(), dt, &mut renderer) {
                                log::error!("simulation halted: {err}");
                                control_flow.exit();
                                return;
                            }
                            renderer.render();

                            frame_count += 1;
                            if (now - last_stats).as_secs_f32() >= 1.0 {
                                log::info!(
                                    "fps: {} | npcs: {} | nodes: {}",
                                    frame_count,
                                    scene.npc_count(),
                                    renderer.nodes.len()
                                );
                                frame_count = 0;
                                last_stats = now;
                            }
                        }
                        _ => {}
                    }
                }
                WinitEvent::AboutToWait => {
                    window.request_redraw();
                }
                _ => {}
            }
        })
        .unwrap();
}
