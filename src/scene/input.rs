// Input state tracking for the keyboard.
// Abstracts winit events into a queryable per-frame snapshot.

use std::collections::HashSet;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Controller-facing view of the movement keys held this frame. Rebuilt from
/// scratch every frame; the controllers never see raw key codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub sprint: bool,
}

pub struct InputState {
    keys_held: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_held: HashSet::new(),
        }
    }

    /// Feed a winit WindowEvent into the input state.
    /// Call this once per event before the frame's update runs.
    pub fn process_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if let PhysicalKey::Code(key) = event.physical_key {
                match event.state {
                    ElementState::Pressed => {
                        self.keys_held.insert(key);
                    }
                    ElementState::Released => {
                        self.keys_held.remove(&key);
                    }
                }
            }
        }
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Project the held keys into the snapshot the controllers consume.
    pub fn snapshot(&self) -> KeySnapshot {
        KeySnapshot {
            forward: self.is_key_held(KeyCode::KeyW),
            backward: self.is_key_held(KeyCode::KeyS),
            left: self.is_key_held(KeyCode::KeyA),
            right: self.is_key_held(KeyCode::KeyD),
            jump: self.is_key_held(KeyCode::Space),
            sprint: self.is_key_held(KeyCode::ShiftLeft) || self.is_key_held(KeyCode::ShiftRight),
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
