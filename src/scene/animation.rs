// Per-entity animation clip state machine.
//
// Each animated entity owns one player; players are advanced independently
// with the tick's dt, so there is no cross-entity synchronization.

use bevy_ecs::prelude::*;

/// The animation clips shipped with the avatar rigs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clip {
    Idle,
    Walk,
    Run,
    Jump,
}

/// Minimal clip state machine: one active clip plus its local time.
///
/// `play` transitions only when the requested clip differs from the current
/// one, so re-triggering the active clip every frame is a no-op and does not
/// restart it.
#[derive(Component, Debug, Clone, Copy)]
pub struct AnimationPlayer {
    current: Clip,
    elapsed: f32,
}

impl AnimationPlayer {
    pub fn new(clip: Clip) -> Self {
        Self {
            current: clip,
            elapsed: 0.0,
        }
    }

    pub fn current(&self) -> Clip {
        self.current
    }

    /// Local time of the active clip in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Switch clips; restarts local time only on an actual transition.
    pub fn play(&mut self, clip: Clip) {
        if self.current != clip {
            self.current = clip;
            self.elapsed = 0.0;
        }
    }

    /// Advance the active clip's local time.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }
}
