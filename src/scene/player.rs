// Third-person player controller.
//
// One action per frame, resolved from the key snapshot by fixed priority.
// Movement is applied along the controller's local forward/strafe axes and
// the follow camera trails by the identical world-space translation, not a
// physically simulated follow.

use glam::Vec3;

use super::animation::{AnimationPlayer, Clip};
use super::input::KeySnapshot;

/// Walk speed, world units per second.
pub const WALK_SPEED: f32 = 18.0;
/// Sprint speed, world units per second.
pub const SPRINT_SPEED: f32 = 120.0;

/// The single action a frame's input resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Jump,
    Sprint,
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    Idle,
}

impl PlayerAction {
    /// Fixed-priority resolution:
    /// jump > sprint > forward > backward > strafe-left > strafe-right > idle.
    /// Sprint is the forward+sprint chord; sprint alone does nothing.
    pub fn resolve(keys: &KeySnapshot) -> Self {
        if keys.jump {
            Self::Jump
        } else if keys.forward && keys.sprint {
            Self::Sprint
        } else if keys.forward {
            Self::Forward
        } else if keys.backward {
            Self::Backward
        } else if keys.left {
            Self::StrafeLeft
        } else if keys.right {
            Self::StrafeRight
        } else {
            Self::Idle
        }
    }

    /// Clip driven while this action is active.
    fn clip(self) -> Clip {
        match self {
            Self::Jump => Clip::Jump,
            Self::Sprint => Clip::Run,
            Self::Idle => Clip::Idle,
            Self::Forward | Self::Backward | Self::StrafeLeft | Self::StrafeRight => Clip::Walk,
        }
    }
}

/// Player avatar state plus its trailing camera.
pub struct Player {
    pub position: Vec3,
    /// Rotation about +Y in radians; 0 faces +Z.
    pub yaw: f32,
    pub animation: AnimationPlayer,
    pub camera_position: Vec3,
}

impl Player {
    pub fn new(position: Vec3, camera_offset: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            animation: AnimationPlayer::new(Clip::Idle),
            camera_position: position + camera_offset,
        }
    }

    /// Local forward axis; +Z when yaw is 0.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    /// Local strafe axis; +X when yaw is 0.
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// One frame of player simulation. Returns the resolved action so the
    /// caller can log or inspect it.
    pub fn update(&mut self, keys: &KeySnapshot, dt: f32) -> PlayerAction {
        let action = PlayerAction::resolve(keys);
        self.animation.play(action.clip());
        self.animation.advance(dt);

        let delta = match action {
            PlayerAction::Sprint => self.forward() * SPRINT_SPEED * dt,
            PlayerAction::Forward => self.forward() * WALK_SPEED * dt,
            PlayerAction::Backward => -self.forward() * WALK_SPEED * dt,
            PlayerAction::StrafeLeft => -self.right() * WALK_SPEED * dt,
            PlayerAction::StrafeRight => self.right() * WALK_SPEED * dt,
            PlayerAction::Jump | PlayerAction::Idle => Vec3::ZERO,
        };
        self.position += delta;
        // Camera keeps its offset by trailing the exact same translation.
        self.camera_position += delta;
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn keys() -> KeySnapshot {
        KeySnapshot::default()
    }

    #[test]
    fn jump_outranks_everything() {
        let snapshot = KeySnapshot {
            jump: true,
            sprint: true,
            forward: true,
            backward: true,
            left: true,
            right: true,
        };
        assert_eq!(PlayerAction::resolve(&snapshot), PlayerAction::Jump);
    }

    #[test]
    fn sprint_requires_forward_chord() {
        let mut snapshot = keys();
        snapshot.sprint = true;
        assert_eq!(PlayerAction::resolve(&snapshot), PlayerAction::Idle);
        snapshot.forward = true;
        assert_eq!(PlayerAction::resolve(&snapshot), PlayerAction::Sprint);
    }

    #[test]
    fn forward_outranks_strafe() {
        let snapshot = KeySnapshot {
            forward: true,
            left: true,
            ..keys()
        };
        assert_eq!(PlayerAction::resolve(&snapshot), PlayerAction::Forward);
        let snapshot = KeySnapshot {
            left: true,
            right: true,
            ..keys()
        };
        assert_eq!(PlayerAction::resolve(&snapshot), PlayerAction::StrafeLeft);
    }

    #[test]
    fn walking_moves_along_local_forward_and_camera_trails() {
        let mut player = Player::new(Vec3::new(80.0, 5.0, 40.0), Vec3::new(0.0, 10.0, 30.0));
        player.yaw = FRAC_PI_2; // facing +X

        let snapshot = KeySnapshot {
            forward: true,
            ..keys()
        };
        player.update(&snapshot, 1.0);

        assert!((player.position.x - 98.0).abs() < 1e-4);
        assert!((player.position.z - 40.0).abs() < 1e-3);
        // Offset preserved exactly.
        let offset = player.camera_position - player.position;
        assert!((offset - Vec3::new(0.0, 10.0, 30.0)).length() < 1e-4);
    }

    #[test]
    fn jump_and_idle_do_not_translate() {
        let start = Vec3::new(1.0, 5.0, 2.0);
        let mut player = Player::new(start, Vec3::ZERO);

        let snapshot = KeySnapshot {
            jump: true,
            ..keys()
        };
        player.update(&snapshot, 0.5);
        assert_eq!(player.position, start);
        assert_eq!(player.animation.current(), Clip::Jump);

        player.update(&keys(), 0.5);
        assert_eq!(player.position, start);
        assert_eq!(player.animation.current(), Clip::Idle);
    }

    #[test]
    fn holding_a_key_does_not_restart_the_clip() {
        let mut player = Player::new(Vec3::ZERO, Vec3::ZERO);
        let snapshot = KeySnapshot {
            forward: true,
            ..keys()
        };
        player.update(&snapshot, 0.4);
        player.update(&snapshot, 0.4);
        assert_eq!(player.animation.current(), Clip::Walk);
        assert!((player.animation.elapsed() - 0.8).abs() < 1e-6);
    }
}
