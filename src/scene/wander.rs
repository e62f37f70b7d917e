// NPC wander behavior: steer toward the current target at fixed speed,
// re-target on arrival.

use bevy_ecs::prelude::*;
use glam::Vec2;
use rand::Rng;

use super::animation::{AnimationPlayer, Clip};
use super::components::Transform;
use super::placement::{PlacementError, sample_clear_point};
use super::zone::{ExclusionZone, Rect};

/// Ground speed of wandering NPCs, world units per second.
pub const NPC_WALK_SPEED: f32 = 30.0;

/// Per-NPC steering state. The target is ephemeral: it is replaced by a
/// fresh draw from the catchment rect every time the NPC reaches it.
#[derive(Component, Debug, Clone, Copy)]
pub struct Wanderer {
    /// Current destination on the ground plane.
    pub target: Vec2,
    pub speed: f32,
}

/// Advance every wandering NPC by `dt`.
///
/// Arrival is detected when the remaining distance is smaller than this
/// tick's step (`speed * dt`): the NPC skips movement for one tick and draws
/// a fresh target, which prevents overshoot oscillation around the target
/// point. Targets come from the same rejection sampler as spawn points, so
/// they never land inside the exclusion zone.
pub fn update_wanderers(
    world: &mut World,
    dt: f32,
    catchment: &Rect,
    zone: &ExclusionZone,
    rng: &mut impl Rng,
) -> Result<(), PlacementError> {
    let mut query = world.query::<(&mut Transform, &mut Wanderer, &mut AnimationPlayer)>();
    for (mut transform, mut wanderer, mut animation) in query.iter_mut(world) {
        let here = Vec2::new(transform.position.x, transform.position.z);
        let to_target = wanderer.target - here;
        let dist = to_target.length();
        let step = wanderer.speed * dt;

        if dist < step || dist == 0.0 {
            wanderer.target = sample_clear_point(catchment, zone, rng)?;
        } else {
            let next = here + to_target / dist * step;
            transform.position.x = next.x;
            transform.position.z = next.y;
            // Face the target; yaw 0 looks along +Z.
            transform.yaw = to_target.x.atan2(to_target.y);
        }

        animation.play(Clip::Walk);
        animation.advance(dt);
    }
    Ok(())
}
