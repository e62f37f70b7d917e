// Procedural scenery placement: deterministic scatter along edge lines plus
// rejection sampling inside an exclusion zone. One-shot batch computations;
// the results are immutable once generated.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::Rng;
use thiserror::Error;

use super::zone::{ExclusionZone, Rect};

/// Upper bound on rejection-sampling draws before the zone is declared
/// saturated. A zone that rejects this many consecutive uniform draws has no
/// usable free area left, which is a configuration mistake.
pub const MAX_SAMPLE_ATTEMPTS: u32 = 10_000;

#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("exclusion zone rejected {0} consecutive samples; no free area in bounds")]
    ZoneSaturated(u32),
}

/// A static scenery transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedInstance {
    pub position: Vec3,
    /// Rotation about +Y in radians.
    pub yaw: f32,
    pub scale: f32,
}

// ============================================================================
// EDGE SCATTER
// ============================================================================

/// Which ground axis an edge line runs along.
#[derive(Debug, Clone, Copy)]
pub enum Edge {
    /// Line parallel to Z at fixed `x`.
    AlongZ { x: f32 },
    /// Line parallel to X at fixed `z`.
    AlongX { z: f32 },
}

/// One edge-scatter pass: candidate positions along `edge`, covering `span`
/// world units at `spacing` intervals.
#[derive(Debug, Clone, Copy)]
pub struct EdgeScatter {
    pub edge: Edge,
    pub span: f32,
    pub spacing: f32,
    /// Fixed orientation for every instance on this edge, perpendicular to
    /// the edge line.
    pub yaw: f32,
    pub height: f32,
    pub scale: f32,
}

/// Deterministic scatter along one edge line.
///
/// Candidates step half-open from `-span/2` to `+span/2`; a candidate is
/// emitted only when the zone does not exclude it. No randomness: identical
/// inputs produce an identical instance set.
pub fn scatter_edge(spec: &EdgeScatter, zone: &ExclusionZone) -> Vec<PlacedInstance> {
    let mut out = Vec::new();
    if spec.spacing <= 0.0 {
        // Degenerate spacing yields nothing rather than looping forever.
        return out;
    }

    let mut t = -spec.span * 0.5;
    while t < spec.span * 0.5 {
        let p = match spec.edge {
            Edge::AlongZ { x } => Vec2::new(x, t),
            Edge::AlongX { z } => Vec2::new(t, z),
        };
        if !zone.excludes(p) {
            out.push(PlacedInstance {
                position: Vec3::new(p.x, spec.height, p.y),
                yaw: spec.yaw,
                scale: spec.scale,
            });
        }
        t += spec.spacing;
    }
    out
}

// ============================================================================
// REJECTION SAMPLING
// ============================================================================

/// Uniform draw from `bounds` that avoids the zone, by rejection.
///
/// Resamples until a draw lands outside the excluded area, up to
/// [`MAX_SAMPLE_ATTEMPTS`]; past that the zone is treated as saturated and
/// the call fails instead of spinning.
pub fn sample_clear_point(
    bounds: &Rect,
    zone: &ExclusionZone,
    rng: &mut impl Rng,
) -> Result<Vec2, PlacementError> {
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let p = bounds.sample(rng);
        if !zone.excludes(p) {
            return Ok(p);
        }
    }
    Err(PlacementError::ZoneSaturated(MAX_SAMPLE_ATTEMPTS))
}

/// Parameters shared by every instance of one random-scatter batch.
#[derive(Debug, Clone, Copy)]
pub struct RandomScatter {
    pub count: usize,
    pub height: f32,
    pub scale_min: f32,
    pub scale_max: f32,
}

/// Rejection-sampled scatter: `count` instances uniformly distributed over
/// the admissible part of `bounds`, each with a random yaw in `[0, 2π)` and a
/// random scale in `[scale_min, scale_max]`.
pub fn scatter_random(
    bounds: &Rect,
    spec: &RandomScatter,
    zone: &ExclusionZone,
    rng: &mut impl Rng,
) -> Result<Vec<PlacedInstance>, PlacementError> {
    let mut out = Vec::with_capacity(spec.count);
    for _ in 0..spec.count {
        let p = sample_clear_point(bounds, zone, rng)?;
        out.push(PlacedInstance {
            position: Vec3::new(p.x, spec.height, p.y),
            yaw: rng.gen_range(0.0..TAU),
            scale: rng.gen_range(spec.scale_min..=spec.scale_max),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn zone() -> ExclusionZone {
        ExclusionZone {
            path_half_width: 50.0,
            clearance: 20.0,
            base_half: 375.0,
            forbidden_half: 75.0,
        }
    }

    fn left_path_edge(zone: &ExclusionZone) -> EdgeScatter {
        EdgeScatter {
            edge: Edge::AlongZ {
                x: -(zone.path_half_width + zone.clearance),
            },
            span: 7000.0,
            spacing: 10.0,
            yaw: std::f32::consts::FRAC_PI_2,
            height: 1.0,
            scale: 0.2,
        }
    }

    #[test]
    fn edge_scatter_never_violates_zone() {
        let zone = zone();
        for inst in scatter_edge(&left_path_edge(&zone), &zone) {
            assert!(!zone.excludes(Vec2::new(inst.position.x, inst.position.z)));
        }
    }

    #[test]
    fn edge_scatter_is_deterministic() {
        let zone = zone();
        let spec = left_path_edge(&zone);
        assert_eq!(scatter_edge(&spec, &zone), scatter_edge(&spec, &zone));
    }

    #[test]
    fn path_edge_suppressed_by_reserved_interval() {
        // The edge line sits at x = -70, inside the reserved |x| < 75 band,
        // so every candidate is rejected.
        let zone = zone();
        assert!(scatter_edge(&left_path_edge(&zone), &zone).is_empty());
    }

    #[test]
    fn relaxing_reserved_interval_restores_one_instance_per_step() {
        let mut zone = zone();
        zone.forbidden_half = 60.0;
        let spec = left_path_edge(&zone);
        let placed = scatter_edge(&spec, &zone);

        // One candidate per 10-unit step over [-3500, 3500), minus the steps
        // blocked by the base clearance band |z| < 395.
        let steps = (spec.span / spec.spacing) as usize;
        let blocked = placed
            .iter()
            .filter(|i| i.position.z.abs() < zone.base_half + zone.clearance)
            .count();
        assert_eq!(blocked, 0);
        let expected = steps - 79; // z in {-390, -380, ..., 390}
        assert_eq!(placed.len(), expected);
    }

    #[test]
    fn degenerate_spacing_yields_empty_batch() {
        let zone = zone();
        let mut spec = left_path_edge(&zone);
        spec.spacing = 0.0;
        assert!(scatter_edge(&spec, &zone).is_empty());
    }

    #[test]
    fn inverted_bounds_yield_degenerate_samples_not_a_panic() {
        // A negative extent flips min past max; sampling must degrade to the
        // corner point rather than abort the placement batch.
        let zone = zone();
        let bounds = Rect::new(Vec2::new(600.0, 500.0), Vec2::new(400.0, 300.0));
        let mut rng = StdRng::seed_from_u64(4);
        let p = sample_clear_point(&bounds, &zone, &mut rng).unwrap();
        assert_eq!(p, bounds.min);
        assert!(!zone.excludes(p));
    }

    #[test]
    fn random_scatter_honors_zone_and_bounds() {
        let zone = zone();
        let bounds = Rect::from_extent(7000.0);
        let mut rng = StdRng::seed_from_u64(42);
        let spec = RandomScatter {
            count: 200,
            height: 0.0,
            scale_min: 0.8,
            scale_max: 1.6,
        };
        let placed = scatter_random(&bounds, &spec, &zone, &mut rng).unwrap();
        assert_eq!(placed.len(), spec.count);
        for inst in &placed {
            let p = Vec2::new(inst.position.x, inst.position.z);
            assert!(bounds.contains(p));
            assert!(!zone.excludes(p));
            assert!(inst.yaw >= 0.0 && inst.yaw < TAU);
            assert!(inst.scale >= spec.scale_min && inst.scale <= spec.scale_max);
        }
    }

    #[test]
    fn random_scatter_spreads_over_admissible_region() {
        // Coarse uniformity check: both X half-planes and both Z half-planes
        // should each receive a healthy share of a seeded 400-instance batch.
        let zone = zone();
        let bounds = Rect::from_extent(7000.0);
        let mut rng = StdRng::seed_from_u64(9);
        let spec = RandomScatter {
            count: 400,
            height: 0.0,
            scale_min: 1.0,
            scale_max: 1.0,
        };
        let placed = scatter_random(&bounds, &spec, &zone, &mut rng).unwrap();
        let west = placed.iter().filter(|i| i.position.x < 0.0).count();
        let north = placed.iter().filter(|i| i.position.z < 0.0).count();
        assert!((100..=300).contains(&west));
        assert!((100..=300).contains(&north));
    }

    #[test]
    fn saturated_zone_fails_loudly() {
        // Zone swallows the whole bounds: every sample is rejected.
        let zone = ExclusionZone {
            path_half_width: 5000.0,
            clearance: 0.0,
            base_half: 0.0,
            forbidden_half: 0.0,
        };
        let bounds = Rect::from_extent(1000.0);
        let mut rng = StdRng::seed_from_u64(1);
        let err = sample_clear_point(&bounds, &zone, &mut rng).unwrap_err();
        assert!(matches!(err, PlacementError::ZoneSaturated(MAX_SAMPLE_ATTEMPTS)));
    }
}
