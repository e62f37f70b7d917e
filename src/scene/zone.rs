// Ground-plane geometry for procedural placement.
//
// All placement decisions happen on the XZ plane. A `Vec2` in this module is
// (world X, world Z), the same flattening the movement code uses.

use glam::Vec2;
use rand::Rng;

// ============================================================================
// RECT
// ============================================================================

/// Axis-aligned rectangle on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Square rect centered on the origin, `extent` world units on a side.
    pub fn from_extent(extent: f32) -> Self {
        let half = extent * 0.5;
        Self {
            min: Vec2::splat(-half),
            max: Vec2::splat(half),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Uniform draw over the rectangle, inclusive of the edges. Degenerate
    /// axes (zero width, or `min > max` from a negative extent) collapse to
    /// `min` on that axis instead of panicking.
    pub fn sample(&self, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            sample_axis(self.min.x, self.max.x, rng),
            sample_axis(self.min.y, self.max.y, rng),
        )
    }
}

fn sample_axis(min: f32, max: f32, rng: &mut impl Rng) -> f32 {
    if min < max { rng.gen_range(min..=max) } else { min }
}

// ============================================================================
// EXCLUSION ZONE
// ============================================================================

/// Forbidden-placement predicate for scenery and NPC wander targets.
///
/// A ground point is excluded when any of three conditions holds:
/// - it lies in the band around the pedestrian path (which runs along Z),
/// - it lies inside the landmark base square plus its clearance,
/// - it lies inside the reserved approach interval on X.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExclusionZone {
    /// Half-width of the pedestrian path.
    pub path_half_width: f32,
    /// Extra clearance kept around both the path and the base.
    pub clearance: f32,
    /// Half-extent of the square base under the landmark.
    pub base_half: f32,
    /// Half-width of the reserved x-interval crossing the whole ground.
    pub forbidden_half: f32,
}

impl ExclusionZone {
    /// True when `p` must stay free of placed objects.
    pub fn excludes(&self, p: Vec2) -> bool {
        let near_path = p.x.abs() < self.path_half_width + self.clearance;
        let near_base = p.x.abs() < self.base_half + self.clearance
            && p.y.abs() < self.base_half + self.clearance;
        let reserved = p.x.abs() < self.forbidden_half;
        near_path || near_base || reserved
    }
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

    #[test]
    fn path_band_excludes_across_full_span() {
        let z = zone();
        assert!(z.excludes(Vec2::new(0.0, 3000.0)));
        assert!(z.excludes(Vec2::new(-69.9, -3000.0)));
    }

    #[test]
    fn reserved_interval_extends_past_path_band() {
        let z = zone();
        // 70..75 off the path band but still inside the reserved interval.
        assert!(z.excludes(Vec2::new(72.0, 1000.0)));
        assert!(!z.excludes(Vec2::new(76.0, 1000.0)));
    }

    #[test]
    fn base_square_needs_both_axes() {
        let z = zone();
        assert!(z.excludes(Vec2::new(-300.0, 300.0)));
        // Same x, but far enough along z to clear the base square.
        assert!(!z.excludes(Vec2::new(-300.0, 500.0)));
        // Just outside the clearance on x.
        assert!(!z.excludes(Vec2::new(-395.1, 300.0)));
    }

    #[test]
    fn inverted_rect_collapses_to_its_min_corner() {
        let rect = Rect::from_extent(-100.0);
        assert!(rect.min.x > rect.max.x);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            assert_eq!(rect.sample(&mut rng), rect.min);
        }
    }

    #[test]
    fn rect_sampling_stays_inside() {
        let rect = Rect::from_extent(200.0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(rect.contains(rect.sample(&mut rng)));
        }
    }
}
