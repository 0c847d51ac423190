//! Collision hulls and 2D transforms
//!
//! Each moving entity kind has a fixed local-space polygon used for mesh
//! wall collision. Vertices are in a unit-ish box around the origin and get
//! scaled by `Motion::scale`, so the same hull serves every size of fish.

use glam::{Affine2, Vec2};

use super::components::Motion;

/// Which hull polygon an entity carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HullKind {
    Salmon,
    Fish,
    Turtle,
}

/// Rough salmon silhouette: nose right, tail fork left
static SALMON_HULL: [Vec2; 7] = [
    Vec2::new(0.5, 0.0),
    Vec2::new(0.25, -0.35),
    Vec2::new(-0.2, -0.25),
    Vec2::new(-0.5, -0.45),
    Vec2::new(-0.35, 0.0),
    Vec2::new(-0.5, 0.45),
    Vec2::new(0.25, 0.35),
];

/// Small fish: simple diamond
static FISH_HULL: [Vec2; 4] = [
    Vec2::new(0.5, 0.0),
    Vec2::new(0.0, -0.4),
    Vec2::new(-0.5, 0.0),
    Vec2::new(0.0, 0.4),
];

/// Turtle shell: flattened hexagon
static TURTLE_HULL: [Vec2; 6] = [
    Vec2::new(0.5, 0.0),
    Vec2::new(0.25, -0.45),
    Vec2::new(-0.25, -0.45),
    Vec2::new(-0.5, 0.0),
    Vec2::new(-0.25, 0.45),
    Vec2::new(0.25, 0.45),
];

impl HullKind {
    /// Local-space vertices of this hull
    pub fn vertices(self) -> &'static [Vec2] {
        match self {
            HullKind::Salmon => &SALMON_HULL,
            HullKind::Fish => &FISH_HULL,
            HullKind::Turtle => &TURTLE_HULL,
        }
    }
}

/// Local-to-world transform for a motion: translate . rotate . scale
pub fn world_transform(motion: &Motion) -> Affine2 {
    Affine2::from_scale_angle_translation(motion.scale, motion.angle, motion.position)
}

/// Hull vertices in world space
pub fn world_vertices(kind: HullKind, motion: &Motion) -> impl Iterator<Item = Vec2> + '_ {
    let xf = world_transform(motion);
    kind.vertices().iter().map(move |v| xf.transform_point2(*v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform_keeps_vertices() {
        let motion = Motion::default();
        let local = HullKind::Fish.vertices();
        for (world, expect) in world_vertices(HullKind::Fish, &motion).zip(local) {
            assert!((world - *expect).length() < 1e-6);
        }
    }

    #[test]
    fn test_translation_and_scale() {
        let motion = Motion {
            position: Vec2::new(100.0, 50.0),
            scale: Vec2::new(10.0, 20.0),
            ..Motion::default()
        };
        // Nose vertex (0.5, 0.0) lands at 100 + 0.5 * 10
        let nose = world_vertices(HullKind::Fish, &motion).next().unwrap();
        assert!((nose - Vec2::new(105.0, 50.0)).length() < 1e-4);
    }

    #[test]
    fn test_rotation_half_turn_flips_nose() {
        let motion = Motion {
            angle: std::f32::consts::PI,
            scale: Vec2::new(2.0, 2.0),
            ..Motion::default()
        };
        let nose = world_vertices(HullKind::Fish, &motion).next().unwrap();
        assert!((nose - Vec2::new(-1.0, 0.0)).length() < 1e-5);
    }
}
