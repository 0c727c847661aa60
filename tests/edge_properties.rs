//! Property checks for point generation and the proximity edge set.

use glam::{Quat, Vec3};
use particle_backdrop::{PointField, ProximityEdgeSet, Transform};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const THRESHOLD: f32 = 30.0;

/// Pairs this close to the threshold can flip under f32 rounding.
const BORDER: f32 = 1e-3;

fn random_field(seed: u64, count: u32) -> PointField {
    let mut rng = SmallRng::seed_from_u64(seed);
    PointField::generate(count, 100.0, &mut rng)
}

fn random_rigid(rng: &mut SmallRng) -> (Quat, Vec3) {
    let axis = Vec3::new(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    )
    .try_normalize()
    .unwrap_or(Vec3::Y);
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let offset = Vec3::new(
        rng.gen_range(-50.0..50.0),
        rng.gen_range(-50.0..50.0),
        rng.gen_range(-50.0..50.0),
    );
    (Quat::from_axis_angle(axis, angle), offset)
}

#[test]
fn test_generated_points_stay_in_cube() {
    for seed in 0..5 {
        let field = random_field(seed, 2000);
        assert_eq!(field.len(), 2000);
        for p in field.positions() {
            assert!(p.abs().max_element() <= 100.0, "{:?} outside cube", p);
        }
    }
}

#[test]
fn test_grid_builder_matches_brute_force() {
    for seed in 20..24 {
        let field = random_field(seed, 2000);
        let brute = ProximityEdgeSet::build(field.positions(), THRESHOLD);
        let grid = ProximityEdgeSet::build_grid(field.positions(), THRESHOLD);
        assert_eq!(brute, grid, "seed {}", seed);
    }
}

#[test]
fn test_edge_count_unchanged_by_axis_rotations() {
    let field = random_field(32, 800);
    let points = field.positions();
    let original = ProximityEdgeSet::build(points, THRESHOLD);

    // Turns that only swap and negate x/y (and flip z) keep every distance bit-exact
    let turns: [fn(Vec3) -> Vec3; 3] = [
        |p| Vec3::new(-p.y, p.x, p.z),
        |p| Vec3::new(p.y, p.x, -p.z),
        |p| Vec3::new(-p.x, -p.y, p.z),
    ];
    for turn in turns {
        let moved: Vec<Vec3> = points.iter().map(|p| turn(*p)).collect();
        let rebuilt = ProximityEdgeSet::build(&moved, THRESHOLD);
        assert_eq!(rebuilt.len(), original.len());
        assert_eq!(rebuilt, original);
    }
}

#[test]
fn test_edges_invariant_under_rigid_motion() {
    let field = random_field(31, 500);
    let points = field.positions();
    let original = ProximityEdgeSet::build(points, THRESHOLD);
    let mut rng = SmallRng::seed_from_u64(99);

    for _ in 0..5 {
        let (rotation, offset) = random_rigid(&mut rng);
        let moved: Vec<Vec3> = points.iter().map(|p| rotation * *p + offset).collect();
        let rebuilt = ProximityEdgeSet::build(&moved, THRESHOLD);

        let mut border_pairs = 0;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let d = points[i].distance(points[j]);
                if (d - THRESHOLD).abs() < BORDER {
                    border_pairs += 1;
                    continue;
                }
                assert_eq!(
                    original.contains(i as u32, j as u32),
                    rebuilt.contains(i as u32, j as u32),
                    "pair ({}, {}) at distance {}",
                    i,
                    j,
                    d
                );
            }
        }
        assert!(original.len().abs_diff(rebuilt.len()) <= border_pairs);
    }
}

#[test]
fn test_frame_transform_preserves_distances() {
    let field = random_field(41, 200);
    let points = field.positions();
    let transform = Transform {
        rotation: Vec3::new(0.37, 1.2, 0.0),
        position: Vec3::new(0.0, 4.5, 0.0),
    };
    let m = transform.matrix();

    for i in (0..points.len()).step_by(7) {
        for j in (1..points.len()).step_by(11) {
            let before = points[i].distance(points[j]);
            let after = m.transform_point3(points[i]).distance(m.transform_point3(points[j]));
            assert!((before - after).abs() < 1e-3, "{} vs {}", before, after);
        }
    }
}
