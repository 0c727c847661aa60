//! Proximity edges between nearby points.
//!
//! An edge `(i, j)` with `i < j` exists exactly when the distance between
//! points `i` and `j` is strictly below the threshold. The set is computed
//! once at setup and never tracks the per-frame transform: the transform is
//! rigid, so pairwise distances of the rendered points never change.
//!
//! Two builders produce identical sets:
//! - [`ProximityEdgeSet::build`] tests all `n * (n - 1) / 2` pairs.
//! - [`ProximityEdgeSet::build_grid`] buckets points into cubic cells with
//!   side `threshold` and only tests the 27 cells around each point.

use std::collections::HashMap;

use glam::{IVec3, Vec3};

use crate::config::EdgeBuilder;

/// Largest cell coordinate the grid builder addresses. Neighbor offsets of
/// +-1 must stay inside `i32`.
pub const MAX_GRID_CELL: f32 = (i32::MAX / 2) as f32;

/// Unordered set of point-index pairs closer than a threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityEdgeSet {
    /// Sorted lexicographically, `i < j` for every pair.
    edges: Vec<(u32, u32)>,
    threshold: f32,
}

impl ProximityEdgeSet {
    /// Build with the requested algorithm.
    pub fn build_with(builder: EdgeBuilder, points: &[Vec3], threshold: f32) -> Self {
        match builder {
            EdgeBuilder::BruteForce => Self::build(points, threshold),
            EdgeBuilder::Grid => Self::build_grid(points, threshold),
        }
    }

    /// Test every pair of points.
    pub fn build(points: &[Vec3], threshold: f32) -> Self {
        let mut edges = Vec::new();

        for (i, a) in points.iter().enumerate() {
            for (j, b) in points.iter().enumerate().skip(i + 1) {
                if a.distance(*b) < threshold {
                    edges.push((i as u32, j as u32));
                }
            }
        }

        Self { edges, threshold }
    }

    /// Hash points into a uniform grid and test neighboring cells only.
    ///
    /// Falls back to [`build`](Self::build) when the threshold is too small
    /// for cell coordinates to fit in `i32`.
    pub fn build_grid(points: &[Vec3], threshold: f32) -> Self {
        if !(threshold > 0.0) {
            return Self { edges: Vec::new(), threshold };
        }

        let max_coord = points.iter().fold(0.0_f32, |m, p| m.max(p.abs().max_element()));
        if !(max_coord / threshold <= MAX_GRID_CELL) {
            return Self::build(points, threshold);
        }

        let cell_of = |p: Vec3| -> IVec3 { (p / threshold).floor().as_ivec3() };

        let mut cells: HashMap<IVec3, Vec<u32>> = HashMap::new();
        for (i, p) in points.iter().enumerate() {
            cells.entry(cell_of(*p)).or_default().push(i as u32);
        }

        let mut edges = Vec::new();
        for (i, a) in points.iter().enumerate() {
            let my_cell = cell_of(*a);
            for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        let Some(bucket) = cells.get(&(my_cell + IVec3::new(dx, dy, dz))) else {
                            continue;
                        };
                        for &j in bucket {
                            if j as usize <= i {
                                continue;
                            }
                            if a.distance(points[j as usize]) < threshold {
                                edges.push((i as u32, j));
                            }
                        }
                    }
                }
            }
        }
        edges.sort_unstable();

        Self { edges, threshold }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    #[inline]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// All pairs, sorted, `i < j`.
    #[inline]
    pub fn pairs(&self) -> &[(u32, u32)] {
        &self.edges
    }

    /// Whether `i` and `j` are joined. Argument order does not matter.
    pub fn contains(&self, i: u32, j: u32) -> bool {
        let key = if i < j { (i, j) } else { (j, i) };
        self.edges.binary_search(&key).is_ok()
    }

    /// Flattened segment endpoints (`a0, b0, a1, b1, ...`) for a line-list mesh.
    pub fn segments(&self, points: &[Vec3]) -> Vec<Vec3> {
        let mut out = Vec::with_capacity(self.edges.len() * 2);
        for &(i, j) in &self.edges {
            out.push(points[i as usize]);
            out.push(points[j as usize]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::PointField;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn sample(count: u32, seed: u64) -> PointField {
        PointField::generate(count, 100.0, &mut SmallRng::seed_from_u64(seed))
    }

    #[test]
    fn test_edges_match_distance_predicate() {
        let field = sample(400, 3);
        let points = field.positions();
        let edges = ProximityEdgeSet::build(points, 30.0);

        for i in 0..points.len() {
            for j in 0..points.len() {
                let expected = i != j && points[i].distance(points[j]) < 30.0;
                assert_eq!(edges.contains(i as u32, j as u32), expected, "pair ({}, {})", i, j);
            }
        }
    }

    #[test]
    fn test_no_self_or_duplicate_edges() {
        let edges = ProximityEdgeSet::build(sample(500, 4).positions(), 30.0);
        assert!(!edges.is_empty());
        assert!(edges.pairs().iter().all(|&(i, j)| i < j));
        assert!(edges.pairs().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_threshold_is_strict() {
        let points = [Vec3::ZERO, Vec3::new(30.0, 0.0, 0.0), Vec3::new(0.0, 29.5, 0.0)];
        let edges = ProximityEdgeSet::build(&points, 30.0);
        assert_eq!(edges.pairs(), &[(0, 2)]);
    }

    #[test]
    fn test_grid_matches_brute_force() {
        for seed in 0..4 {
            let field = sample(600, seed);
            let brute = ProximityEdgeSet::build(field.positions(), 30.0);
            let grid = ProximityEdgeSet::build_grid(field.positions(), 30.0);
            assert_eq!(brute, grid, "seed {}", seed);
        }
    }

    #[test]
    fn test_grid_handles_cell_boundaries() {
        // Neighbors straddling a cell edge at x = 0 and negative coordinates
        let points = [
            Vec3::new(-0.5, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::new(-29.0, -29.0, -29.0),
            Vec3::new(-31.0, -31.0, -31.0),
        ];
        let brute = ProximityEdgeSet::build(&points, 30.0);
        let grid = ProximityEdgeSet::build_grid(&points, 30.0);
        assert_eq!(brute, grid);
        assert!(grid.contains(0, 1));
        assert!(grid.contains(2, 3));
    }

    #[test]
    fn test_non_positive_threshold_is_empty() {
        let field = sample(50, 5);
        assert!(ProximityEdgeSet::build(field.positions(), 0.0).is_empty());
        assert!(ProximityEdgeSet::build_grid(field.positions(), -1.0).is_empty());
    }

    #[test]
    fn test_grid_with_tiny_threshold_falls_back() {
        let points = [Vec3::new(99.0, 99.0, 99.0), Vec3::new(-99.0, 0.0, 0.0), Vec3::new(99.0, 99.0, 99.0)];
        let grid = ProximityEdgeSet::build_grid(&points, 1e-9);
        assert_eq!(grid, ProximityEdgeSet::build(&points, 1e-9));
        assert_eq!(grid.pairs(), &[(0, 2)]);
    }

    #[test]
    fn test_segments_follow_pairs() {
        let points = [Vec3::ZERO, Vec3::X, Vec3::new(100.0, 0.0, 0.0)];
        let edges = ProximityEdgeSet::build(&points, 2.0);
        assert_eq!(edges.segments(&points), vec![Vec3::ZERO, Vec3::X]);
    }
}
