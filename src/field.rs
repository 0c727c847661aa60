//! The point field: N random points in a cube, plus the rigid transform the
//! renderer applies to it each frame.

use glam::{EulerRot, Mat4, Vec3};
use rand::Rng;

/// Fixed, ordered set of randomly placed points.
///
/// Positions never change after construction. Motion is expressed through a
/// [`Transform`] applied to the whole field by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct PointField {
    positions: Vec<Vec3>,
}

impl PointField {
    /// Sample `count` points uniformly from `[-half_extent, half_extent)^3`.
    ///
    /// # Panics
    ///
    /// Panics if `half_extent` is not positive; validate configs first.
    pub fn generate<R: Rng>(count: u32, half_extent: f32, rng: &mut R) -> Self {
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-half_extent..half_extent),
                    rng.gen_range(-half_extent..half_extent),
                    rng.gen_range(-half_extent..half_extent),
                )
            })
            .collect();

        Self { positions }
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Whole-object rotation (XYZ Euler angles, radians) and translation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub rotation: Vec3,
    pub position: Vec3,
}

impl Transform {
    /// Model matrix: rotate about the origin, then translate.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_count_and_bounds() {
        let mut rng = SmallRng::seed_from_u64(1);
        let field = PointField::generate(2000, 100.0, &mut rng);

        assert_eq!(field.len(), 2000);
        for p in field.positions() {
            for c in p.to_array() {
                assert!((-100.0..=100.0).contains(&c), "coordinate {} out of range", c);
            }
        }
    }

    #[test]
    fn test_generate_is_seeded() {
        let a = PointField::generate(50, 10.0, &mut SmallRng::seed_from_u64(9));
        let b = PointField::generate(50, 10.0, &mut SmallRng::seed_from_u64(9));
        let c = PointField::generate(50, 10.0, &mut SmallRng::seed_from_u64(10));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_empty_field() {
        let field = PointField::generate(0, 100.0, &mut SmallRng::seed_from_u64(0));
        assert!(field.is_empty());
    }

    #[test]
    fn test_transform_matrix_translates_after_rotating() {
        let transform = Transform {
            rotation: Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            position: Vec3::new(0.0, 1.0, 0.0),
        };
        let p = transform.matrix().transform_point3(Vec3::X);
        // +X rotated a quarter turn about Y lands on -Z
        assert!((p - Vec3::new(0.0, 1.0, -1.0)).length() < 1e-5);
    }
}
