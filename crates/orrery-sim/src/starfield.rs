//! Background starfield

use orrery_core::constants::{STARFIELD_EXTENT, STAR_COUNT};
use orrery_core::Position3D;

/// Point cloud filling a cube centred on the origin
#[derive(Clone, Debug, PartialEq)]
pub struct Starfield {
    pub extent: f64,
    points: Vec<Position3D>,
}

impl Starfield {
    /// Generate `count` stars uniformly in a cube of edge `extent` (deterministic)
    pub fn generate(count: usize, extent: f64, seed: u64) -> Self {
        let mut rng = seed;
        let mut rand = || {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (rng >> 33) as f64 / ((1u64 << 31) as f64)
        };

        let points = (0..count)
            .map(|_| {
                let x = (rand() - 0.5) * extent;
                let y = (rand() - 0.5) * extent;
                let z = (rand() - 0.5) * extent;
                Position3D::new(x, y, z)
            })
            .collect();

        Self { extent, points }
    }

    pub fn points(&self) -> &[Position3D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for Starfield {
    fn default() -> Self {
        Self::generate(STAR_COUNT, STARFIELD_EXTENT, 42)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_per_seed() {
        let a = Starfield::generate(500, 2000.0, 7);
        let b = Starfield::generate(500, 2000.0, 7);
        let c = Starfield::generate(500, 2000.0, 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_points_inside_cube() {
        let field = Starfield::default();
        assert_eq!(field.len(), STAR_COUNT);
        let half = STARFIELD_EXTENT / 2.0;
        for p in field.points() {
            assert!(p.x >= -half && p.x < half);
            assert!(p.y >= -half && p.y < half);
            assert!(p.z >= -half && p.z < half);
        }
    }
}
