use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Scene-space position (display units, y is "up")
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position3D {
    pub const ORIGIN: Position3D = Position3D { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Multiply every component by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Distance from `other` measured in the xz (orbital) plane
    pub fn planar_distance(&self, other: &Position3D) -> f64 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    pub fn distance(&self, other: &Position3D) -> f64 {
        (self.to_vector() - other.to_vector()).norm()
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<Vector3<f64>> for Position3D {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<[f64; 3]> for Position3D {
    fn from(p: [f64; 3]) -> Self {
        Self::new(p[0], p[1], p[2])
    }
}

impl From<Position3D> for [f64; 3] {
    fn from(p: Position3D) -> Self {
        [p.x, p.y, p.z]
    }
}

/// Axis-aligned bounds of a point sequence
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Position3D,
    pub max: Position3D,
}

impl Bounds {
    /// Returns None for an empty sequence
    pub fn of(points: &[Position3D]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points.iter().skip(1).fold((first, first), |(lo, hi), p| {
            (
                Position3D::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                Position3D::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        });
        Some(Self { min, max })
    }

    pub fn center(&self) -> Position3D {
        Position3D::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }
}
