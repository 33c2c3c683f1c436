use crate::coordinates::{Bounds, Position3D};
use serde::{Deserialize, Serialize};

/// Ordered point sequence drawn as a single line.
///
/// Replaced wholesale on update; never merged or appended to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrajectorySample {
    points: Vec<Position3D>,
}

impl TrajectorySample {
    pub fn new(points: Vec<Position3D>) -> Self {
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
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

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(&self.points)
    }

    /// Sum of segment lengths
    pub fn path_length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }
}

impl FromIterator<Position3D> for TrajectorySample {
    fn from_iter<I: IntoIterator<Item = Position3D>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
