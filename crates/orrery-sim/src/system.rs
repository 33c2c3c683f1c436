//! Solar system state management

use crate::bodies::{CelestialBody, Orbit, SystemConfig};
use crate::error::ConfigResult;
use crate::orbit::{moon_position, planet_position};
use orrery_core::{Position3D, SimTime};

/// Index of a body in its `SolarSystem`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// Every body's position at one instant
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub time: SimTime,
    positions: Vec<Position3D>,
}

impl FrameSnapshot {
    pub fn position(&self, id: BodyId) -> Position3D {
        self.positions[id.0]
    }

    pub fn positions(&self) -> &[Position3D] {
        &self.positions
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, Position3D)> + '_ {
        self.positions.iter().enumerate().map(|(i, p)| (BodyId(i), *p))
    }
}

/// Validated body catalog with resolved parent links
pub struct SolarSystem {
    bodies: Vec<CelestialBody>,
    /// Parent of each body (Some only for moons)
    parents: Vec<Option<BodyId>>,
    /// Non-moons first, then moons, so one pass sees parents before children
    eval_order: Vec<BodyId>,
}

impl SolarSystem {
    /// Build from a catalog, rejecting unresolved or nested parents
    pub fn new(config: SystemConfig) -> ConfigResult<Self> {
        config.validate()?;
        let system = Self::from_validated(config.bodies);
        tracing::debug!("Solar system built with {} bodies", system.len());
        Ok(system)
    }

    fn from_validated(bodies: Vec<CelestialBody>) -> Self {
        let parents: Vec<Option<BodyId>> = bodies
            .iter()
            .map(|b| {
                b.orbit
                    .parent()
                    .and_then(|p| bodies.iter().position(|other| other.name == p))
                    .map(BodyId)
            })
            .collect();

        let (moons, others): (Vec<BodyId>, Vec<BodyId>) = (0..bodies.len())
            .map(BodyId)
            .partition(|id| bodies[id.0].orbit.is_moon());
        let eval_order = others.into_iter().chain(moons).collect();

        Self { bodies, parents, eval_order }
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> &CelestialBody {
        &self.bodies[id.0]
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn id_of(&self, name: &str) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.name == name).map(BodyId)
    }

    pub fn parent(&self, id: BodyId) -> Option<BodyId> {
        self.parents[id.0]
    }

    pub fn ids(&self) -> impl Iterator<Item = BodyId> {
        (0..self.bodies.len()).map(BodyId)
    }

    /// Position of one body at `t`.
    ///
    /// A moon's parent is evaluated at the same `t`.
    pub fn position(&self, id: BodyId, t: SimTime) -> Position3D {
        let parent = self.parent(id).map(|p| self.position(p, t));
        self.evaluate(id, parent, t)
    }

    /// Evaluate every body in one pass
    pub fn snapshot(&self, t: SimTime) -> FrameSnapshot {
        let mut positions = vec![Position3D::ORIGIN; self.bodies.len()];

        for &id in &self.eval_order {
            let parent = self.parent(id).map(|p| positions[p.0]);
            positions[id.0] = self.evaluate(id, parent, t);
        }

        FrameSnapshot { time: t, positions }
    }

    fn evaluate(&self, id: BodyId, parent: Option<Position3D>, t: SimTime) -> Position3D {
        match &self.body(id).orbit {
            Orbit::Fixed => Position3D::ORIGIN,
            Orbit::Planet { distance, speed } => planet_position(*distance, *speed, t),
            Orbit::Moon { distance, speed, inclination, .. } => moon_position(
                parent.unwrap_or(Position3D::ORIGIN),
                *distance,
                *speed,
                *inclination,
                t,
            ),
        }
    }

    /// Revolution period of a body, None for fixed bodies
    pub fn period(&self, id: BodyId) -> Option<f64> {
        self.body(id).orbit.period()
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::from_validated(SystemConfig::default().bodies)
    }
}
