//! Trajectory rings drawn under each orbiting body

use crate::system::{BodyId, FrameSnapshot, SolarSystem};
use orrery_core::constants::{MOON_RING_HALF_WIDTH, PLANET_RING_HALF_WIDTH, RING_SPIN_PER_FRAME};
use orrery_core::Position3D;

/// Flat annulus lying in the xz plane
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitRing {
    pub body: BodyId,
    pub center: Position3D,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Accumulated rotation about the ring normal (radians)
    pub spin: f64,
    /// Body whose position the ring is centred on, if any
    pub follows: Option<BodyId>,
}

/// Rings for every orbiting body of a system
#[derive(Clone, Debug, Default)]
pub struct RingSet {
    rings: Vec<OrbitRing>,
}

impl RingSet {
    /// One ring per planet and moon; fixed bodies get none
    pub fn for_system(system: &SolarSystem) -> Self {
        let rings = system
            .ids()
            .filter_map(|id| {
                let distance = system.body(id).orbit.distance();
                if system.period(id).is_none() || distance <= 0.0 {
                    return None;
                }
                let follows = system.parent(id);
                let half_width = if follows.is_some() {
                    MOON_RING_HALF_WIDTH
                } else {
                    PLANET_RING_HALF_WIDTH
                };
                Some(OrbitRing {
                    body: id,
                    center: Position3D::ORIGIN,
                    inner_radius: (distance - half_width).max(0.0),
                    outer_radius: distance + half_width,
                    spin: 0.0,
                    follows,
                })
            })
            .collect();
        Self { rings }
    }

    /// Per-frame update: spin every ring and recentre moon rings on their parents
    pub fn advance(&mut self, snapshot: &FrameSnapshot) {
        for ring in &mut self.rings {
            ring.spin += RING_SPIN_PER_FRAME;
            if let Some(parent) = ring.follows {
                ring.center = snapshot.position(parent);
            }
        }
    }

    pub fn rings(&self) -> &[OrbitRing] {
        &self.rings
    }

    pub fn ring_for(&self, body: BodyId) -> Option<&OrbitRing> {
        self.rings.iter().find(|r| r.body == body)
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use orrery_core::SimTime;

    #[test]
    fn test_ring_per_orbiting_body() {
        let system = SolarSystem::default();
        let rings = RingSet::for_system(&system);
        assert_eq!(rings.len(), 13);
        assert!(rings.ring_for(system.id_of("Sun").unwrap()).is_none());

        let earth = rings.ring_for(system.id_of("Earth").unwrap()).unwrap();
        assert_eq!((earth.inner_radius, earth.outer_radius), (19.5, 20.5));

        let phobos = rings.ring_for(system.id_of("Phobos").unwrap()).unwrap();
        assert_relative_eq!(phobos.inner_radius, 1.4);
        assert_relative_eq!(phobos.outer_radius, 1.6);
    }

    #[test]
    fn test_moon_rings_follow_parent() {
        let system = SolarSystem::default();
        let mut rings = RingSet::for_system(&system);
        let snapshot = system.snapshot(SimTime(4242.0));
        rings.advance(&snapshot);

        let io = rings.ring_for(system.id_of("Io").unwrap()).unwrap();
        assert_eq!(io.center, snapshot.position(system.id_of("Jupiter").unwrap()));

        let mars = rings.ring_for(system.id_of("Mars").unwrap()).unwrap();
        assert_eq!(mars.center, Position3D::ORIGIN);
    }

    #[test]
    fn test_spin_accumulates_per_frame() {
        let system = SolarSystem::default();
        let mut rings = RingSet::for_system(&system);
        let snapshot = system.snapshot(SimTime(0.0));
        for _ in 0..10 {
            rings.advance(&snapshot);
        }
        for ring in rings.rings() {
            assert_relative_eq!(ring.spin, 10.0 * RING_SPIN_PER_FRAME, epsilon = 1e-12);
        }
    }
}
