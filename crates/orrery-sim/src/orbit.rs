//! Closed-form circular orbits
//!
//! Positions are a direct function of simulation time: no integrator and no
//! retained state, so evaluating twice at the same `t` gives identical output.

use nalgebra::Vector3;
use orrery_core::{Position3D, SimTime};

/// Phase angle `speed * t`
#[inline]
pub fn phase(speed: f64, t: SimTime) -> f64 {
    speed * t.seconds()
}

/// Planet on a circle of radius `distance` in the xz plane around the origin
pub fn planet_position(distance: f64, speed: f64, t: SimTime) -> Position3D {
    let angle = phase(speed, t);
    Position3D::new(distance * angle.cos(), 0.0, distance * angle.sin())
}

/// Offset of a moon from its parent.
///
/// The in-plane components shrink by `cos(inclination)` and the height is
/// fixed at `distance * sin(inclination)`.
pub fn moon_offset(distance: f64, speed: f64, inclination: f64, t: SimTime) -> Vector3<f64> {
    let angle = phase(speed, t);
    let tilt = inclination.cos();
    Vector3::new(
        distance * angle.cos() * tilt,
        distance * inclination.sin(),
        distance * angle.sin() * tilt,
    )
}

/// Moon position given the parent's position from the same frame.
///
/// Only x and z follow the parent; y is the absolute tilt height.
pub fn moon_position(
    parent: Position3D,
    distance: f64,
    speed: f64,
    inclination: f64,
    t: SimTime,
) -> Position3D {
    let offset = moon_offset(distance, speed, inclination, t);
    Position3D::new(parent.x + offset.x, offset.y, parent.z + offset.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    const TIMES: [f64; 5] = [0.0, 1.0, 1234.5, 1.7e9, -42.0];

    #[test]
    fn test_planet_distance_invariant() {
        for t in TIMES {
            let p = planet_position(20.0, 0.003, SimTime(t));
            assert_eq!(p.y, 0.0);
            assert_relative_eq!(p.planar_distance(&Position3D::ORIGIN), 20.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_planet_at_zero_phase() {
        let p = planet_position(10.0, 0.005, SimTime(0.0));
        assert_eq!(p, Position3D::new(10.0, 0.0, 0.0));

        // Quarter turn lands on +z
        let quarter = SimTime(TAU / 4.0 / 0.005);
        let p = planet_position(10.0, 0.005, quarter);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.z, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_planet_periodicity() {
        let speed = 0.004;
        let period = TAU / speed;
        for t in [0.0, 17.0, 999.25] {
            let a = planet_position(15.0, speed, SimTime(t));
            let b = planet_position(15.0, speed, SimTime(t + period));
            assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
            assert_relative_eq!(a.z, b.z, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_moon_offset_geometry() {
        let (distance, inclination) = (3.0, 0.1);
        for t in TIMES {
            let offset = moon_offset(distance, 0.01, inclination, SimTime(t));
            let planar = (offset.x * offset.x + offset.z * offset.z).sqrt();
            assert_relative_eq!(planar, distance * inclination.cos(), epsilon = 1e-9);
            assert_relative_eq!(offset.y, distance * inclination.sin(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_moon_tracks_parent_shift() {
        let t = SimTime(321.0);
        let parent = Position3D::new(20.0, 0.0, -4.0);
        let shifted = Position3D::new(27.5, 0.0, -1.0);

        let a = moon_position(parent, 3.0, 0.01, 0.1, t);
        let b = moon_position(shifted, 3.0, 0.01, 0.1, t);

        assert_relative_eq!(b.x - a.x, 7.5, epsilon = 1e-12);
        assert_relative_eq!(b.z - a.z, 3.0, epsilon = 1e-12);
        assert_eq!(a.y, b.y);
    }

    #[test]
    fn test_moon_height_ignores_parent_height() {
        let t = SimTime(5.0);
        let low = moon_position(Position3D::new(0.0, 0.0, 0.0), 2.0, 0.02, 0.3, t);
        let high = moon_position(Position3D::new(0.0, 9.0, 0.0), 2.0, 0.02, 0.3, t);
        assert_eq!(low, high);
    }
}
