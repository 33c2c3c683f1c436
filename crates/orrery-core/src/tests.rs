use crate::clock::*;
use crate::constants::TIME_SCALE;
use crate::coordinates::*;
use approx::assert_relative_eq;

#[test]
fn test_sim_time_scaling() {
    let t = SimTime::from_unix_millis(1_700_000_000_000);
    assert_relative_eq!(t.seconds(), 1_700_000_000_000.0 * TIME_SCALE);
    assert_relative_eq!(t.seconds(), 1_700_000_000.0);
}

#[test]
fn test_manual_clock_advance() {
    let clock = ManualClock::new(1_000);
    clock.advance(500);
    assert_eq!(clock.now_millis(), 1_500);
    assert_relative_eq!(clock.sim_time().seconds(), 1.5);

    clock.set(0);
    assert_eq!(clock.sim_time(), SimTime(0.0));
}

#[test]
fn test_system_clock_is_after_2020() {
    // 2020-01-01T00:00:00Z
    assert!(SystemClock.now_millis() > 1_577_836_800_000);
}

#[test]
fn test_planar_distance_ignores_height() {
    let a = Position3D::new(3.0, 10.0, 4.0);
    assert_relative_eq!(a.planar_distance(&Position3D::ORIGIN), 5.0);
    assert!(a.distance(&Position3D::ORIGIN) > 5.0);
}

#[test]
fn test_bounds() {
    assert!(Bounds::of(&[]).is_none());

    let points = [
        Position3D::new(1.0, -2.0, 3.0),
        Position3D::new(-1.0, 4.0, 0.0),
        Position3D::new(0.5, 0.0, 7.0),
    ];
    let bounds = Bounds::of(&points).unwrap();
    assert_eq!(bounds.min, Position3D::new(-1.0, -2.0, 0.0));
    assert_eq!(bounds.max, Position3D::new(1.0, 4.0, 7.0));
    assert_eq!(bounds.center(), Position3D::new(0.0, 1.0, 3.5));
}

#[test]
fn test_vector_conversions() {
    let p = Position3D::new(1.0, 2.0, 3.0);
    let back: Position3D = p.to_vector().into();
    assert_eq!(p, back);

    let arr: [f64; 3] = p.scaled(2.0).into();
    assert_eq!(arr, [2.0, 4.0, 6.0]);
}

#[test]
fn test_trajectory_path_length() {
    use crate::trajectory::TrajectorySample;

    let sample: TrajectorySample = [
        Position3D::new(0.0, 0.0, 0.0),
        Position3D::new(3.0, 0.0, 4.0),
        Position3D::new(3.0, 2.0, 4.0),
    ]
    .into_iter()
    .collect();

    assert_eq!(sample.len(), 3);
    assert_relative_eq!(sample.path_length(), 7.0);
    assert!(TrajectorySample::empty().bounds().is_none());
}
