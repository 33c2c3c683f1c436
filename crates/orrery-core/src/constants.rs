/// Wall-clock milliseconds to simulation time (seconds)
pub const TIME_SCALE: f64 = 0.001;

/// Horizons coordinates to display units for the asteroid overlay
pub const ASTEROID_SCALE: f64 = 1000.0;

/// Ring spin per rendered frame (radians)
pub const RING_SPIN_PER_FRAME: f64 = 0.001;

/// Half-width of a planet's trajectory ring
pub const PLANET_RING_HALF_WIDTH: f64 = 0.5;

/// Half-width of a moon's trajectory ring
pub const MOON_RING_HALF_WIDTH: f64 = 0.1;

/// Number of background stars
pub const STAR_COUNT: usize = 10_000;

/// Edge length of the cube the starfield fills
pub const STARFIELD_EXTENT: f64 = 2000.0;
