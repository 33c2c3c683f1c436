//! Time sources for the frame loop

use crate::constants::TIME_SCALE;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Simulation time in seconds (scaled wall-clock milliseconds)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct SimTime(pub f64);

impl SimTime {
    pub fn from_unix_millis(ms: i64) -> Self {
        Self(ms as f64 * TIME_SCALE)
    }

    pub fn seconds(&self) -> f64 {
        self.0
    }

    /// Shift forward by `seconds` of simulation time
    pub fn offset(&self, seconds: f64) -> Self {
        Self(self.0 + seconds)
    }
}

/// Source of "now" for the frame loop
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;

    fn sim_time(&self) -> SimTime {
        SimTime::from_unix_millis(self.now_millis())
    }
}

/// Wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_millis() as i64,
            Err(e) => -(e.duration().as_millis() as i64),
        }
    }
}

/// Manually driven clock for tests and replays
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn new(millis: i64) -> Self {
        Self { millis: AtomicI64::new(millis) }
    }

    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}
