//! Periodic asteroid trajectory refresh
//!
//! A background task alternates between `Idle` and `Fetching`. Each tick it
//! fetches one Horizons body, and on success publishes the scaled trajectory
//! through a watch channel; the frame loop picks it up on its next pass.
//! Failed cycles are logged and counted, and the last good trajectory stays
//! published.

use crate::error::EphemerisResult;
use crate::horizons::{parse_ephemeris, EphemerisSource};
use orrery_core::constants::ASTEROID_SCALE;
use orrery_core::TrajectorySample;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::MissedTickBehavior;

/// Shortest accepted time between fetch starts
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Refresher configuration
#[derive(Clone, Debug)]
pub struct RefresherConfig {
    /// Time between fetch starts
    pub interval: Duration,
    /// Multiplier applied to every coordinate
    pub scale: f64,
}

impl Default for RefresherConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            scale: ASTEROID_SCALE,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RefreshState {
    #[default]
    Idle,
    Fetching,
}

/// Counters describing the refresher's history
#[derive(Clone, Debug, Default)]
pub struct RefresherStats {
    pub state: RefreshState,
    pub cycles: u64,
    pub successes: u64,
    pub failures: u64,
    pub last_points: usize,
    pub last_error: Option<String>,
}

/// Run one fetch-parse-publish cycle.
///
/// Publishes only on success; on failure the receiver keeps the previous value.
pub async fn refresh_once<S: EphemerisSource>(
    source: &S,
    scale: f64,
    publish: &watch::Sender<Arc<TrajectorySample>>,
) -> EphemerisResult<usize> {
    let body = source.fetch().await?;
    let sample = parse_ephemeris(&body, scale)?;
    let points = sample.len();
    publish.send_replace(Arc::new(sample));
    Ok(points)
}

/// Handle to a running refresher task
pub struct RefresherHandle {
    trajectory: watch::Receiver<Arc<TrajectorySample>>,
    shutdown: watch::Sender<bool>,
    stats: Arc<RwLock<RefresherStats>>,
    task: JoinHandle<()>,
}

impl RefresherHandle {
    /// New receiver for the published trajectory
    pub fn subscribe(&self) -> watch::Receiver<Arc<TrajectorySample>> {
        self.trajectory.clone()
    }

    /// Most recently published trajectory
    pub fn current(&self) -> Arc<TrajectorySample> {
        self.trajectory.borrow().clone()
    }

    pub fn stats(&self) -> RefresherStats {
        self.stats.read().clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the loop and wait for the task to exit.
    ///
    /// An in-flight fetch is abandoned.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        let _ = self.shutdown.send(true);
        self.task.await
    }
}

/// Spawn the refresh loop on the current tokio runtime
pub fn spawn_refresher<S: EphemerisSource>(source: S, config: RefresherConfig) -> RefresherHandle {
    spawn_refresher_with_initial(source, config, TrajectorySample::empty())
}

/// Spawn with a trajectory to show until the first successful fetch
pub fn spawn_refresher_with_initial<S: EphemerisSource>(
    source: S,
    mut config: RefresherConfig,
    initial: TrajectorySample,
) -> RefresherHandle {
    if config.interval < MIN_INTERVAL {
        tracing::warn!("Refresh interval {:?} too short, using {:?}", config.interval, MIN_INTERVAL);
        config.interval = MIN_INTERVAL;
    }

    let (trajectory_tx, trajectory_rx) = watch::channel(Arc::new(initial));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let stats = Arc::new(RwLock::new(RefresherStats::default()));

    let task = tokio::spawn(run_loop(source, config, trajectory_tx, shutdown_rx, stats.clone()));

    RefresherHandle {
        trajectory: trajectory_rx,
        shutdown: shutdown_tx,
        stats,
        task,
    }
}

async fn run_loop<S: EphemerisSource>(
    source: S,
    config: RefresherConfig,
    publish: watch::Sender<Arc<TrajectorySample>>,
    mut shutdown: watch::Receiver<bool>,
    stats: Arc<RwLock<RefresherStats>>,
) {
    tracing::info!(
        "Trajectory refresher started for {} (every {:?})",
        source.describe(),
        config.interval
    );

    // First tick completes immediately
    let mut ticker = tokio::time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {}
        }

        stats.write().state = RefreshState::Fetching;

        let result = tokio::select! {
            _ = shutdown.changed() => {
                stats.write().state = RefreshState::Idle;
                break;
            }
            result = refresh_once(&source, config.scale, &publish) => result,
        };

        let mut s = stats.write();
        s.state = RefreshState::Idle;
        s.cycles += 1;
        match result {
            Ok(points) => {
                s.successes += 1;
                s.last_points = points;
                s.last_error = None;
                tracing::info!("Asteroid trajectory updated: {} points", points);
            }
            Err(e) => {
                s.failures += 1;
                s.last_error = Some(e.to_string());
                tracing::warn!("Trajectory refresh failed, keeping previous: {}", e);
            }
        }
    }

    tracing::info!("Trajectory refresher stopped");
}
