use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hifitime::Epoch;
use orrery_core::constants::ASTEROID_SCALE;
use orrery_core::{Clock, ManualClock, SimTime, SystemClock};
use orrery_data::{HorizonsClient, HorizonsQuery, RefresherConfig};
use orrery_sim::{Orbit, SceneContext, SolarSystem, Starfield, SystemConfig};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orrery")]
#[command(about = "Animated solar system model with a live asteroid overlay")]
struct Cli {
    /// Body catalog JSON (defaults to the built-in catalog)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the body catalog
    Bodies,

    /// Show body positions at one instant
    Positions {
        /// Epoch (e.g. "2024-01-01T00:00:00 UTC"); defaults to now
        #[arg(short, long)]
        epoch: Option<String>,
        /// Raw Unix milliseconds, overrides --epoch
        #[arg(long)]
        at_ms: Option<i64>,
    },

    /// Run the frame loop with the asteroid refresher (Ctrl-C to stop)
    Run {
        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: u32,
        /// Stop after this many frames
        #[arg(long)]
        frames: Option<u64>,
        /// Replay from this Unix time (ms), one frame period per frame
        #[arg(long)]
        start_ms: Option<i64>,
        /// Seconds between asteroid fetches
        #[arg(long, default_value = "60")]
        interval_secs: u64,
        /// Static trajectories JSON drawn under the bodies
        #[arg(long)]
        trajectories: Option<PathBuf>,
        /// Skip the asteroid refresher
        #[arg(long, default_value = "false")]
        no_fetch: bool,
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Fetch the asteroid trajectory once and summarize it
    FetchAsteroid {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Summarize a static trajectories file
    Trajectories {
        #[arg(short, long, default_value = "trajectories.json")]
        input: PathBuf,
    },

    /// Sample one period of every orbit into a trajectories file
    ExportTrajectories {
        #[arg(short, long, default_value = "trajectories.json")]
        output: PathBuf,
        /// Points per orbit
        #[arg(long, default_value = "360")]
        samples: usize,
    },
}

#[derive(clap::Args)]
struct QueryArgs {
    /// Horizons target designation
    #[arg(long, default_value = "2024 YR4")]
    command: String,
    #[arg(long, default_value = "2023-01-01")]
    start: String,
    #[arg(long, default_value = "2032-12-31")]
    stop: String,
    #[arg(long, default_value = "1d")]
    step: String,
    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl QueryArgs {
    fn to_query(&self) -> HorizonsQuery {
        HorizonsQuery {
            command: self.command.clone(),
            start_time: self.start.clone(),
            stop_time: self.stop.clone(),
            step_size: self.step.clone(),
            timeout_secs: self.timeout_secs,
            ..HorizonsQuery::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SystemConfig::load(path)
            .with_context(|| format!("Failed to load body catalog {}", path.display()))?,
        None => SystemConfig::default(),
    };
    let system = SolarSystem::new(config)?;

    match cli.command {
        Commands::Bodies => {
            println!("{:<10} {:>7} {:>9} {:>8} {:>10} {:>8} {:>10}",
                "Body", "Radius", "Distance", "Speed", "Parent", "Incl", "Period (s)");
            for body in system.bodies() {
                let (parent, inclination) = match &body.orbit {
                    Orbit::Moon { parent, inclination, .. } => (parent.as_str(), *inclination),
                    _ => ("-", 0.0),
                };
                let period = body.orbit.period()
                    .map(|p| format!("{:.1}", p))
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<10} {:>7.2} {:>9.2} {:>8.4} {:>10} {:>8.3} {:>10}",
                    body.name, body.radius, body.orbit.distance(), body.orbit.speed(),
                    parent, inclination, period);
            }
        }

        Commands::Positions { epoch, at_ms } => {
            let millis = match (at_ms, epoch) {
                (Some(ms), _) => ms,
                (None, Some(s)) => Epoch::from_str(&s)?.to_unix_milliseconds() as i64,
                (None, None) => SystemClock.now_millis(),
            };
            let t = SimTime::from_unix_millis(millis);
            let snapshot = system.snapshot(t);

            println!("Positions at t = {:.3} s ({} ms):", t.seconds(), millis);
            println!("{:<10} {:>12} {:>12} {:>12} {:>10}", "Body", "X", "Y", "Z", "Dist");
            for (id, p) in snapshot.iter() {
                println!("{:<10} {:>12.4} {:>12.4} {:>12.4} {:>10.4}",
                    system.body(id).name, p.x, p.y, p.z, p.magnitude());
            }
        }

        Commands::Run { fps, frames, start_ms, interval_secs, trajectories, no_fetch, query } => {
            let fps = fps.max(1);
            let clock = match start_ms {
                Some(ms) => FrameClock::replay(ms, fps),
                None => FrameClock::Wall(SystemClock),
            };
            run(system, fps, frames, clock, interval_secs, trajectories, no_fetch, query.to_query()).await?;
        }

        Commands::FetchAsteroid { query } => {
            let client = HorizonsClient::new(query.to_query())?;
            let trajectory = client.fetch_trajectory(ASTEROID_SCALE).await?;

            println!("{}: {} points (scaled x{})", client.query().command, trajectory.len(), ASTEROID_SCALE);
            if let Some(bounds) = trajectory.bounds() {
                println!("  Min: ({:.3}, {:.3}, {:.3})", bounds.min.x, bounds.min.y, bounds.min.z);
                println!("  Max: ({:.3}, {:.3}, {:.3})", bounds.max.x, bounds.max.y, bounds.max.z);
                let c = bounds.center();
                println!("  Center: ({:.3}, {:.3}, {:.3})", c.x, c.y, c.z);
            }
            println!("  Path length: {:.3}", trajectory.path_length());
        }

        Commands::Trajectories { input } => {
            let trajectories = orrery_data::load_trajectories_json(&input)?;
            println!("{:<10} {:>8} {:>14}", "Body", "Points", "Path length");
            for (name, t) in &trajectories {
                println!("{:<10} {:>8} {:>14.3}", name, t.len(), t.path_length());
            }
        }

        Commands::ExportTrajectories { output, samples } => {
            let sampled = orrery_data::sample_orbits(&system, samples);
            orrery_data::save_trajectories_json(&output, &sampled)?;
            println!("Wrote {} trajectories ({} points per orbit) -> {}",
                sampled.len(), samples.max(2), output.display());
        }
    }

    Ok(())
}

/// Time source for the frame loop
enum FrameClock {
    Wall(SystemClock),
    Replay { clock: ManualClock, step_ms: i64 },
}

impl FrameClock {
    fn replay(start_ms: i64, fps: u32) -> Self {
        Self::Replay {
            clock: ManualClock::new(start_ms),
            step_ms: (1000 / fps.max(1) as i64).max(1),
        }
    }

    fn sim_time(&self) -> SimTime {
        match self {
            Self::Wall(clock) => clock.sim_time(),
            Self::Replay { clock, .. } => clock.sim_time(),
        }
    }

    /// Called once per rendered frame
    fn tick(&self) {
        if let Self::Replay { clock, step_ms } = self {
            clock.advance(*step_ms);
        }
    }
}

fn frame_limit_reached(rendered: u64, limit: Option<u64>) -> bool {
    limit.is_some_and(|max| rendered >= max)
}

#[allow(clippy::too_many_arguments)]
async fn run(
    system: SolarSystem,
    fps: u32,
    frames: Option<u64>,
    clock: FrameClock,
    interval_secs: u64,
    trajectories: Option<PathBuf>,
    no_fetch: bool,
    query: HorizonsQuery,
) -> Result<()> {
    let mut scene = SceneContext::new(system, Starfield::default());
    if let Some(path) = &trajectories {
        scene = scene.with_static_trajectories(orrery_data::load_trajectories_or_empty(path));
    }

    let refresher = if no_fetch {
        None
    } else {
        let client = HorizonsClient::new(query)?;
        let config = RefresherConfig {
            interval: Duration::from_secs(interval_secs.max(1)),
            ..RefresherConfig::default()
        };
        Some(orrery_data::spawn_refresher(client, config))
    };
    if let Some(handle) = &refresher {
        scene = scene.with_overlay(handle.subscribe());
    }

    tracing::info!(
        "Frame loop: {} bodies, {} rings, {} stars, {} static trajectories at {} fps",
        scene.system().len(),
        scene.rings().len(),
        scene.starfield().len(),
        scene.static_trajectories().len(),
        fps
    );

    let mut ticker = tokio::time::interval(Duration::from_secs_f64(1.0 / fps as f64));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        if frame_limit_reached(scene.frame_count(), frames) {
            break;
        }

        tokio::select! {
            _ = &mut ctrl_c => {
                tracing::info!("Interrupted, shutting down");
                break;
            }
            _ = ticker.tick() => {}
        }

        let frame = scene.frame(clock.sim_time());
        clock.tick();

        if frame.overlay_changed {
            tracing::info!("Redrawing asteroid overlay ({} points)", frame.asteroid.len());
        }

        if frame.number % fps as u64 == 0 {
            let earth = scene.system().id_of("Earth").map(|id| frame.snapshot.position(id));
            tracing::debug!("Frame {} | t = {:.3} s | Earth {:?}", frame.number, frame.snapshot.time.seconds(), earth);
        }
    }

    if let Some(handle) = refresher {
        let stats = handle.stats();
        tracing::info!(
            "Refresher: {} cycles, {} ok, {} failed, last overlay {} points",
            stats.cycles,
            stats.successes,
            stats.failures,
            handle.current().len()
        );
        handle.shutdown().await?;
    }

    println!("Rendered {} frames", scene.frame_count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_limit_checked_before_render() {
        assert!(frame_limit_reached(0, Some(0)));
        assert!(!frame_limit_reached(0, Some(1)));
        assert!(frame_limit_reached(1, Some(1)));
        assert!(!frame_limit_reached(1_000_000, None));
    }

    #[test]
    fn test_replay_clock_steps_one_frame_period() {
        let clock = FrameClock::replay(10_000, 50);
        assert_eq!(clock.sim_time(), SimTime::from_unix_millis(10_000));
        clock.tick();
        clock.tick();
        assert_eq!(clock.sim_time(), SimTime::from_unix_millis(10_040));
    }

    #[test]
    fn test_replay_step_never_zero() {
        let clock = FrameClock::replay(0, 5000);
        clock.tick();
        assert_eq!(clock.sim_time(), SimTime::from_unix_millis(1));
    }
}
