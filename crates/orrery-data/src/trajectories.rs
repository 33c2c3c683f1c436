//! Static precomputed trajectories
//!
//! File format: a JSON object mapping body name to an ordered list of
//! `[x, y, z]` triples. Files written as three coordinate rows
//! (`[[x...], [y...], [z...]]`) are also accepted. A 3x3 entry cannot be
//! told apart and is always read as three points.

use anyhow::{bail, Context, Result};
use orrery_core::{Position3D, SimTime, TrajectorySample};
use orrery_sim::SolarSystem;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Entries under this name are not drawn
pub const SKIPPED_BODY: &str = "Sun";

fn to_points(name: &str, rows: Vec<Vec<f64>>) -> Result<Vec<Position3D>> {
    let column_major = rows.len() == 3
        && rows[0].len() != 3
        && rows.iter().all(|r| r.len() == rows[0].len());

    if rows.len() == 3 && rows.iter().all(|r| r.len() == 3) {
        tracing::warn!("{}: 3x3 trajectory is ambiguous, reading it as three [x, y, z] points", name);
    }

    if column_major {
        let (xs, ys, zs) = (&rows[0], &rows[1], &rows[2]);
        return Ok((0..xs.len()).map(|i| Position3D::new(xs[i], ys[i], zs[i])).collect());
    }

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| match row.as_slice() {
            [x, y, z] => Ok(Position3D::new(*x, *y, *z)),
            _ => bail!("{}: point {} has {} components, expected 3", name, i, row.len()),
        })
        .collect()
}

/// Parse a trajectory document, dropping the Sun entry
pub fn parse_trajectories(json: &str) -> Result<BTreeMap<String, TrajectorySample>> {
    let raw: BTreeMap<String, Vec<Vec<f64>>> = serde_json::from_str(json)?;

    raw.into_iter()
        .filter(|(name, _)| name != SKIPPED_BODY)
        .map(|(name, rows)| {
            let points = to_points(&name, rows)?;
            Ok((name, TrajectorySample::new(points)))
        })
        .collect()
}

/// Load static trajectories from a JSON file
pub fn load_trajectories_json(path: &Path) -> Result<BTreeMap<String, TrajectorySample>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read trajectories file: {}", path.display()))?;

    let trajectories = parse_trajectories(&contents)
        .with_context(|| format!("Failed to parse trajectories JSON: {}", path.display()))?;

    tracing::info!("Loaded {} static trajectories from {}", trajectories.len(), path.display());
    Ok(trajectories)
}

/// Load at startup; a missing or broken file only costs the overlay
pub fn load_trajectories_or_empty(path: &Path) -> BTreeMap<String, TrajectorySample> {
    match load_trajectories_json(path) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Error loading trajectories: {:#}", e);
            BTreeMap::new()
        }
    }
}

/// Sample every body over one of its own periods, starting at t = 0.
///
/// Fixed bodies get a single point.
pub fn sample_orbits(system: &SolarSystem, samples: usize) -> BTreeMap<String, TrajectorySample> {
    let samples = samples.max(2);

    system
        .ids()
        .map(|id| {
            let name = system.body(id).name.clone();
            let points = match system.period(id) {
                None => vec![system.position(id, SimTime(0.0))],
                Some(period) => {
                    let step = period / (samples - 1) as f64;
                    (0..samples)
                        .map(|i| system.position(id, SimTime(i as f64 * step)))
                        .collect()
                }
            };
            (name, TrajectorySample::new(points))
        })
        .collect()
}

/// Write trajectories in the row-per-point format
pub fn save_trajectories_json(path: &Path, trajectories: &BTreeMap<String, TrajectorySample>) -> Result<()> {
    let raw: BTreeMap<&str, Vec<[f64; 3]>> = trajectories
        .iter()
        .map(|(name, t)| (name.as_str(), t.points().iter().map(|p| (*p).into()).collect()))
        .collect();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string(&raw)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
