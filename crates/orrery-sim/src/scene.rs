//! Scene context: everything a renderer reads each frame

use crate::rings::RingSet;
use crate::starfield::Starfield;
use crate::system::{FrameSnapshot, SolarSystem};
use orrery_core::{SimTime, TrajectorySample};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::watch;

/// Output of one frame pass
#[derive(Clone, Debug)]
pub struct Frame {
    pub number: u64,
    pub snapshot: FrameSnapshot,
    /// Current asteroid overlay (possibly empty)
    pub asteroid: Arc<TrajectorySample>,
    /// The overlay was replaced since the previous frame and must be redrawn
    pub overlay_changed: bool,
}

/// Explicitly constructed scene state passed to the frame loop
pub struct SceneContext {
    system: SolarSystem,
    rings: RingSet,
    starfield: Starfield,
    static_trajectories: BTreeMap<String, TrajectorySample>,
    overlay: Option<watch::Receiver<Arc<TrajectorySample>>>,
    asteroid: Arc<TrajectorySample>,
    frame_count: u64,
}

impl SceneContext {
    pub fn new(system: SolarSystem, starfield: Starfield) -> Self {
        let rings = RingSet::for_system(&system);
        Self {
            system,
            rings,
            starfield,
            static_trajectories: BTreeMap::new(),
            overlay: None,
            asteroid: Arc::new(TrajectorySample::empty()),
            frame_count: 0,
        }
    }

    /// Attach static precomputed trajectories (replaces any previous set)
    pub fn with_static_trajectories(mut self, trajectories: BTreeMap<String, TrajectorySample>) -> Self {
        self.static_trajectories = trajectories;
        self
    }

    /// Subscribe to a live asteroid overlay
    pub fn with_overlay(mut self, overlay: watch::Receiver<Arc<TrajectorySample>>) -> Self {
        self.asteroid = overlay.borrow().clone();
        self.overlay = Some(overlay);
        self
    }

    pub fn system(&self) -> &SolarSystem {
        &self.system
    }

    pub fn rings(&self) -> &RingSet {
        &self.rings
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn static_trajectories(&self) -> &BTreeMap<String, TrajectorySample> {
        &self.static_trajectories
    }

    pub fn asteroid(&self) -> &Arc<TrajectorySample> {
        &self.asteroid
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Run one frame pass at `t`.
    ///
    /// Picks up a newly published overlay if one arrived since the last frame;
    /// otherwise keeps drawing the previous one.
    pub fn frame(&mut self, t: SimTime) -> Frame {
        let snapshot = self.system.snapshot(t);
        self.rings.advance(&snapshot);

        let mut overlay_changed = false;
        if let Some(rx) = self.overlay.as_mut() {
            match rx.has_changed() {
                Ok(true) => {
                    self.asteroid = rx.borrow_and_update().clone();
                    overlay_changed = true;
                    tracing::debug!("Asteroid overlay replaced ({} points)", self.asteroid.len());
                }
                Ok(false) => {}
                Err(_) => {
                    // Publisher gone; take its final value and stop polling
                    let last = rx.borrow().clone();
                    if !Arc::ptr_eq(&last, &self.asteroid) {
                        self.asteroid = last;
                        overlay_changed = true;
                    }
                    tracing::debug!("Asteroid overlay publisher closed");
                    self.overlay = None;
                }
            }
        }

        self.frame_count += 1;

        Frame {
            number: self.frame_count,
            snapshot,
            asteroid: self.asteroid.clone(),
            overlay_changed,
        }
    }
}

impl Default for SceneContext {
    fn default() -> Self {
        Self::new(SolarSystem::default(), Starfield::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::Position3D;

    fn sample(n: usize) -> Arc<TrajectorySample> {
        Arc::new((0..n).map(|i| Position3D::new(i as f64, 0.0, 0.0)).collect())
    }

    #[test]
    fn test_frame_without_overlay() {
        let mut scene = SceneContext::default();
        let frame = scene.frame(SimTime(1.0));
        assert_eq!(frame.number, 1);
        assert!(frame.asteroid.is_empty());
        assert!(!frame.overlay_changed);
        assert_eq!(frame.snapshot.positions().len(), 14);
    }

    #[test]
    fn test_overlay_swap_seen_by_next_frame() {
        let (tx, rx) = watch::channel(sample(0));
        let mut scene = SceneContext::default().with_overlay(rx);

        assert!(!scene.frame(SimTime(0.0)).overlay_changed);

        tx.send_replace(sample(5));
        let frame = scene.frame(SimTime(0.016));
        assert!(frame.overlay_changed);
        assert_eq!(frame.asteroid.len(), 5);

        // No new publish: same overlay, no redraw signal
        let frame = scene.frame(SimTime(0.032));
        assert!(!frame.overlay_changed);
        assert_eq!(frame.asteroid.len(), 5);
    }

    #[test]
    fn test_overlay_kept_after_publisher_drops() {
        let (tx, rx) = watch::channel(sample(3));
        let mut scene = SceneContext::default().with_overlay(rx);
        drop(tx);

        let frame = scene.frame(SimTime(0.0));
        assert_eq!(frame.asteroid.len(), 3);
        assert_eq!(scene.frame(SimTime(1.0)).asteroid.len(), 3);
    }

    #[test]
    fn test_final_publish_before_close_is_drawn() {
        let (tx, rx) = watch::channel(sample(3));
        let mut scene = SceneContext::default().with_overlay(rx);
        tx.send_replace(sample(7));
        drop(tx);

        let frame = scene.frame(SimTime(0.0));
        assert!(frame.overlay_changed);
        assert_eq!(frame.asteroid.len(), 7);
        assert!(!scene.frame(SimTime(1.0)).overlay_changed);
    }

    #[test]
    fn test_static_trajectories_attached() {
        let mut map = BTreeMap::new();
        map.insert("Earth".to_string(), (*sample(4)).clone());
        let scene = SceneContext::default().with_static_trajectories(map);
        assert_eq!(scene.static_trajectories()["Earth"].len(), 4);
    }
}
