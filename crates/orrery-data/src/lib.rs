pub mod error;
pub mod horizons;
pub mod refresher;
pub mod trajectories;

pub use error::{EphemerisError, EphemerisResult};
pub use horizons::{parse_ephemeris, EphemerisSource, HorizonsClient, HorizonsQuery};
pub use refresher::{
    refresh_once, spawn_refresher, spawn_refresher_with_initial, RefreshState, RefresherConfig,
    RefresherHandle, RefresherStats,
};
pub use trajectories::{
    load_trajectories_json, load_trajectories_or_empty, parse_trajectories, sample_orbits,
    save_trajectories_json,
};
