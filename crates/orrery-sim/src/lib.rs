pub mod bodies;
pub mod error;
pub mod orbit;
pub mod rings;
pub mod scene;
pub mod starfield;
pub mod system;

pub use bodies::{CelestialBody, Orbit, SystemConfig};
pub use error::{ConfigError, ConfigResult};
pub use rings::{OrbitRing, RingSet};
pub use scene::{Frame, SceneContext};
pub use starfield::Starfield;
pub use system::{BodyId, FrameSnapshot, SolarSystem};
