pub mod clock;
pub mod constants;
pub mod coordinates;
pub mod trajectory;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SimTime, SystemClock};
pub use coordinates::{Bounds, Position3D};
pub use trajectory::TrajectorySample;
