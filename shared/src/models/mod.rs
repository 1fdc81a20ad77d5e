//! Domain models for the Hazard Relay

mod earthquake;
mod prediction;
mod tsunami;
mod user;

pub use earthquake::*;
pub use prediction::*;
pub use tsunami::*;
pub use user::*;
