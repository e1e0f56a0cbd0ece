//! Domain models for the Stadium Rain-Check platform

mod prediction;
mod stadium;
mod team;
mod weather;

pub use prediction::*;
pub use stadium::*;
pub use team::*;
pub use weather::*;
