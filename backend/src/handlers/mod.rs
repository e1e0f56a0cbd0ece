//! HTTP handlers

pub mod game_schedule;
pub mod health;
pub mod stadium;
pub mod team;
pub mod weather;

pub use game_schedule::*;
pub use health::*;
pub use stadium::*;
pub use team::*;
pub use weather::*;
