//! Shared types and forecast logic for the Stadium Rain-Check platform
//!
//! This crate contains the pieces shared between the backend, the browser
//! client (via WASM), and the tests. Nothing in here performs I/O or reads
//! the wall clock: "now" is always passed in by the caller.

pub mod forecast;
pub mod models;
pub mod prediction;
pub mod stadiums;
pub mod teams;
pub mod types;
pub mod validation;

pub use models::*;
pub use prediction::*;
pub use types::*;
pub use validation::*;
