//! Business logic services for booth billing
//!
//! # Services
//!
//! - `BoothRegistry` - owns the booths, routes call registration and resets,
//!   computes cross-booth aggregates
//! - `SharedRegistry` - a registry behind a single lock for concurrent hosts
//! - `FixedDuration` / `RandomDuration` - duration sources for new calls

pub mod duration;
pub mod registry;
pub mod shared;

pub use duration::{source_from_config, FixedDuration, RandomDuration};
pub use registry::BoothRegistry;
pub use shared::SharedRegistry;
