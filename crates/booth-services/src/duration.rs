//! Duration sources
//!
//! How long a call lasts is decided by the caller. The operator shell uses
//! a random source in `[1, 10]` minutes by default; tests and scripted runs
//! use a fixed or seeded one.

use booth_core::{config::DurationConfig, traits::DurationSource, AppError, AppResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use tracing::debug;

/// Always yields the same duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDuration(pub i64);

impl DurationSource for FixedDuration {
    fn next_duration(&mut self) -> i64 {
        self.0
    }
}

/// Uniformly random duration within an inclusive range of minutes
#[derive(Debug, Clone)]
pub struct RandomDuration {
    range: RangeInclusive<i64>,
    rng: StdRng,
}

impl RandomDuration {
    pub const DEFAULT_MIN: i64 = 1;
    pub const DEFAULT_MAX: i64 = 10;

    /// Random durations in `[min, max]`, seeded from the OS
    pub fn new(min: i64, max: i64) -> AppResult<Self> {
        Self::validate(min, max)?;
        Ok(Self {
            range: min..=max,
            rng: StdRng::from_entropy(),
        })
    }

    /// Reproducible random durations in `[min, max]`
    pub fn with_seed(min: i64, max: i64, seed: u64) -> AppResult<Self> {
        Self::validate(min, max)?;
        Ok(Self {
            range: min..=max,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn range(&self) -> &RangeInclusive<i64> {
        &self.range
    }

    fn validate(min: i64, max: i64) -> AppResult<()> {
        if min < 1 || min > max {
            return Err(AppError::invalid(format!(
                "duration range must satisfy 1 <= min <= max, got [{}, {}]",
                min, max
            )));
        }
        Ok(())
    }
}

impl Default for RandomDuration {
    fn default() -> Self {
        Self {
            range: Self::DEFAULT_MIN..=Self::DEFAULT_MAX,
            rng: StdRng::from_entropy(),
        }
    }
}

impl DurationSource for RandomDuration {
    fn next_duration(&mut self) -> i64 {
        self.rng.gen_range(self.range.clone())
    }
}

/// Build the duration source described by the configuration
///
/// A fixed duration wins over the random range.
pub fn source_from_config(config: &DurationConfig) -> AppResult<Box<dyn DurationSource + Send>> {
    config.validate()?;

    if let Some(minutes) = config.fixed {
        debug!("Using fixed call duration of {} minutes", minutes);
        return Ok(Box::new(FixedDuration(minutes)));
    }

    debug!(
        "Using random call duration in [{}, {}] minutes",
        config.min, config.max
    );
    let source = match config.seed {
        Some(seed) => RandomDuration::with_seed(config.min, config.max, seed)?,
        None => RandomDuration::new(config.min, config.max)?,
    };
    Ok(Box::new(source))
}
