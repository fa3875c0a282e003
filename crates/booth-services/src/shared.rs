//! Registry shared between threads
//!
//! One read-write lock guards the whole registry: call registration and
//! resets on the same booth are mutually exclusive, and aggregates are read
//! from a single consistent snapshot. Every method returns owned data so no
//! guard escapes.

use booth_core::{
    models::{Booth, BoothInfo, CallCategory, CallOutcome, ConsolidatedTotal},
    traits::DurationSource,
    AppResult,
};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::BoothRegistry;

/// Cloneable handle to a registry behind a lock
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<BoothRegistry>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_registry(registry: BoothRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Run a closure with read access to the registry
    pub fn read<R>(&self, f: impl FnOnce(&BoothRegistry) -> R) -> R {
        f(&*self.inner.read())
    }

    /// Run a closure with exclusive access to the registry
    pub fn write<R>(&self, f: impl FnOnce(&mut BoothRegistry) -> R) -> R {
        f(&mut *self.inner.write())
    }

    pub fn create_booth(&self, number: u32) -> AppResult<bool> {
        self.inner.write().create_booth(number)
    }

    pub fn add_booth(&self, booth: Booth) -> bool {
        self.inner.write().add_booth(booth)
    }

    /// Snapshot of a booth
    pub fn find_booth(&self, number: u32) -> Option<Booth> {
        self.inner.read().find_booth(number).cloned()
    }

    pub fn register_call<S>(
        &self,
        number: u32,
        category: CallCategory,
        source: &mut S,
    ) -> AppResult<CallOutcome>
    where
        S: DurationSource + ?Sized,
    {
        self.inner.write().register_call(number, category, source)
    }

    pub fn register_call_with_duration(
        &self,
        number: u32,
        category: CallCategory,
        duration_minutes: i64,
    ) -> AppResult<CallOutcome> {
        self.inner
            .write()
            .register_call_with_duration(number, category, duration_minutes)
    }

    pub fn booth_info(&self, number: u32) -> AppResult<BoothInfo> {
        self.inner.read().booth_info(number)
    }

    pub fn consolidated_total(&self) -> AppResult<ConsolidatedTotal> {
        self.inner.read().consolidated_total()
    }

    pub fn reset_booth(&self, number: u32) -> AppResult<()> {
        self.inner.write().reset_booth(number)
    }

    /// Numbers of the booths with no active session, in insertion order
    pub fn available_booths(&self) -> Vec<u32> {
        self.inner
            .read()
            .available_booths()
            .iter()
            .map(|b| b.number())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
