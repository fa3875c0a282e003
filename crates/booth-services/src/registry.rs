//! Booth registry
//!
//! Owns every booth, keyed by number, and routes per-booth operations.
//! Booths are kept in insertion order; a side index maps numbers to
//! positions. Booths are never removed, so positions stay valid.

use booth_core::{
    models::{
        count_by_category, Booth, BoothInfo, CallCategory, CallOutcome, CategoryCounts,
        ConsolidatedTotal,
    },
    traits::DurationSource,
    AppError, AppResult,
};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Registry of booths
#[derive(Debug, Clone, Default)]
pub struct BoothRegistry {
    booths: Vec<Booth>,
    index: HashMap<u32, usize>,
}

impl BoothRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty booth unless one with this number already exists
    ///
    /// Returns `true` when a booth was created.
    #[instrument(skip(self))]
    pub fn create_booth(&mut self, number: u32) -> AppResult<bool> {
        if self.contains(number) {
            debug!("Booth {} already exists", number);
            return Ok(false);
        }

        let booth = Booth::new(number)?;
        Ok(self.insert(booth))
    }

    /// Insert a pre-built booth unless its number is already taken
    ///
    /// Returns `true` when the booth was inserted; an existing booth with the
    /// same number is left untouched.
    #[instrument(skip(self, booth), fields(number = booth.number()))]
    pub fn add_booth(&mut self, booth: Booth) -> bool {
        if self.contains(booth.number()) {
            debug!("Booth {} already exists, ignoring", booth.number());
            return false;
        }

        self.insert(booth)
    }

    fn insert(&mut self, booth: Booth) -> bool {
        let number = booth.number();
        self.index.insert(number, self.booths.len());
        self.booths.push(booth);
        info!("Booth {} added ({} booths)", number, self.booths.len());
        true
    }

    /// Look up a booth by number
    pub fn find_booth(&self, number: u32) -> Option<&Booth> {
        self.index.get(&number).map(|&i| &self.booths[i])
    }

    fn booth_mut(&mut self, number: u32) -> AppResult<&mut Booth> {
        match self.index.get(&number) {
            Some(&i) => Ok(&mut self.booths[i]),
            None => {
                warn!("Booth {} not found", number);
                Err(AppError::BoothNotFound(number))
            }
        }
    }

    fn booth(&self, number: u32) -> AppResult<&Booth> {
        self.find_booth(number).ok_or_else(|| {
            warn!("Booth {} not found", number);
            AppError::BoothNotFound(number)
        })
    }

    #[inline]
    pub fn contains(&self, number: u32) -> bool {
        self.index.contains_key(&number)
    }

    /// Register a call on an existing booth
    ///
    /// An occupied booth refuses the call with [`CallOutcome::Busy`] and the
    /// duration source is not consulted. The registry never creates booths
    /// here; unknown numbers fail with `BoothNotFound`.
    #[instrument(skip(self, source))]
    pub fn register_call<S>(
        &mut self,
        number: u32,
        category: CallCategory,
        source: &mut S,
    ) -> AppResult<CallOutcome>
    where
        S: DurationSource + ?Sized,
    {
        let booth = self.booth_mut(number)?;

        if booth.is_occupied() {
            info!(
                "Booth {} is occupied ({} active calls), call refused",
                number,
                booth.call_count()
            );
            return Ok(CallOutcome::Busy);
        }

        let minutes = source.next_duration();
        let call = booth.register_call(category, minutes)?;

        info!(
            "Registered {} call of {} minutes on booth {} (cost {})",
            category,
            call.duration_minutes(),
            number,
            call.cost()
        );

        Ok(CallOutcome::Registered { call })
    }

    /// Register a call with a caller-supplied duration
    pub fn register_call_with_duration(
        &mut self,
        number: u32,
        category: CallCategory,
        duration_minutes: i64,
    ) -> AppResult<CallOutcome> {
        self.register_call(number, category, &mut || duration_minutes)
    }

    /// Current summary of a booth plus its all-time category breakdown
    pub fn booth_info(&self, number: u32) -> AppResult<BoothInfo> {
        let booth = self.booth(number)?;
        Ok(BoothInfo {
            summary: booth.summary(),
            history_by_category: booth.history_by_category(),
        })
    }

    /// Aggregate the active sessions of every booth
    ///
    /// Fails with `Overflow` when the cross-booth sums do not fit in an
    /// `i64`; each booth's own totals always do.
    pub fn consolidated_total(&self) -> AppResult<ConsolidatedTotal> {
        let mut total_cost: i64 = 0;
        let mut call_count = 0;
        let mut total_duration: i64 = 0;

        for booth in &self.booths {
            total_cost = total_cost
                .checked_add(booth.total_cost())
                .ok_or_else(|| Self::overflow("consolidated cost"))?;
            total_duration = total_duration
                .checked_add(booth.total_duration())
                .ok_or_else(|| Self::overflow("consolidated duration"))?;
            call_count += booth.call_count();
        }

        let calls_by_category: CategoryCounts =
            count_by_category(self.booths.iter().flat_map(|b| b.active_calls()));

        let total = ConsolidatedTotal::new(total_cost, call_count, total_duration, calls_by_category);

        debug!(
            "Consolidated {} booths: cost {}, {} calls, {} minutes",
            self.booths.len(),
            total.total_cost,
            total.call_count,
            total.total_duration
        );

        Ok(total)
    }

    fn overflow(what: &str) -> AppError {
        warn!("Arithmetic overflow computing {}", what);
        AppError::Overflow(what.to_string())
    }

    /// End the active session of a booth
    #[instrument(skip(self))]
    pub fn reset_booth(&mut self, number: u32) -> AppResult<()> {
        let booth = self.booth_mut(number)?;
        let cleared = booth.call_count();
        booth.reset();
        info!("Booth {} reset ({} active calls cleared)", number, cleared);
        Ok(())
    }

    /// Booths with no active session, in insertion order
    pub fn available_booths(&self) -> Vec<&Booth> {
        self.booths.iter().filter(|b| !b.is_occupied()).collect()
    }

    /// All booths in insertion order
    pub fn booths(&self) -> impl Iterator<Item = &Booth> {
        self.booths.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.booths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.booths.is_empty()
    }
}
