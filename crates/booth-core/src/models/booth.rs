//! Booth model
//!
//! A booth keeps two call sequences: the active session, cleared by
//! [`Booth::reset`], and the full history, which only ever grows. The
//! active session is always a suffix of the history.

use serde::Serialize;

use super::{count_by_category, BoothSummary, Call, CallCategory, CategoryCounts};
use crate::{AppError, AppResult};

/// Occupancy state of a booth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoothState {
    Free,
    Occupied,
}

/// A telephone booth and its call records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booth {
    number: u32,
    active_calls: Vec<Call>,
    history: Vec<Call>,
}

impl Booth {
    /// Create an empty, free booth. Booth numbers start at 1.
    pub fn new(number: u32) -> AppResult<Self> {
        if number == 0 {
            return Err(AppError::invalid("booth number must be a positive integer"));
        }

        Ok(Self {
            number,
            active_calls: Vec::new(),
            history: Vec::new(),
        })
    }

    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Record a call in both the active session and the history
    ///
    /// Session totals must stay within `i64`; a call that would overflow
    /// them is rejected and nothing is recorded.
    pub fn register_call(&mut self, category: CallCategory, duration_minutes: i64) -> AppResult<Call> {
        let call = Call::new(category, duration_minutes)?;
        let fits = self
            .total_duration()
            .checked_add(call.duration_minutes())
            .and(self.total_cost().checked_add(call.cost()));
        if fits.is_none() {
            return Err(AppError::Overflow(format!(
                "session totals of booth {}",
                self.number
            )));
        }
        self.active_calls.push(call);
        self.history.push(call);
        Ok(call)
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        !self.active_calls.is_empty()
    }

    pub fn state(&self) -> BoothState {
        if self.is_occupied() {
            BoothState::Occupied
        } else {
            BoothState::Free
        }
    }

    /// Number of calls in the active session
    #[inline]
    pub fn call_count(&self) -> usize {
        self.active_calls.len()
    }

    /// Minutes used in the active session
    pub fn total_duration(&self) -> i64 {
        self.active_calls.iter().map(Call::duration_minutes).sum()
    }

    /// Cost of the active session
    pub fn total_cost(&self) -> i64 {
        self.active_calls.iter().map(Call::cost).sum()
    }

    pub fn calls_by_category(&self) -> CategoryCounts {
        count_by_category(&self.active_calls)
    }

    pub fn history_by_category(&self) -> CategoryCounts {
        count_by_category(&self.history)
    }

    /// End the active session. History is kept.
    pub fn reset(&mut self) {
        self.active_calls.clear();
    }

    pub fn summary(&self) -> BoothSummary {
        BoothSummary {
            number: self.number,
            call_count: self.call_count(),
            total_duration: self.total_duration(),
            total_cost: self.total_cost(),
        }
    }

    pub fn active_calls(&self) -> &[Call] {
        &self.active_calls
    }

    pub fn history(&self) -> &[Call] {
        &self.history
    }

    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
