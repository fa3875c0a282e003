//! Call model

use serde::Serialize;

use super::CallCategory;
use crate::{AppError, AppResult};

/// One completed call: a category and a strictly positive duration
///
/// The fields are private so a `Call` with a non-positive duration can
/// never be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Call {
    category: CallCategory,
    duration_minutes: i64,
}

impl Call {
    /// Create a call, rejecting non-positive durations and durations whose
    /// cost does not fit in an `i64`
    pub fn new(category: CallCategory, duration_minutes: i64) -> AppResult<Self> {
        if duration_minutes <= 0 {
            return Err(AppError::invalid(format!(
                "call duration must be greater than zero, got {}",
                duration_minutes
            )));
        }
        if duration_minutes.checked_mul(category.rate_per_minute()).is_none() {
            return Err(AppError::invalid(format!(
                "call duration of {} minutes is too long to bill",
                duration_minutes
            )));
        }

        Ok(Self {
            category,
            duration_minutes,
        })
    }

    #[inline]
    pub fn category(&self) -> CallCategory {
        self.category
    }

    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    /// Cost of the call: duration times the category's per-minute rate
    #[inline]
    pub fn cost(&self) -> i64 {
        self.duration_minutes * self.category.rate_per_minute()
    }
}

/// Result of asking the registry to register a call on a booth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CallOutcome {
    /// The call was recorded on the booth
    Registered { call: Call },

    /// The booth already has an active session; nothing was recorded
    Busy,
}

impl CallOutcome {
    pub fn is_busy(&self) -> bool {
        matches!(self, CallOutcome::Busy)
    }

    /// The recorded call, if any
    pub fn call(&self) -> Option<&Call> {
        match self {
            CallOutcome::Registered { call } => Some(call),
            CallOutcome::Busy => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_duration() {
        let call = Call::new(CallCategory::Local, 4).unwrap();
        assert_eq!(call.category(), CallCategory::Local);
        assert_eq!(call.duration_minutes(), 4);
        assert_eq!(call.cost(), 200);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let err = Call::new(CallCategory::Mobile, 0).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[test]
    fn test_negative_duration_rejected() {
        assert!(Call::new(CallCategory::LongDistance, -3).is_err());
    }

    #[test]
    fn test_unbillable_duration_rejected() {
        let err = Call::new(CallCategory::LongDistance, i64::MAX / 100).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));

        let largest = i64::MAX / CallCategory::LongDistance.rate_per_minute();
        let call = Call::new(CallCategory::LongDistance, largest).unwrap();
        assert_eq!(call.cost(), largest * 350);
        assert!(Call::new(CallCategory::LongDistance, largest + 1).is_err());
    }

    #[test]
    fn test_outcome_accessors() {
        let call = Call::new(CallCategory::Mobile, 2).unwrap();
        let outcome = CallOutcome::Registered { call };
        assert!(!outcome.is_busy());
        assert_eq!(outcome.call(), Some(&call));

        assert!(CallOutcome::Busy.is_busy());
        assert_eq!(CallOutcome::Busy.call(), None);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(CallOutcome::Busy).unwrap();
        assert_eq!(json["outcome"], "busy");

        let call = Call::new(CallCategory::Local, 3).unwrap();
        let json = serde_json::to_value(CallOutcome::Registered { call }).unwrap();
        assert_eq!(json["outcome"], "registered");
        assert_eq!(json["call"]["category"], "LOCAL");
        assert_eq!(json["call"]["duration_minutes"], 3);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn non_positive_durations_never_build(d in i64::MIN..=0) {
                prop_assert!(Call::new(CallCategory::Local, d).is_err());
            }

            #[test]
            fn positive_durations_always_build(d in 1i64..=1_000_000) {
                let call = Call::new(CallCategory::Mobile, d).unwrap();
                prop_assert_eq!(call.cost(), d * 150);
            }
        }
    }
}
