//! Read-only records derived from booth state
//!
//! These are plain data handed back to callers; building one never mutates
//! a booth.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::{Call, CallCategory};

/// Number of calls per category; categories without calls are absent
pub type CategoryCounts = BTreeMap<CallCategory, usize>;

/// Count calls per category
pub fn count_by_category<'a>(calls: impl IntoIterator<Item = &'a Call>) -> CategoryCounts {
    let mut counts = CategoryCounts::new();
    for call in calls {
        *counts.entry(call.category()).or_insert(0) += 1;
    }
    counts
}

/// Average cost per minute, rounded half away from zero
///
/// The rounding is applied once to the exact ratio. Returns 0 when no
/// minutes were used.
pub fn average_cost_per_minute(total_cost: i64, total_duration: i64) -> i64 {
    cost_ratio(total_cost, total_duration)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

fn cost_ratio(total_cost: i64, total_duration: i64) -> Decimal {
    if total_duration <= 0 {
        return Decimal::ZERO;
    }
    Decimal::from(total_cost) / Decimal::from(total_duration)
}

fn write_category_counts(f: &mut fmt::Formatter<'_>, counts: &CategoryCounts) -> fmt::Result {
    for (i, (category, count)) in counts.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}: {} calls", category, count)?;
    }
    Ok(())
}

/// Current-session statistics of one booth
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoothSummary {
    pub number: u32,
    pub call_count: usize,
    pub total_duration: i64,
    pub total_cost: i64,
}

impl fmt::Display for BoothSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Booth {}: {} calls, {} minutes, {} cost units",
            self.number, self.call_count, self.total_duration, self.total_cost
        )
    }
}

/// Booth summary combined with the all-time category breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoothInfo {
    pub summary: BoothSummary,
    pub history_by_category: CategoryCounts,
}

impl fmt::Display for BoothInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary)?;
        f.write_str("Call history - ")?;
        if self.history_by_category.is_empty() {
            f.write_str("no calls")
        } else {
            write_category_counts(f, &self.history_by_category)
        }
    }
}

/// Aggregate of the active sessions of every booth
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsolidatedTotal {
    pub total_cost: i64,
    pub call_count: usize,
    pub total_duration: i64,
    pub average_cost_per_minute: i64,
    pub calls_by_category: CategoryCounts,
}

impl ConsolidatedTotal {
    /// Build the aggregate, deriving the average from the final totals
    pub fn new(
        total_cost: i64,
        call_count: usize,
        total_duration: i64,
        calls_by_category: CategoryCounts,
    ) -> Self {
        Self {
            total_cost,
            call_count,
            total_duration,
            average_cost_per_minute: average_cost_per_minute(total_cost, total_duration),
            calls_by_category,
        }
    }

    /// Unrounded cost per minute
    pub fn exact_average(&self) -> Decimal {
        cost_ratio(self.total_cost, self.total_duration)
    }
}

impl fmt::Display for ConsolidatedTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {} cost units, {} calls, {} minutes, Average: {} cost units/min",
            self.total_cost, self.call_count, self.total_duration, self.average_cost_per_minute
        )?;
        if !self.calls_by_category.is_empty() {
            f.write_str(", ")?;
            write_category_counts(f, &self.calls_by_category)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_average_rounds_once() {
        // 850 / 7 = 121.43
        assert_eq!(average_cost_per_minute(850, 7), 121);
        // 500 / 6 = 83.33
        assert_eq!(average_cost_per_minute(500, 6), 83);
    }

    #[test]
    fn test_average_half_away_from_zero() {
        assert_eq!(average_cost_per_minute(3, 2), 2);
        assert_eq!(average_cost_per_minute(5, 2), 3);
        assert_eq!(average_cost_per_minute(1, 4), 0);
    }

    #[test]
    fn test_exact_average() {
        let total = ConsolidatedTotal::new(350, 2, 4, CategoryCounts::new());
        assert_eq!(total.exact_average(), dec!(87.5));
        assert_eq!(total.average_cost_per_minute, 88);

        let total = ConsolidatedTotal::new(850, 3, 7, CategoryCounts::new());
        assert_eq!(total.exact_average().round_dp(2), dec!(121.43));
        assert_eq!(ConsolidatedTotal::default().exact_average(), Decimal::ZERO);
    }

    #[test]
    fn test_average_zero_duration() {
        assert_eq!(average_cost_per_minute(0, 0), 0);
        assert_eq!(average_cost_per_minute(100, 0), 0);
    }

    #[test]
    fn test_count_by_category_omits_empty() {
        let calls = vec![
            Call::new(CallCategory::Local, 1).unwrap(),
            Call::new(CallCategory::Local, 2).unwrap(),
            Call::new(CallCategory::Mobile, 3).unwrap(),
        ];
        let counts = count_by_category(&calls);
        assert_eq!(counts.get(&CallCategory::Local), Some(&2));
        assert_eq!(counts.get(&CallCategory::Mobile), Some(&1));
        assert!(!counts.contains_key(&CallCategory::LongDistance));
    }

    #[test]
    fn test_summary_display() {
        let summary = BoothSummary {
            number: 4,
            call_count: 2,
            total_duration: 6,
            total_cost: 500,
        };
        assert_eq!(
            summary.to_string(),
            "Booth 4: 2 calls, 6 minutes, 500 cost units"
        );
    }

    #[test]
    fn test_info_display() {
        let mut history = CategoryCounts::new();
        history.insert(CallCategory::Mobile, 1);
        history.insert(CallCategory::Local, 3);
        let info = BoothInfo {
            summary: BoothSummary {
                number: 1,
                call_count: 0,
                total_duration: 0,
                total_cost: 0,
            },
            history_by_category: history,
        };
        assert_eq!(
            info.to_string(),
            "Booth 1: 0 calls, 0 minutes, 0 cost units\n\
             Call history - LOCAL: 3 calls, MOBILE: 1 calls"
        );
    }

    #[test]
    fn test_info_display_without_history() {
        let info = BoothInfo {
            summary: BoothSummary {
                number: 9,
                call_count: 0,
                total_duration: 0,
                total_cost: 0,
            },
            history_by_category: CategoryCounts::new(),
        };
        assert!(info.to_string().ends_with("Call history - no calls"));
    }

    #[test]
    fn test_consolidated_display() {
        let mut counts = CategoryCounts::new();
        counts.insert(CallCategory::LongDistance, 1);
        let total = ConsolidatedTotal::new(350, 1, 1, counts);
        assert_eq!(
            total.to_string(),
            "Total: 350 cost units, 1 calls, 1 minutes, Average: 350 cost units/min, \
             LONG_DISTANCE: 1 calls"
        );
    }

    #[test]
    fn test_empty_consolidated_display() {
        let total = ConsolidatedTotal::new(0, 0, 0, CategoryCounts::new());
        assert_eq!(total, ConsolidatedTotal::default());
        assert_eq!(
            total.to_string(),
            "Total: 0 cost units, 0 calls, 0 minutes, Average: 0 cost units/min"
        );
    }

    #[test]
    fn test_json_map_keys() {
        let mut counts = CategoryCounts::new();
        counts.insert(CallCategory::Mobile, 2);
        let total = ConsolidatedTotal::new(300, 2, 2, counts);
        let json = serde_json::to_value(&total).unwrap();
        assert_eq!(json["calls_by_category"]["MOBILE"], 2);
        assert_eq!(json["average_cost_per_minute"], 150);
    }
}
