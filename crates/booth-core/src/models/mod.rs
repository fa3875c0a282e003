//! Domain models for booth billing
//!
//! This module contains the core domain models: tariff categories, calls,
//! booths and the read-only summary records derived from them.

pub mod booth;
pub mod call;
pub mod category;
pub mod summary;

pub use booth::{Booth, BoothState};
pub use call::{Call, CallOutcome};
pub use category::CallCategory;
pub use summary::{
    average_cost_per_minute, count_by_category, BoothInfo, BoothSummary, CategoryCounts,
    ConsolidatedTotal,
};
