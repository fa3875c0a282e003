//! Call category (tariff class) model
//!
//! Every category carries a fixed per-minute rate expressed in the smallest
//! currency unit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::AppError;

/// Tariff class of a call
///
/// Ordering follows declaration order so per-category maps iterate
/// `LOCAL`, `LONG_DISTANCE`, `MOBILE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallCategory {
    Local,
    LongDistance,
    Mobile,
}

impl CallCategory {
    /// All categories in display order
    pub const ALL: [CallCategory; 3] = [
        CallCategory::Local,
        CallCategory::LongDistance,
        CallCategory::Mobile,
    ];

    /// Rate per minute in the smallest currency unit
    #[inline]
    pub const fn rate_per_minute(self) -> i64 {
        match self {
            CallCategory::Local => 50,
            CallCategory::LongDistance => 350,
            CallCategory::Mobile => 150,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CallCategory::Local => "LOCAL",
            CallCategory::LongDistance => "LONG_DISTANCE",
            CallCategory::Mobile => "MOBILE",
        }
    }
}

impl fmt::Display for CallCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallCategory {
    type Err = AppError;

    /// Parses operator input; `LARGA_DISTANCIA` and `CELULAR` are accepted
    /// as aliases for the long-distance and mobile classes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['-', ' '], "_").as_str() {
            "LOCAL" => Ok(CallCategory::Local),
            "LONG_DISTANCE" | "LARGA_DISTANCIA" => Ok(CallCategory::LongDistance),
            "MOBILE" | "CELULAR" => Ok(CallCategory::Mobile),
            _ => Err(AppError::invalid(format!("unknown call category: {}", s.trim()))),
        }
    }
}
