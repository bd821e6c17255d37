//! Rating tiers used to highlight comparison rows

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RatingTier {
    Elite,
    Great,
    Good,
    Average,
    BelowAverage,
}

impl RatingTier {
    /// Total over all inputs; NaN falls through to below-average.
    pub fn from_overall(overall: f64) -> Self {
        if overall > 70.0 {
            Self::Elite
        } else if overall >= 60.0 {
            Self::Great
        } else if overall >= 50.0 {
            Self::Good
        } else if overall >= 40.0 {
            Self::Average
        } else {
            Self::BelowAverage
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Elite => "elite",
            Self::Great => "great",
            Self::Good => "good",
            Self::Average => "average",
            Self::BelowAverage => "below-average",
        }
    }

    /// Row marker for the pretty table
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Elite => "🟣",
            Self::Great => "🟢",
            Self::Good => "🔵",
            Self::Average => "🟡",
            Self::BelowAverage => "🔴",
        }
    }
}

impl fmt::Display for RatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
