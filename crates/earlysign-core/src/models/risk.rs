use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Percentages strictly above this are `High`.
pub const HIGH_THRESHOLD: u8 = 60;
/// Percentages strictly above this (and not `High`) are `Medium`.
pub const MEDIUM_THRESHOLD: u8 = 30;

/// Risk tier derived from a result's percentage.
///
/// The serialized form ("Low", "Medium", "High") is case-sensitive and is
/// what rendering layers match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify a rounded percentage. Both thresholds are strict: exactly 60
    /// is `Medium` and exactly 30 is `Low`.
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage > HIGH_THRESHOLD {
            RiskLevel::High
        } else if percentage > MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Dashboard guidance for this tier.
    pub fn recommendation(&self) -> Recommendation {
        match self {
            RiskLevel::Low => Recommendation {
                title: "Great Progress!",
                message: "Your assessment indicates low risk. Continue monitoring and consider \
                          regular check-ins.",
            },
            RiskLevel::Medium => Recommendation {
                title: "Consider Professional Consultation",
                message: "Your results suggest moderate risk. Consider discussing with a \
                          healthcare professional for further evaluation.",
            },
            RiskLevel::High => Recommendation {
                title: "Professional Evaluation Recommended",
                message: "Your assessment indicates higher risk. We strongly recommend \
                          consulting with a qualified healthcare professional for \
                          comprehensive evaluation.",
            },
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(RiskLevel::Low),
            "Medium" => Ok(RiskLevel::Medium),
            "High" => Ok(RiskLevel::High),
            other => Err(CoreError::UnknownRiskLevel(other.to_string())),
        }
    }
}

/// Fixed advice shown next to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub title: &'static str,
    pub message: &'static str,
}
