use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::answer::AnswerSet;
use super::risk::RiskLevel;

/// The outcome of one completed assessment run, as persisted.
///
/// Built in full by the scoring step and written as one unit; a newer result
/// replaces an older one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AssessmentResult {
    pub risk_level: RiskLevel,
    pub risk_percentage: u8,
    pub total_score: u32,
    pub max_score: u32,
    pub completed_at: jiff::Timestamp,
    pub answers: AnswerSet,
}

impl AssessmentResult {
    /// Check the relationships between fields that scoring guarantees.
    ///
    /// Returns a description of the first violation. Records read back from
    /// storage that fail this are treated as corrupt.
    pub fn check_consistency(&self) -> Result<(), String> {
        if self.risk_percentage > 100 {
            return Err(format!(
                "riskPercentage {} is outside [0, 100]",
                self.risk_percentage
            ));
        }
        if self.total_score > self.max_score {
            return Err(format!(
                "totalScore {} exceeds maxScore {}",
                self.total_score, self.max_score
            ));
        }
        let expected = RiskLevel::from_percentage(self.risk_percentage);
        if self.risk_level != expected {
            return Err(format!(
                "riskLevel {} does not match riskPercentage {} (expected {})",
                self.risk_level, self.risk_percentage, expected
            ));
        }
        Ok(())
    }

    /// `"24/40"`-style score line used by dashboards.
    pub fn score_fraction(&self) -> String {
        format!("{}/{}", self.total_score, self.max_score)
    }
}
