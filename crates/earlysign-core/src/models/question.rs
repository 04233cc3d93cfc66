use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single prompt in a questionnaire.
///
/// `id` is the 1-based ordinal shown to respondents. Answers are keyed by the
/// 0-based position of the question in its questionnaire, not by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub category: String,
}

impl Question {
    pub fn new(id: u32, text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            category: category.into(),
        }
    }
}

/// One choice on the frequency scale shared by every question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerOption {
    /// Stable identifier stored in answer sets (e.g. "always").
    pub value: String,
    pub label: String,
    pub score: u32,
}

impl AnswerOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, score: u32) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            score,
        }
    }
}
