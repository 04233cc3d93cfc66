use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A respondent's answers, keyed by 0-based question index.
///
/// Serializes as a JSON object with stringified index keys, e.g.
/// `{"0": "always", "3": "rarely"}`. Missing keys are unanswered questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerSet(BTreeMap<usize, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with `index` set to `value`, replacing any prior answer.
    ///
    /// No validation happens here; questionnaires validate before calling this.
    pub fn with_answer(&self, index: usize, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.0.insert(index, value.into());
        next
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(&index).map(String::as_str)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Answers in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0.iter().map(|(index, value)| (*index, value.as_str()))
    }
}

impl FromIterator<(usize, String)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (usize, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
