//! earlysign-instruments
//!
//! Screening questionnaire definitions and scoring. Pure computation with no
//! storage dependency. Each questionnaire supplies its fixed questions and
//! answer scale; recording, completeness checks and scoring are shared.

pub mod clock;
pub mod error;
pub mod instruments;
pub mod scoring;

use earlysign_core::models::answer::AnswerSet;
use earlysign_core::models::question::{AnswerOption, Question};
use earlysign_core::models::result::AssessmentResult;

use clock::Clock;
use error::AssessmentError;

/// Trait implemented by each screening questionnaire.
pub trait Questionnaire: Send + Sync {
    /// Unique identifier (e.g., "toddler_social").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// The fixed, ordered questions.
    fn questions(&self) -> &[Question];

    /// The answer scale applied to every question.
    fn options(&self) -> &[AnswerOption];

    fn question_count(&self) -> usize {
        self.questions().len()
    }

    fn option(&self, value: &str) -> Option<&AnswerOption> {
        self.options().iter().find(|o| o.value == value)
    }

    /// Highest achievable total: every question answered with the top option.
    ///
    /// Saturates at `u32::MAX` for questionnaires whose scale cannot fit.
    fn max_score(&self) -> u32 {
        let top = self.options().iter().map(|o| o.score).max().unwrap_or(0);
        if top == 0 {
            return 0;
        }
        u32::try_from(self.question_count())
            .ok()
            .and_then(|count| top.checked_mul(count))
            .unwrap_or(u32::MAX)
    }

    /// Return `answers` with `index` set to `value`.
    ///
    /// The input set is left as it was, including on error.
    fn record_answer(
        &self,
        answers: &AnswerSet,
        index: usize,
        value: &str,
    ) -> Result<AnswerSet, AssessmentError> {
        if self.option(value).is_none() {
            return Err(AssessmentError::InvalidOption {
                value: value.to_string(),
            });
        }
        let count = self.question_count();
        if index >= count {
            return Err(AssessmentError::IndexOutOfRange { index, count });
        }
        Ok(answers.with_answer(index, value))
    }

    /// Indices in `[0, question_count)` with no answer.
    fn missing(&self, answers: &AnswerSet) -> Vec<usize> {
        (0..self.question_count())
            .filter(|index| !answers.contains(*index))
            .collect()
    }

    fn is_complete(&self, answers: &AnswerSet) -> bool {
        (0..self.question_count()).all(|index| answers.contains(index))
    }

    /// Score a complete answer set.
    ///
    /// Validation runs before any arithmetic; on error nothing is produced.
    fn score(
        &self,
        answers: &AnswerSet,
        clock: &dyn Clock,
    ) -> Result<AssessmentResult, AssessmentError> {
        let count = self.question_count();
        let missing = self.missing(answers);
        if !missing.is_empty() {
            return Err(AssessmentError::IncompleteAssessment { missing, count });
        }

        let mut total_score: u32 = 0;
        for (index, value) in answers.iter() {
            if index >= count {
                return Err(AssessmentError::IndexOutOfRange { index, count });
            }
            let option = self
                .option(value)
                .ok_or_else(|| AssessmentError::InvalidOption {
                    value: value.to_string(),
                })?;
            total_score = total_score.saturating_add(option.score);
        }

        let max_score = self.max_score();
        let (risk_percentage, risk_level) = scoring::classify(total_score, max_score);

        tracing::debug!(
            questionnaire = self.id(),
            total_score,
            max_score,
            risk_percentage,
            risk_level = %risk_level,
            "assessment scored"
        );

        Ok(AssessmentResult {
            risk_level,
            risk_percentage,
            total_score,
            max_score,
            completed_at: clock.now(),
            answers: answers.clone(),
        })
    }

    /// Render answers as plain text grouped by question category, categories
    /// in order of first appearance.
    fn summary(&self, answers: &AnswerSet) -> String {
        let mut categories: Vec<&str> = Vec::new();
        for question in self.questions() {
            if !categories.contains(&question.category.as_str()) {
                categories.push(&question.category);
            }
        }

        let mut output = format!("## {}\n\n", self.name());
        for category in categories {
            output.push_str(&format!("### {category}\n"));
            for (index, question) in self.questions().iter().enumerate() {
                if question.category != category {
                    continue;
                }
                let answer = match answers.get(index) {
                    Some(value) => self.option(value).map_or(value, |o| o.label.as_str()),
                    None => "(unanswered)",
                };
                output.push_str(&format!("- {}. {}: {}\n", question.id, question.text, answer));
            }
            output.push('\n');
        }
        output
    }
}

/// Return all registered questionnaires.
pub fn all_questionnaires() -> Vec<Box<dyn Questionnaire>> {
    vec![Box::new(instruments::toddler_social::ToddlerSocial)]
}

/// Look up a questionnaire by ID.
pub fn get_questionnaire(id: &str) -> Result<Box<dyn Questionnaire>, AssessmentError> {
    all_questionnaires()
        .into_iter()
        .find(|q| q.id() == id)
        .ok_or_else(|| AssessmentError::UnknownQuestionnaire(id.to_string()))
}
