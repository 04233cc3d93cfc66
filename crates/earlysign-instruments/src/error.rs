use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssessmentError {
    #[error("unknown questionnaire: {0}")]
    UnknownQuestionnaire(String),

    #[error("'{value}' is not a recognized answer option")]
    InvalidOption { value: String },

    #[error("question index {index} is out of range (questionnaire has {count} questions)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("assessment incomplete: {} of {count} questions unanswered", missing.len())]
    IncompleteAssessment { missing: Vec<usize>, count: usize },
}
