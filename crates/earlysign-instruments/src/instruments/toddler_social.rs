use std::sync::LazyLock;

use earlysign_core::models::question::{AnswerOption, Question};

use crate::Questionnaire;

/// Ten-item parent-report screener for early social-communication signs.
/// Frequency scale from "Always" (0) to "Never" (4); higher totals mean
/// more concern. Max score 40.
pub struct ToddlerSocial;

pub const ID: &str = "toddler_social";

impl Questionnaire for ToddlerSocial {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "Autism Risk Assessment"
    }

    fn questions(&self) -> &[Question] {
        static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
            let social = "Social Communication";
            let gestural = "Gestural Communication";
            vec![
                Question::new(1, "Does your child look at you when you call their name?", social),
                Question::new(
                    2,
                    "How easy is it for you to get eye contact with your child?",
                    social,
                ),
                Question::new(
                    3,
                    "Does your child point to indicate they want something?",
                    gestural,
                ),
                Question::new(4, "Does your child point to share interest with you?", gestural),
                Question::new(
                    5,
                    "Does your child pretend to play (e.g., care for dolls, talk on phone)?",
                    "Imaginative Play",
                ),
                Question::new(
                    6,
                    "Does your child follow your gaze when you look at something?",
                    "Social Awareness",
                ),
                Question::new(
                    7,
                    "Does your child show concern when others are hurt or upset?",
                    "Empathy",
                ),
                Question::new(
                    8,
                    "Does your child use simple gestures (e.g., waving goodbye)?",
                    gestural,
                ),
                Question::new(9, "Does your child engage in back-and-forth conversation?", social),
                Question::new(
                    10,
                    "Does your child have any repetitive behaviors or intense interests?",
                    "Repetitive Behaviors",
                ),
            ]
        });
        &QUESTIONS
    }

    fn options(&self) -> &[AnswerOption] {
        static OPTIONS: LazyLock<Vec<AnswerOption>> = LazyLock::new(|| {
            vec![
                AnswerOption::new("always", "Always", 0),
                AnswerOption::new("usually", "Usually", 1),
                AnswerOption::new("sometimes", "Sometimes", 2),
                AnswerOption::new("rarely", "Rarely", 3),
                AnswerOption::new("never", "Never", 4),
            ]
        });
        &OPTIONS
    }
}
