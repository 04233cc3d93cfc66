use std::sync::LazyLock;

use earlysign_core::models::answer::AnswerSet;
use earlysign_core::models::question::{AnswerOption, Question};
use earlysign_core::models::risk::RiskLevel;
use earlysign_instruments::clock::FixedClock;
use earlysign_instruments::error::AssessmentError;
use earlysign_instruments::instruments::toddler_social::ToddlerSocial;
use earlysign_instruments::scoring::{classify, risk_percentage};
use earlysign_instruments::{Questionnaire, all_questionnaires, get_questionnaire};

fn clock() -> FixedClock {
    FixedClock("2024-05-01T12:30:00Z".parse().unwrap())
}

/// Answer every question, choosing values whose scores sum to `total`.
fn answers_totalling(q: &dyn Questionnaire, total: u32) -> AnswerSet {
    let mut remaining = total;
    let mut answers = AnswerSet::new();
    for index in 0..q.question_count() {
        let option = q
            .options()
            .iter()
            .filter(|o| o.score <= remaining)
            .max_by_key(|o| o.score)
            .unwrap();
        remaining -= option.score;
        answers = q.record_answer(&answers, index, &option.value).unwrap();
    }
    assert_eq!(remaining, 0, "total {total} not reachable");
    answers
}

#[test]
fn toddler_social_shape() {
    let q = ToddlerSocial;
    assert_eq!(q.question_count(), 10);
    assert_eq!(q.options().len(), 5);
    assert_eq!(q.max_score(), 40);
    let ids: Vec<u32> = q.questions().iter().map(|q| q.id).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    assert_eq!(q.option("never").unwrap().score, 4);
    assert_eq!(q.option("always").unwrap().score, 0);
}

#[test]
fn registry_lookup() {
    assert_eq!(all_questionnaires().len(), 1);
    assert_eq!(get_questionnaire("toddler_social").unwrap().name(), "Autism Risk Assessment");
    assert_eq!(
        get_questionnaire("mchat").err(),
        Some(AssessmentError::UnknownQuestionnaire("mchat".to_string()))
    );
}

#[test]
fn percentage_rounds_half_up() {
    assert_eq!(risk_percentage(24, 40), 60);
    assert_eq!(risk_percentage(25, 40), 63);
    assert_eq!(risk_percentage(12, 40), 30);
    assert_eq!(risk_percentage(13, 40), 33);
    assert_eq!(risk_percentage(1, 8), 13);
    assert_eq!(risk_percentage(40, 40), 100);
    assert_eq!(risk_percentage(0, 40), 0);
    assert_eq!(risk_percentage(0, 0), 0);
}

#[test]
fn classification_boundaries() {
    assert_eq!(classify(24, 40), (60, RiskLevel::Medium));
    assert_eq!(classify(25, 40), (63, RiskLevel::High));
    assert_eq!(classify(12, 40), (30, RiskLevel::Low));
    assert_eq!(classify(13, 40), (33, RiskLevel::Medium));
}

#[test]
fn scoring_scenarios() {
    let q = ToddlerSocial;
    for (total, percentage, level) in [
        (24, 60, RiskLevel::Medium),
        (25, 63, RiskLevel::High),
        (12, 30, RiskLevel::Low),
        (13, 33, RiskLevel::Medium),
        (0, 0, RiskLevel::Low),
        (40, 100, RiskLevel::High),
    ] {
        let answers = answers_totalling(&q, total);
        let result = q.score(&answers, &clock()).unwrap();
        assert_eq!(result.total_score, total);
        assert_eq!(result.max_score, 40);
        assert_eq!(result.risk_percentage, percentage, "total {total}");
        assert_eq!(result.risk_level, level, "total {total}");
        assert_eq!(result.answers, answers);
    }
}

#[test]
fn scoring_is_deterministic_with_fixed_clock() {
    let q = ToddlerSocial;
    let answers = answers_totalling(&q, 17);
    let first = q.score(&answers, &clock()).unwrap();
    let second = q.score(&answers, &clock()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.completed_at, clock().0);
}

#[test]
fn invalid_option_leaves_answers_unchanged() {
    let q = ToddlerSocial;
    let answers = q.record_answer(&AnswerSet::new(), 0, "usually").unwrap();
    let before = answers.clone();

    let err = q.record_answer(&answers, 0, "often").unwrap_err();
    assert_eq!(
        err,
        AssessmentError::InvalidOption {
            value: "often".to_string()
        }
    );
    assert_eq!(answers, before);
}

#[test]
fn out_of_range_index_is_rejected() {
    let q = ToddlerSocial;
    let err = q.record_answer(&AnswerSet::new(), 10, "never").unwrap_err();
    assert_eq!(err, AssessmentError::IndexOutOfRange { index: 10, count: 10 });
}

#[test]
fn re_answering_overwrites() {
    let q = ToddlerSocial;
    let answers = q.record_answer(&AnswerSet::new(), 3, "never").unwrap();
    let answers = q.record_answer(&answers, 3, "always").unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers.get(3), Some("always"));
}

#[test]
fn answers_may_arrive_out_of_order() {
    let q = ToddlerSocial;
    let mut answers = AnswerSet::new();
    for index in (0..10).rev() {
        assert!(!q.is_complete(&answers));
        answers = q.record_answer(&answers, index, "sometimes").unwrap();
    }
    assert!(q.is_complete(&answers));
    assert_eq!(q.score(&answers, &clock()).unwrap().total_score, 20);
}

#[test]
fn incomplete_assessment_fails_before_scoring() {
    let q = ToddlerSocial;
    let mut answers = AnswerSet::new();
    for index in [0, 1, 2, 4, 5, 6, 7, 8] {
        answers = q.record_answer(&answers, index, "never").unwrap();
    }
    assert_eq!(q.missing(&answers), vec![3, 9]);

    let err = q.score(&answers, &clock()).unwrap_err();
    assert_eq!(
        err,
        AssessmentError::IncompleteAssessment {
            missing: vec![3, 9],
            count: 10
        }
    );
    assert_eq!(err.to_string(), "assessment incomplete: 2 of 10 questions unanswered");
}

#[test]
fn score_rejects_foreign_answer_sets() {
    let q = ToddlerSocial;
    let complete = answers_totalling(&q, 10);

    let bad_value = complete.with_answer(4, "occasionally");
    assert!(matches!(
        q.score(&bad_value, &clock()),
        Err(AssessmentError::InvalidOption { .. })
    ));

    let extra_index = complete.with_answer(12, "never");
    assert_eq!(
        q.score(&extra_index, &clock()).unwrap_err(),
        AssessmentError::IndexOutOfRange { index: 12, count: 10 }
    );
}

#[test]
fn summary_groups_by_category() {
    let q = ToddlerSocial;
    let answers = q.record_answer(&AnswerSet::new(), 0, "rarely").unwrap();
    let text = q.summary(&answers);

    assert!(text.starts_with("## Autism Risk Assessment\n\n### Social Communication\n"));
    assert_eq!(text.matches("### Social Communication").count(), 1);
    assert!(text.contains("- 1. Does your child look at you when you call their name?: Rarely\n"));
    assert!(text.contains(
        "- 9. Does your child engage in back-and-forth conversation?: (unanswered)\n"
    ));
    assert!(text.contains("### Repetitive Behaviors\n"));
}

/// Scale whose top score cannot be multiplied by the question count in `u32`.
struct OversizedScale;

impl Questionnaire for OversizedScale {
    fn id(&self) -> &str {
        "oversized"
    }

    fn name(&self) -> &str {
        "Oversized"
    }

    fn questions(&self) -> &[Question] {
        static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
            (1..=3).map(|id| Question::new(id, "Prompt", "Any")).collect()
        });
        &QUESTIONS
    }

    fn options(&self) -> &[AnswerOption] {
        static OPTIONS: LazyLock<Vec<AnswerOption>> = LazyLock::new(|| {
            vec![
                AnswerOption::new("low", "Low", 0),
                AnswerOption::new("huge", "Huge", u32::MAX / 2),
            ]
        });
        &OPTIONS
    }
}

#[test]
fn max_score_saturates_instead_of_overflowing() {
    let q = OversizedScale;
    assert_eq!(q.max_score(), u32::MAX);

    let answers = collect_all(&q, "huge");
    let result = q.score(&answers, &clock()).unwrap();
    assert_eq!(result.max_score, u32::MAX);
    assert_eq!(result.total_score, u32::MAX);
    assert_eq!(result.risk_percentage, 100);
    assert_eq!(result.risk_level, RiskLevel::High);
}

fn collect_all(q: &dyn Questionnaire, value: &str) -> AnswerSet {
    (0..q.question_count()).fold(AnswerSet::new(), |answers, index| {
        q.record_answer(&answers, index, value).unwrap()
    })
}
