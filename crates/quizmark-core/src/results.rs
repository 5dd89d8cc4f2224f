//! Grading result types.
//!
//! A [`GradeResult`] is produced per question; a [`QuizResult`] aggregates
//! them with the overall percentage score. Neither is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A labeled answer reference in a grade result.
///
/// `id` is absent for free-text submissions, which reference no stored
/// answer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerLabel {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub text: String,
}

/// The verdict for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    pub question_id: Uuid,
    pub question_text: String,
    /// Whether the caller submitted anything for this question.
    pub answered: bool,
    /// The question-level verdict; always false when unanswered.
    pub correct: bool,
    /// What the caller submitted, labeled for display.
    pub given_answers: Vec<AnswerLabel>,
    /// The canonical correct answers, labeled for display.
    pub correct_answers: Vec<AnswerLabel>,
}

/// The aggregate result of submitting answers against a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    pub quiz_id: Uuid,
    /// Percentage of quiz questions answered correctly, 0–100, rounded to
    /// two decimal places.
    pub score: f64,
    pub graded_at: DateTime<Utc>,
    /// One entry per quiz question, answered or not. Order is not
    /// significant.
    pub questions: Vec<GradeResult>,
}

/// Percentage of `correct` out of `total`, rounded to two decimals.
///
/// A quiz with no questions scores 0.0.
pub fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = correct as f64 * 100.0 / total as f64;
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_to_two_decimals() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(1, 2), 50.0);
        assert_eq!(percentage(3, 3), 100.0);
        assert_eq!(percentage(0, 5), 0.0);
    }

    #[test]
    fn empty_total_scores_zero() {
        assert_eq!(percentage(0, 0), 0.0);
    }
}
