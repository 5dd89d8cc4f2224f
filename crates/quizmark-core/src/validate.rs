//! Structural validation of questions and their answer batches.
//!
//! Runs before any persistence, at question creation and whenever the
//! reconciler adds answers to an existing question. Check order is fixed:
//! question text, then per-answer kind requirements, then answer counts,
//! then text uniqueness.

use std::collections::HashSet;

use crate::error::{QuizError, Result};
use crate::input::CreateAnswerInput;
use crate::model::QuestionKind;

/// Confirm a candidate answer carries the fields its question's kind requires.
///
/// `Some(false)` satisfies the correct-flag requirement; an absent flag does
/// not. A sorting position must be present and non-zero.
pub fn validate_answer(
    kind: QuestionKind,
    question_text: &str,
    answer: &CreateAnswerInput,
) -> Result<()> {
    if answer.text.is_empty() {
        return Err(QuizError::EmptyField { field: "answer" });
    }

    match kind {
        QuestionKind::SingleAnswer | QuestionKind::MultipleAnswer => {
            if answer.correct.is_none() {
                return Err(QuizError::InvalidKind {
                    question: question_text.to_owned(),
                    detail: format!(
                        "answer '{}' is missing the 'correct' flag required by a {kind} question",
                        answer.text
                    ),
                });
            }
        }
        QuestionKind::Sorting => {
            if !answer.position.is_some_and(|p| p != 0) {
                return Err(QuizError::InvalidKind {
                    question: question_text.to_owned(),
                    detail: format!(
                        "answer '{}' is missing the position required by a sorting question",
                        answer.text
                    ),
                });
            }
        }
        QuestionKind::PlainText => {}
    }

    Ok(())
}

/// Validate a question's text, kind, and full candidate answer batch as a unit.
pub fn validate_question(
    text: &str,
    kind: QuestionKind,
    answers: &[CreateAnswerInput],
) -> Result<()> {
    if text.is_empty() {
        return Err(QuizError::EmptyField { field: "question" });
    }

    for answer in answers {
        validate_answer(kind, text, answer)?;
    }

    match kind {
        QuestionKind::PlainText => {
            if answers.len() != 1 {
                return Err(QuizError::InvalidAnswerCount {
                    question: text.to_owned(),
                    detail: format!(
                        "a plain-text question must have exactly one answer, found {}",
                        answers.len()
                    ),
                });
            }
        }
        QuestionKind::SingleAnswer => {
            let correct = answers
                .iter()
                .filter(|a| a.correct == Some(true))
                .count();
            if correct != 1 {
                return Err(QuizError::InvalidAnswerCount {
                    question: text.to_owned(),
                    detail: format!(
                        "a single-answer question must have exactly one answer marked correct, found {correct}"
                    ),
                });
            }
        }
        QuestionKind::MultipleAnswer | QuestionKind::Sorting => {}
    }

    check_unique_texts(text, answers, &HashSet::new())
}

/// Reject answer-text collisions, both within the batch and against an
/// already-persisted set of texts (used for incremental additions).
pub fn check_unique_texts(
    question_text: &str,
    answers: &[CreateAnswerInput],
    existing: &HashSet<&str>,
) -> Result<()> {
    let mut seen: HashSet<&str> = existing.clone();
    for answer in answers {
        if !seen.insert(answer.text.as_str()) {
            return Err(QuizError::DuplicateAnswer {
                question: question_text.to_owned(),
                answer: answer.text.clone(),
            });
        }
    }
    Ok(())
}
