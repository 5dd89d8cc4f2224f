//! The grading engine.
//!
//! Pure functions from a question and a submission to a [`GradeResult`].
//! Each question is atomically correct or incorrect; there is no partial
//! credit. The correct-answer projection is shared with the aggregator's
//! synthesis of unanswered questions so both paths label identically.

use uuid::Uuid;

use crate::error::{QuizError, Result};
use crate::input::Submission;
use crate::model::{Answer, Question, QuestionKind};
use crate::results::{AnswerLabel, GradeResult};

/// Grade a submission against a question. Pure; dispatches on the
/// question's kind.
pub fn grade(question: &Question, submission: &Submission) -> Result<GradeResult> {
    match (question.kind, submission) {
        (QuestionKind::SingleAnswer, Submission::Choice(id)) => grade_single(question, *id),
        (QuestionKind::MultipleAnswer, Submission::Choices(ids)) => grade_multiple(question, ids),
        (QuestionKind::Sorting, Submission::Ordering(ids)) => grade_sorting(question, ids),
        (QuestionKind::PlainText, Submission::Text(text)) => grade_plain_text(question, text),
        (kind, _) => Err(QuizError::InvalidKind {
            question: question.text.clone(),
            detail: format!("submission shape does not match a {kind} question"),
        }),
    }
}

/// The canonical correct answers of a question, labeled for display.
///
/// Sorting answers are labeled `"text - position"` so the ordering is
/// explicit in output; the plain-text canonical answer keeps its stored
/// text. Used by both [`grade`] and the synthesis of unanswered questions.
pub fn project_correct_answers(question: &Question) -> Vec<AnswerLabel> {
    match question.kind {
        QuestionKind::PlainText => question
            .answers
            .iter()
            .map(|a| AnswerLabel {
                id: Some(a.id),
                text: a.text.clone(),
            })
            .collect(),
        QuestionKind::Sorting => question
            .canonical_order()
            .iter()
            .map(|a| AnswerLabel {
                id: Some(a.id),
                text: format!("{} - {}", a.text, a.position.unwrap_or_default()),
            })
            .collect(),
        QuestionKind::SingleAnswer | QuestionKind::MultipleAnswer => question
            .correct_answers()
            .iter()
            .map(|a| AnswerLabel {
                id: Some(a.id),
                text: a.text.clone(),
            })
            .collect(),
    }
}

/// Synthesize the result for a question the caller did not answer.
pub fn unanswered_result(question: &Question) -> GradeResult {
    GradeResult {
        question_id: question.id,
        question_text: question.text.clone(),
        answered: false,
        correct: false,
        given_answers: Vec::new(),
        correct_answers: project_correct_answers(question),
    }
}

/// Normalize free text for plain-text comparison: lowercase, trim, collapse
/// internal space runs, and strip `.`, `,`, `-` anywhere.
pub fn normalize_free_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let trimmed = lowered.trim();
    let mut out = String::with_capacity(trimmed.len());
    let mut prev_space = false;
    for c in trimmed.chars() {
        if c == ' ' {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            if !matches!(c, '.' | ',' | '-') {
                out.push(c);
            }
            prev_space = false;
        }
    }
    out
}

fn resolve<'a>(question: &'a Question, id: Uuid) -> Result<&'a Answer> {
    question.answer(id).ok_or_else(|| QuizError::UnknownAnswer {
        answer_id: id.to_string(),
        question_id: question.id,
    })
}

fn label(answer: &Answer) -> AnswerLabel {
    AnswerLabel {
        id: Some(answer.id),
        text: answer.text.clone(),
    }
}

fn result(question: &Question, correct: bool, given: Vec<AnswerLabel>) -> GradeResult {
    GradeResult {
        question_id: question.id,
        question_text: question.text.clone(),
        answered: true,
        correct,
        given_answers: given,
        correct_answers: project_correct_answers(question),
    }
}

fn grade_single(question: &Question, id: Uuid) -> Result<GradeResult> {
    let chosen = resolve(question, id)?;
    let correct = chosen.correct == Some(true);
    Ok(result(question, correct, vec![label(chosen)]))
}

fn grade_multiple(question: &Question, ids: &[Uuid]) -> Result<GradeResult> {
    let chosen = ids
        .iter()
        .map(|id| resolve(question, *id))
        .collect::<Result<Vec<_>>>()?;

    let correct_ids: std::collections::HashSet<Uuid> =
        question.correct_answers().iter().map(|a| a.id).collect();
    let chosen_ids: std::collections::HashSet<Uuid> = ids.iter().copied().collect();

    // Set equality: a missing correct id or an extra incorrect one both fail.
    let correct = chosen_ids == correct_ids;
    let given = chosen.into_iter().map(label).collect();
    Ok(result(question, correct, given))
}

fn grade_sorting(question: &Question, ids: &[Uuid]) -> Result<GradeResult> {
    let chosen = ids
        .iter()
        .map(|id| resolve(question, *id))
        .collect::<Result<Vec<_>>>()?;

    let canonical = question.canonical_order();
    let correct = ids.len() == canonical.len()
        && canonical.iter().zip(ids).all(|(a, id)| a.id == *id);

    // Given answers are labeled with the submitted index, not the stored
    // position, so a wrong order is visible in the output.
    let given = chosen
        .iter()
        .enumerate()
        .map(|(index, a)| AnswerLabel {
            id: Some(a.id),
            text: format!("{} - {}", a.text, index + 1),
        })
        .collect();
    Ok(result(question, correct, given))
}

fn grade_plain_text(question: &Question, text: &str) -> Result<GradeResult> {
    let canonical = question
        .answers
        .first()
        .ok_or_else(|| QuizError::InvalidAnswerCount {
            question: question.text.clone(),
            detail: "a plain-text question must have exactly one answer, found 0".into(),
        })?;

    let correct = normalize_free_text(text) == normalize_free_text(&canonical.text);
    let given = vec![AnswerLabel {
        id: None,
        text: text.to_owned(),
    }];
    Ok(result(question, correct, given))
}
