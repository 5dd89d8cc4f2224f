//! Request shapes accepted by the service operations.
//!
//! These are plain data with no transport framing. Update inputs use
//! `Option` for "leave unchanged"; list fields default to empty.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;
use crate::model::QuestionKind;

/// A candidate answer supplied at question creation (or as a new answer
/// during an update).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAnswerInput {
    pub text: String,
    #[serde(default)]
    pub correct: Option<bool>,
    #[serde(default)]
    pub position: Option<u32>,
}

/// A candidate question with its initial answer batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuestionInput {
    pub text: String,
    pub kind: QuestionKind,
    #[serde(default)]
    pub answers: Vec<CreateAnswerInput>,
    /// Target quiz. Required for standalone question creation; overridden
    /// by the freshly created quiz's id inside `create_quiz`.
    #[serde(default)]
    pub quiz_id: Option<Uuid>,
}

/// A new quiz with its initial questions, created atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuizInput {
    pub name: String,
    #[serde(default)]
    pub questions: Vec<CreateQuestionInput>,
}

/// An edit to an existing answer. `None` fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAnswerInput {
    pub id: Uuid,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub correct: Option<bool>,
    #[serde(default)]
    pub position: Option<u32>,
}

/// A partial update to a question and its answer collection.
///
/// The question's kind is fixed at creation and cannot be patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQuestionInput {
    pub id: Uuid,
    #[serde(default)]
    pub text: Option<String>,
    /// Edits to existing answers, resolved by id.
    #[serde(default)]
    pub answers: Vec<UpdateAnswerInput>,
    /// Brand-new answers to add.
    #[serde(default)]
    pub new_answers: Vec<CreateAnswerInput>,
    /// Ids of answers to delete.
    #[serde(default)]
    pub delete_answers: Vec<Uuid>,
}

/// A rename of an existing quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQuizInput {
    pub id: Uuid,
    pub name: String,
}

/// One submitted answer on the wire: a question id plus either answer ids
/// (as strings) or, for plain-text questions, the free text itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: Uuid,
    #[serde(default)]
    pub answers: Vec<String>,
}

/// A typed submission, derived from [`SubmittedAnswer`] per question kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Single-answer: one chosen answer id.
    Choice(Uuid),
    /// Multiple-answer: a set of chosen answer ids (order irrelevant).
    Choices(Vec<Uuid>),
    /// Sorting: answer ids in the submitted order.
    Ordering(Vec<Uuid>),
    /// Plain-text: the free text as given.
    Text(String),
}

impl Submission {
    /// Interpret a raw wire submission against the question's kind.
    ///
    /// Single-answer and plain-text use the first element and require one
    /// to be present; multiple-answer and sorting accept any number of ids
    /// (an empty set grades as incorrect rather than failing). An
    /// unparseable id is reported as `UnknownAnswer`.
    pub fn from_raw(
        kind: QuestionKind,
        question_id: Uuid,
        raw: &[String],
    ) -> Result<Self, QuizError> {
        let parse = |value: &String| {
            Uuid::parse_str(value).map_err(|_| QuizError::UnknownAnswer {
                answer_id: value.clone(),
                question_id,
            })
        };

        match kind {
            QuestionKind::PlainText => {
                let text = raw
                    .first()
                    .ok_or(QuizError::EmptyField { field: "answers" })?;
                Ok(Submission::Text(text.clone()))
            }
            QuestionKind::SingleAnswer => {
                let value = raw
                    .first()
                    .ok_or(QuizError::EmptyField { field: "answers" })?;
                Ok(Submission::Choice(parse(value)?))
            }
            QuestionKind::MultipleAnswer => Ok(Submission::Choices(
                raw.iter().map(parse).collect::<Result<_, _>>()?,
            )),
            QuestionKind::Sorting => Ok(Submission::Ordering(
                raw.iter().map(parse).collect::<Result<_, _>>()?,
            )),
        }
    }

    /// The answer ids referenced by this submission.
    pub fn ids(&self) -> &[Uuid] {
        match self {
            Submission::Choice(id) => std::slice::from_ref(id),
            Submission::Choices(ids) | Submission::Ordering(ids) => ids,
            Submission::Text(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_single_takes_first_id() {
        let question_id = Uuid::new_v4();
        let answer_id = Uuid::new_v4();
        let submission = Submission::from_raw(
            QuestionKind::SingleAnswer,
            question_id,
            &[answer_id.to_string()],
        )
        .unwrap();
        assert_eq!(submission, Submission::Choice(answer_id));
    }

    #[test]
    fn raw_single_rejects_empty() {
        let err =
            Submission::from_raw(QuestionKind::SingleAnswer, Uuid::new_v4(), &[]).unwrap_err();
        assert_eq!(err.code(), "EMPTY_FIELD");
    }

    #[test]
    fn raw_unparseable_id_is_unknown_answer() {
        let err = Submission::from_raw(
            QuestionKind::MultipleAnswer,
            Uuid::new_v4(),
            &["not-a-uuid".into()],
        )
        .unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_ANSWER");
    }

    #[test]
    fn raw_multiple_accepts_empty_set() {
        let submission =
            Submission::from_raw(QuestionKind::MultipleAnswer, Uuid::new_v4(), &[]).unwrap();
        assert_eq!(submission, Submission::Choices(vec![]));
    }

    #[test]
    fn raw_plain_text_passes_through() {
        let submission = Submission::from_raw(
            QuestionKind::PlainText,
            Uuid::new_v4(),
            &["  san SAlvador.  ".into()],
        )
        .unwrap();
        assert_eq!(submission, Submission::Text("  san SAlvador.  ".into()));
    }

    #[test]
    fn ids_of_text_submission_is_empty() {
        assert!(Submission::Text("x".into()).ids().is_empty());
        let id = Uuid::new_v4();
        assert_eq!(Submission::Choice(id).ids(), &[id]);
    }
}
