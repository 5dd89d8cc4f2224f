//! Core data model types for quizmark.
//!
//! These are the fundamental types that the entire quizmark system uses
//! to represent quizzes, questions, and their answer sets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The fixed category of a question.
///
/// The kind determines which [`Answer`] fields are mandatory and how a
/// submission is graded. A question keeps its kind for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Exactly one answer is flagged correct; a submission picks one id.
    SingleAnswer,
    /// Any subset of answers may be flagged correct; a submission is a set of ids.
    MultipleAnswer,
    /// Answers carry positions; a submission is an ordered list of ids.
    Sorting,
    /// A single canonical answer text; a submission is free text.
    PlainText,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::SingleAnswer => write!(f, "single-answer"),
            QuestionKind::MultipleAnswer => write!(f, "multiple-answer"),
            QuestionKind::Sorting => write!(f, "sorting"),
            QuestionKind::PlainText => write!(f, "plain-text"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single-answer" | "single" => Ok(QuestionKind::SingleAnswer),
            "multiple-answer" | "multiple" => Ok(QuestionKind::MultipleAnswer),
            "sorting" => Ok(QuestionKind::Sorting),
            "plain-text" | "text" => Ok(QuestionKind::PlainText),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}

/// A stored answer belonging to exactly one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Unique identifier, assigned by the store on insert.
    pub id: Uuid,
    /// Display text. Unique within the owning question.
    pub text: String,
    /// Whether this answer is correct. Required (`Some`) for single-answer
    /// and multiple-answer questions; unused otherwise.
    #[serde(default)]
    pub correct: Option<bool>,
    /// Position in the canonical order. Required and non-zero for sorting
    /// questions; unused otherwise.
    #[serde(default)]
    pub position: Option<u32>,
    /// Back-reference to the owning question.
    pub question_id: Uuid,
}

/// A stored question with its full answer set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier, assigned by the store on insert.
    pub id: Uuid,
    /// Question text shown to the user. Never empty.
    pub text: String,
    /// The question's kind.
    pub kind: QuestionKind,
    /// The answers owned by this question.
    #[serde(default)]
    pub answers: Vec<Answer>,
    /// Back-reference to the owning quiz.
    pub quiz_id: Uuid,
}

impl Question {
    /// Look up an owned answer by id.
    pub fn answer(&self, id: Uuid) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == id)
    }

    /// Whether the given answer id belongs to this question.
    pub fn owns_answer(&self, id: Uuid) -> bool {
        self.answer(id).is_some()
    }

    /// The answers sorted ascending by `position`.
    ///
    /// Only meaningful for sorting questions, where every answer carries a
    /// distinct position. Answers without a position sort last.
    pub fn canonical_order(&self) -> Vec<&Answer> {
        let mut ordered: Vec<&Answer> = self.answers.iter().collect();
        ordered.sort_by_key(|a| a.position.unwrap_or(u32::MAX));
        ordered
    }

    /// The answers flagged `correct = true`.
    pub fn correct_answers(&self) -> Vec<&Answer> {
        self.answers
            .iter()
            .filter(|a| a.correct == Some(true))
            .collect()
    }
}

/// A quiz: a named, order-irrelevant collection of questions.
///
/// Owns its questions; removing a quiz removes its questions (and their
/// answers) via the store's cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique identifier, assigned by the store on insert.
    pub id: Uuid,
    /// Display name. Never empty.
    pub name: String,
    /// The questions owned by this quiz.
    #[serde(default)]
    pub questions: Vec<Question>,
}
