//! The quizmark error taxonomy.
//!
//! One variant per failure kind so API consumers can branch on the cause
//! without string matching. [`QuizError::code`] exposes a stable
//! machine-readable identifier per kind.

use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// Errors raised by validation, grading, and the service operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// A required text field has zero length.
    #[error("required field '{field}' must not be empty")]
    EmptyField { field: &'static str },

    /// An answer or submission lacks what the question's kind requires.
    #[error("question '{question}': {detail}")]
    InvalidKind { question: String, detail: String },

    /// Wrong number of answers for the question's kind.
    #[error("question '{question}': {detail}")]
    InvalidAnswerCount { question: String, detail: String },

    /// Two answers for the same question share identical text.
    #[error("duplicate answer '{answer}' for question '{question}'")]
    DuplicateAnswer { question: String, answer: String },

    /// An answer id referenced in an update does not belong to the question.
    #[error("answer {answer_id} does not belong to question {question_id}")]
    AnswerNotOwned { answer_id: Uuid, question_id: Uuid },

    /// A question referenced during submission belongs to a different quiz.
    #[error("question {question_id} does not belong to quiz {quiz_id}")]
    QuestionNotInQuiz { question_id: Uuid, quiz_id: Uuid },

    /// A submitted answer id cannot be resolved within the question.
    #[error("answer '{answer_id}' cannot be resolved within question {question_id}")]
    UnknownAnswer {
        answer_id: String,
        question_id: Uuid,
    },

    /// The referenced question does not exist.
    #[error("question {0} not found")]
    QuestionNotFound(Uuid),

    /// The referenced quiz does not exist.
    #[error("quiz {0} not found")]
    QuizNotFound(Uuid),

    /// A failure in the record-store collaborator.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl QuizError {
    /// Stable machine-readable identifier for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            QuizError::EmptyField { .. } => "EMPTY_FIELD",
            QuizError::InvalidKind { .. } => "INVALID_KIND",
            QuizError::InvalidAnswerCount { .. } => "INVALID_ANSWER_COUNT",
            QuizError::DuplicateAnswer { .. } => "DUPLICATE_ANSWER",
            QuizError::AnswerNotOwned { .. } => "ANSWER_NOT_OWNED",
            QuizError::QuestionNotInQuiz { .. } => "QUESTION_NOT_IN_QUIZ",
            QuizError::UnknownAnswer { .. } => "UNKNOWN_ANSWER",
            QuizError::QuestionNotFound(_) => "QUESTION_NOT_FOUND",
            QuizError::QuizNotFound(_) => "QUIZ_NOT_FOUND",
            QuizError::Store(_) => "STORE_FAILURE",
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, QuizError>;
