//! Record-store trait definitions.
//!
//! The store is an external collaborator: it persists quizzes, questions,
//! and answers and provides the atomic transaction boundary that every
//! service operation runs inside. `quizmark-store` ships the in-memory
//! implementation; other backends implement the same traits.
//!
//! A transaction is opened once at the outermost operation via
//! [`QuizStore::begin`] and threaded down as `&mut dyn StoreTx`. Dropping a
//! transaction without calling [`StoreTx::commit`] rolls it back.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::input::CreateAnswerInput;
use crate::model::{Answer, Question, QuestionKind, Quiz};

/// Errors raised by a record-store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write referenced a record that does not exist.
    #[error("{entity} {id} not found in store")]
    NotFound { entity: &'static str, id: Uuid },

    /// The backend itself failed (lock poisoning, I/O, connection loss).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Handle to a record store capable of opening transactions.
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Open a new transaction over the current state.
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError>;
}

/// A single atomic transaction.
///
/// All reads observe the transaction's own writes. Writes become visible to
/// other transactions only after `commit`; a dropped transaction leaves the
/// store untouched.
#[async_trait]
pub trait StoreTx: Send {
    /// Insert a new quiz, assigning its id. Questions are inserted separately.
    async fn insert_quiz(&mut self, name: &str) -> Result<Quiz, StoreError>;

    /// Upsert a quiz's own fields (not its children).
    async fn save_quiz(&mut self, quiz: &Quiz) -> Result<(), StoreError>;

    /// Fetch a quiz with its full question/answer graph.
    async fn find_quiz(&mut self, id: Uuid) -> Result<Option<Quiz>, StoreError>;

    /// Remove a quiz, cascading to its questions and their answers.
    async fn remove_quiz(&mut self, id: Uuid) -> Result<(), StoreError>;

    /// Insert a new question under a quiz, assigning its id.
    async fn insert_question(
        &mut self,
        quiz_id: Uuid,
        text: &str,
        kind: QuestionKind,
    ) -> Result<Question, StoreError>;

    /// Upsert a question's own fields (not its answers).
    async fn save_question(&mut self, question: &Question) -> Result<(), StoreError>;

    /// Fetch a question with its answers.
    async fn find_question(&mut self, id: Uuid) -> Result<Option<Question>, StoreError>;

    /// Remove a question, cascading to its answers.
    async fn remove_question(&mut self, id: Uuid) -> Result<(), StoreError>;

    /// Insert a new answer under a question, assigning its id.
    async fn insert_answer(
        &mut self,
        question_id: Uuid,
        answer: &CreateAnswerInput,
    ) -> Result<Answer, StoreError>;

    /// Upsert an answer's fields.
    async fn save_answer(&mut self, answer: &Answer) -> Result<(), StoreError>;

    /// Remove a single answer.
    async fn remove_answer(&mut self, id: Uuid) -> Result<(), StoreError>;

    /// Commit every write performed by this transaction.
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}
