//! Quiz operations: creation with initial questions, rename, removal.

use uuid::Uuid;

use quizmark_core::error::{QuizError, Result};
use quizmark_core::input::{CreateQuizInput, UpdateQuizInput};
use quizmark_core::model::Quiz;

use crate::question::insert_question;
use crate::QuizService;

impl QuizService {
    /// Create a quiz and its initial questions atomically.
    ///
    /// Every question batch is validated before it is inserted; any failure
    /// rolls back the quiz and all previously inserted questions. A
    /// `quiz_id` carried on a question input is ignored in favor of the
    /// freshly created quiz's id.
    pub async fn create_quiz(&self, input: CreateQuizInput) -> Result<Quiz> {
        if input.name.is_empty() {
            return Err(QuizError::EmptyField { field: "name" });
        }

        let mut tx = self.store.begin().await?;
        let quiz = tx.insert_quiz(&input.name).await?;
        for question_input in &input.questions {
            insert_question(tx.as_mut(), quiz.id, question_input).await?;
        }
        let created = tx
            .find_quiz(quiz.id)
            .await?
            .ok_or(QuizError::QuizNotFound(quiz.id))?;
        tx.commit().await?;

        tracing::info!(quiz_id = %created.id, questions = created.questions.len(), "created quiz");
        Ok(created)
    }

    /// Rename an existing quiz.
    pub async fn update_quiz(&self, patch: UpdateQuizInput) -> Result<Quiz> {
        if patch.name.is_empty() {
            return Err(QuizError::EmptyField { field: "name" });
        }

        let mut tx = self.store.begin().await?;
        let mut quiz = tx
            .find_quiz(patch.id)
            .await?
            .ok_or(QuizError::QuizNotFound(patch.id))?;
        quiz.name = patch.name;
        tx.save_quiz(&quiz).await?;
        let updated = tx
            .find_quiz(patch.id)
            .await?
            .ok_or(QuizError::QuizNotFound(patch.id))?;
        tx.commit().await?;

        tracing::info!(quiz_id = %updated.id, "updated quiz");
        Ok(updated)
    }

    /// Remove a quiz, its questions, and their answers; returns the removed
    /// quiz.
    pub async fn remove_quiz(&self, id: Uuid) -> Result<Quiz> {
        let mut tx = self.store.begin().await?;
        let quiz = tx
            .find_quiz(id)
            .await?
            .ok_or(QuizError::QuizNotFound(id))?;
        tx.remove_quiz(id).await?;
        tx.commit().await?;

        tracing::info!(quiz_id = %id, "removed quiz");
        Ok(quiz)
    }
}
