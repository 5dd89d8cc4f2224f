//! Question operations: creation, reconciliation of answer edits, removal.

use std::collections::HashSet;

use uuid::Uuid;

use quizmark_core::error::{QuizError, Result};
use quizmark_core::input::{CreateQuestionInput, UpdateQuestionInput};
use quizmark_core::model::Question;
use quizmark_core::store::StoreTx;
use quizmark_core::validate;

use crate::QuizService;

impl QuizService {
    /// Create a question with its initial answers under an existing quiz.
    ///
    /// The whole batch is validated before anything is inserted, and the
    /// question plus all answers are persisted in one transaction.
    pub async fn create_question(&self, input: CreateQuestionInput) -> Result<Question> {
        let quiz_id = input
            .quiz_id
            .ok_or(QuizError::EmptyField { field: "quiz_id" })?;

        let mut tx = self.store.begin().await?;
        tx.find_quiz(quiz_id)
            .await?
            .ok_or(QuizError::QuizNotFound(quiz_id))?;

        let question = insert_question(tx.as_mut(), quiz_id, &input).await?;
        tx.commit().await?;

        tracing::info!(question_id = %question.id, %quiz_id, "created question");
        Ok(question)
    }

    /// Apply a partial update to a question and its answer collection.
    ///
    /// Steps run in a fixed order: resolve the question, apply edits to
    /// existing answers, apply deletions, validate and insert new answers,
    /// then apply the question's own field edits. New-answer uniqueness is
    /// checked against the answer texts as loaded at the start of the call,
    /// before edits and deletions — so deleting "Paris" and re-adding
    /// "Paris" in one call is still rejected as a duplicate.
    pub async fn update_question(&self, patch: UpdateQuestionInput) -> Result<Question> {
        let mut tx = self.store.begin().await?;

        let question = tx
            .find_question(patch.id)
            .await?
            .ok_or(QuizError::QuestionNotFound(patch.id))?;
        let snapshot_texts: Vec<String> =
            question.answers.iter().map(|a| a.text.clone()).collect();

        for edit in &patch.answers {
            let existing = question
                .answer(edit.id)
                .ok_or(QuizError::AnswerNotOwned {
                    answer_id: edit.id,
                    question_id: question.id,
                })?;
            let mut updated = existing.clone();
            if let Some(text) = &edit.text {
                if text.is_empty() {
                    return Err(QuizError::EmptyField { field: "answer" });
                }
                updated.text = text.clone();
            }
            if let Some(correct) = edit.correct {
                updated.correct = Some(correct);
            }
            if let Some(position) = edit.position {
                updated.position = Some(position);
            }
            tx.save_answer(&updated).await?;
        }

        for answer_id in &patch.delete_answers {
            if !question.owns_answer(*answer_id) {
                return Err(QuizError::AnswerNotOwned {
                    answer_id: *answer_id,
                    question_id: question.id,
                });
            }
            tx.remove_answer(*answer_id).await?;
        }

        for new_answer in &patch.new_answers {
            validate::validate_answer(question.kind, &question.text, new_answer)?;
        }
        let existing: HashSet<&str> = snapshot_texts.iter().map(String::as_str).collect();
        validate::check_unique_texts(&question.text, &patch.new_answers, &existing)?;
        for new_answer in &patch.new_answers {
            tx.insert_answer(question.id, new_answer).await?;
        }

        if let Some(text) = &patch.text {
            if text.is_empty() {
                return Err(QuizError::EmptyField { field: "question" });
            }
            let mut updated = question.clone();
            updated.text = text.clone();
            tx.save_question(&updated).await?;
        }

        let reloaded = tx
            .find_question(patch.id)
            .await?
            .ok_or(QuizError::QuestionNotFound(patch.id))?;
        tx.commit().await?;

        tracing::info!(question_id = %reloaded.id, "updated question");
        Ok(reloaded)
    }

    /// Remove a question and its answers; returns the removed question.
    pub async fn remove_question(&self, id: Uuid) -> Result<Question> {
        let mut tx = self.store.begin().await?;
        let question = tx
            .find_question(id)
            .await?
            .ok_or(QuizError::QuestionNotFound(id))?;
        tx.remove_question(id).await?;
        tx.commit().await?;

        tracing::info!(question_id = %id, "removed question");
        Ok(question)
    }
}

/// Validate and insert a question with its answers inside an open
/// transaction. Shared by `create_question` and `create_quiz`.
pub(crate) async fn insert_question(
    tx: &mut dyn StoreTx,
    quiz_id: Uuid,
    input: &CreateQuestionInput,
) -> Result<Question> {
    validate::validate_question(&input.text, input.kind, &input.answers)?;

    let question = tx.insert_question(quiz_id, &input.text, input.kind).await?;
    for answer in &input.answers {
        tx.insert_answer(question.id, answer).await?;
    }

    Ok(tx
        .find_question(question.id)
        .await?
        .ok_or(QuizError::QuestionNotFound(question.id))?)
}
