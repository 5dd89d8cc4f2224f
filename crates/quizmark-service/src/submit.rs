//! The submission aggregator: grades a caller's answers against a quiz.

use std::collections::HashSet;

use uuid::Uuid;

use quizmark_core::error::{QuizError, Result};
use quizmark_core::grading;
use quizmark_core::input::{SubmittedAnswer, Submission};
use quizmark_core::model::QuestionKind;
use quizmark_core::results::{percentage, QuizResult};

use crate::QuizService;

impl QuizService {
    /// Grade a set of submitted answers against a quiz.
    ///
    /// Processing is all-or-nothing: any failure (unknown question, an
    /// answer id from another question, a question from another quiz)
    /// aborts the whole submission and nothing is reported.
    ///
    /// The returned result carries one entry per quiz question. Questions
    /// the caller skipped appear with `answered = false` and their
    /// correct-answer projection populated; the score counts them as
    /// incorrect.
    pub async fn submit_answers(
        &self,
        quiz_id: Uuid,
        answers: &[SubmittedAnswer],
    ) -> Result<QuizResult> {
        let mut tx = self.store.begin().await?;
        let quiz = tx
            .find_quiz(quiz_id)
            .await?
            .ok_or(QuizError::QuizNotFound(quiz_id))?;

        let mut results = Vec::with_capacity(quiz.questions.len());
        let mut answered: HashSet<Uuid> = HashSet::new();
        let mut correct_count = 0usize;

        for submitted in answers {
            let question = tx
                .find_question(submitted.question_id)
                .await?
                .ok_or(QuizError::QuestionNotFound(submitted.question_id))?;
            if question.quiz_id != quiz.id {
                return Err(QuizError::QuestionNotInQuiz {
                    question_id: question.id,
                    quiz_id: quiz.id,
                });
            }

            let submission =
                Submission::from_raw(question.kind, question.id, &submitted.answers)?;

            // Ids coming from the client are checked for membership before
            // grading; the engine itself also refuses unresolvable ids.
            if question.kind != QuestionKind::PlainText {
                for id in submission.ids() {
                    if !question.owns_answer(*id) {
                        return Err(QuizError::UnknownAnswer {
                            answer_id: id.to_string(),
                            question_id: question.id,
                        });
                    }
                }
            }

            let graded = grading::grade(&question, &submission)?;
            if graded.correct {
                correct_count += 1;
            }
            answered.insert(question.id);
            results.push(graded);
        }

        let score = percentage(correct_count, quiz.questions.len());

        for question in &quiz.questions {
            if !answered.contains(&question.id) {
                results.push(grading::unanswered_result(question));
            }
        }

        tx.commit().await?;

        tracing::debug!(%quiz_id, score, "graded submission");
        Ok(QuizResult {
            quiz_id: quiz.id,
            score,
            graded_at: chrono::Utc::now(),
            questions: results,
        })
    }
}
