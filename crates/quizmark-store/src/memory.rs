//! The in-memory store.
//!
//! Rows are kept flat (quizzes, questions, answers) and assembled into the
//! owning object graph on read, the way a relational backend would join
//! them. Insertion order is preserved, so reads are deterministic.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use quizmark_core::input::CreateAnswerInput;
use quizmark_core::model::{Answer, Question, QuestionKind, Quiz};
use quizmark_core::store::{QuizStore, StoreError, StoreTx};

#[derive(Debug, Clone)]
struct QuizRow {
    id: Uuid,
    name: String,
}

#[derive(Debug, Clone)]
struct QuestionRow {
    id: Uuid,
    text: String,
    kind: QuestionKind,
    quiz_id: Uuid,
}

#[derive(Debug, Default, Clone)]
struct State {
    quizzes: Vec<QuizRow>,
    questions: Vec<QuestionRow>,
    answers: Vec<Answer>,
}

impl State {
    fn assemble_question(&self, row: &QuestionRow) -> Question {
        Question {
            id: row.id,
            text: row.text.clone(),
            kind: row.kind,
            answers: self
                .answers
                .iter()
                .filter(|a| a.question_id == row.id)
                .cloned()
                .collect(),
            quiz_id: row.quiz_id,
        }
    }

    fn assemble_quiz(&self, row: &QuizRow) -> Quiz {
        Quiz {
            id: row.id,
            name: row.name.clone(),
            questions: self
                .questions
                .iter()
                .filter(|q| q.quiz_id == row.id)
                .map(|q| self.assemble_question(q))
                .collect(),
        }
    }

    fn remove_question_rows(&mut self, id: Uuid) {
        self.answers.retain(|a| a.question_id != id);
        self.questions.retain(|q| q.id != id);
    }
}

/// An in-memory [`QuizStore`] with snapshot transactions.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|e| StoreError::Backend(format!("state lock poisoned: {e}")))
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError> {
        let working = self.lock()?.clone();
        Ok(Box::new(MemoryTx {
            shared: Arc::clone(&self.state),
            working,
        }))
    }
}

/// A transaction over a cloned snapshot of the store state.
struct MemoryTx {
    shared: Arc<Mutex<State>>,
    working: State,
}

#[async_trait]
impl StoreTx for MemoryTx {
    async fn insert_quiz(&mut self, name: &str) -> Result<Quiz, StoreError> {
        let row = QuizRow {
            id: Uuid::new_v4(),
            name: name.to_owned(),
        };
        let quiz = self.working.assemble_quiz(&row);
        self.working.quizzes.push(row);
        Ok(quiz)
    }

    async fn save_quiz(&mut self, quiz: &Quiz) -> Result<(), StoreError> {
        let row = self
            .working
            .quizzes
            .iter_mut()
            .find(|q| q.id == quiz.id)
            .ok_or(StoreError::NotFound {
                entity: "quiz",
                id: quiz.id,
            })?;
        row.name = quiz.name.clone();
        Ok(())
    }

    async fn find_quiz(&mut self, id: Uuid) -> Result<Option<Quiz>, StoreError> {
        Ok(self
            .working
            .quizzes
            .iter()
            .find(|q| q.id == id)
            .map(|row| self.working.assemble_quiz(row)))
    }

    async fn remove_quiz(&mut self, id: Uuid) -> Result<(), StoreError> {
        let question_ids: Vec<Uuid> = self
            .working
            .questions
            .iter()
            .filter(|q| q.quiz_id == id)
            .map(|q| q.id)
            .collect();
        for question_id in question_ids {
            self.working.remove_question_rows(question_id);
        }
        let before = self.working.quizzes.len();
        self.working.quizzes.retain(|q| q.id != id);
        if self.working.quizzes.len() == before {
            return Err(StoreError::NotFound { entity: "quiz", id });
        }
        Ok(())
    }

    async fn insert_question(
        &mut self,
        quiz_id: Uuid,
        text: &str,
        kind: QuestionKind,
    ) -> Result<Question, StoreError> {
        if !self.working.quizzes.iter().any(|q| q.id == quiz_id) {
            return Err(StoreError::NotFound {
                entity: "quiz",
                id: quiz_id,
            });
        }
        let row = QuestionRow {
            id: Uuid::new_v4(),
            text: text.to_owned(),
            kind,
            quiz_id,
        };
        let question = self.working.assemble_question(&row);
        self.working.questions.push(row);
        Ok(question)
    }

    async fn save_question(&mut self, question: &Question) -> Result<(), StoreError> {
        let row = self
            .working
            .questions
            .iter_mut()
            .find(|q| q.id == question.id)
            .ok_or(StoreError::NotFound {
                entity: "question",
                id: question.id,
            })?;
        row.text = question.text.clone();
        row.kind = question.kind;
        Ok(())
    }

    async fn find_question(&mut self, id: Uuid) -> Result<Option<Question>, StoreError> {
        Ok(self
            .working
            .questions
            .iter()
            .find(|q| q.id == id)
            .map(|row| self.working.assemble_question(row)))
    }

    async fn remove_question(&mut self, id: Uuid) -> Result<(), StoreError> {
        if !self.working.questions.iter().any(|q| q.id == id) {
            return Err(StoreError::NotFound {
                entity: "question",
                id,
            });
        }
        self.working.remove_question_rows(id);
        Ok(())
    }

    async fn insert_answer(
        &mut self,
        question_id: Uuid,
        answer: &CreateAnswerInput,
    ) -> Result<Answer, StoreError> {
        if !self.working.questions.iter().any(|q| q.id == question_id) {
            return Err(StoreError::NotFound {
                entity: "question",
                id: question_id,
            });
        }
        let record = Answer {
            id: Uuid::new_v4(),
            text: answer.text.clone(),
            correct: answer.correct,
            position: answer.position,
            question_id,
        };
        self.working.answers.push(record.clone());
        Ok(record)
    }

    async fn save_answer(&mut self, answer: &Answer) -> Result<(), StoreError> {
        let record = self
            .working
            .answers
            .iter_mut()
            .find(|a| a.id == answer.id)
            .ok_or(StoreError::NotFound {
                entity: "answer",
                id: answer.id,
            })?;
        *record = answer.clone();
        Ok(())
    }

    async fn remove_answer(&mut self, id: Uuid) -> Result<(), StoreError> {
        let before = self.working.answers.len();
        self.working.answers.retain(|a| a.id != id);
        if self.working.answers.len() == before {
            return Err(StoreError::NotFound {
                entity: "answer",
                id,
            });
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let mut guard = self
            .shared
            .lock()
            .map_err(|e| StoreError::Backend(format!("state lock poisoned: {e}")))?;
        *guard = self.working;
        tracing::trace!("transaction committed");
        Ok(())
    }
}
