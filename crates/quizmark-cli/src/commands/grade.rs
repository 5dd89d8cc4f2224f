//! The `quizmark grade` command.
//!
//! Creates the quiz in an in-memory store, resolves the answers file's
//! text references to the generated ids, submits, and renders the result.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use quizmark_core::input::SubmittedAnswer;
use quizmark_core::model::{QuestionKind, Quiz};
use quizmark_core::results::QuizResult;
use quizmark_service::QuizService;
use quizmark_store::MemoryStore;

use crate::quizfile::{self, AnswersFile};

pub async fn execute(quiz_path: PathBuf, answers_path: PathBuf, format: String) -> Result<()> {
    let quiz_file = quizfile::load_quiz(&quiz_path)?;
    let answers_file = quizfile::load_answers(&answers_path)?;

    let service = QuizService::new(Arc::new(MemoryStore::new()));
    let quiz = service.create_quiz(quiz_file.into_input()).await?;
    let submitted = resolve_answers(&quiz, &answers_file)?;
    let result = service.submit_answers(quiz.id, &submitted).await?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        "table" => print_result(&quiz.name, &result),
        other => anyhow::bail!("unknown format: {other}"),
    }

    Ok(())
}

/// Map the answers file's question/answer texts onto the created quiz's ids.
fn resolve_answers(quiz: &Quiz, answers: &AnswersFile) -> Result<Vec<SubmittedAnswer>> {
    let mut submitted = Vec::with_capacity(answers.answers.len());

    for entry in &answers.answers {
        let question = quiz
            .questions
            .iter()
            .find(|q| q.text == entry.question)
            .with_context(|| format!("no question '{}' in quiz '{}'", entry.question, quiz.name))?;

        let resolved = if question.kind == QuestionKind::PlainText {
            entry.given.clone()
        } else {
            entry
                .given
                .iter()
                .map(|text| {
                    question
                        .answers
                        .iter()
                        .find(|a| &a.text == text)
                        .map(|a| a.id.to_string())
                        .with_context(|| {
                            format!("no answer '{text}' for question '{}'", entry.question)
                        })
                })
                .collect::<Result<Vec<_>>>()?
        };

        submitted.push(SubmittedAnswer {
            question_id: question.id,
            answers: resolved,
        });
    }

    Ok(submitted)
}

fn print_result(quiz_name: &str, result: &QuizResult) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Question", "Answered", "Correct", "Given", "Expected"]);

    for question in &result.questions {
        let join = |labels: &[quizmark_core::results::AnswerLabel]| {
            labels
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(vec![
            Cell::new(&question.question_text),
            Cell::new(if question.answered { "yes" } else { "no" }),
            Cell::new(if question.correct { "yes" } else { "no" }),
            Cell::new(join(&question.given_answers)),
            Cell::new(join(&question.correct_answers)),
        ]);
    }

    println!("Quiz: {quiz_name}");
    println!("{table}");
    println!("Score: {:.2}%", result.score);
}
