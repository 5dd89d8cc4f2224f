//! TOML quiz and answers file formats.
//!
//! The file formats belong to the CLI; the core stays format-agnostic.
//! A quiz file carries a `[quiz]` header and `[[questions]]` entries that
//! deserialize straight into the core's create inputs. An answers file
//! references questions and answers by text, resolved to ids after the
//! quiz is created.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use quizmark_core::input::{CreateQuestionInput, CreateQuizInput};

/// A parsed quiz definition file.
#[derive(Debug, Deserialize)]
pub struct QuizFile {
    pub quiz: QuizHeader,
    #[serde(default)]
    pub questions: Vec<CreateQuestionInput>,
}

#[derive(Debug, Deserialize)]
pub struct QuizHeader {
    pub name: String,
}

impl QuizFile {
    pub fn into_input(self) -> CreateQuizInput {
        CreateQuizInput {
            name: self.quiz.name,
            questions: self.questions,
        }
    }
}

/// A parsed answers file.
#[derive(Debug, Deserialize)]
pub struct AnswersFile {
    #[serde(default)]
    pub answers: Vec<GivenEntry>,
}

/// One submitted answer, referencing the question by its text.
///
/// `given` holds answer texts for choice and sorting questions (in the
/// submitted order), or the single free-text response for plain-text
/// questions.
#[derive(Debug, Deserialize)]
pub struct GivenEntry {
    pub question: String,
    #[serde(default)]
    pub given: Vec<String>,
}

/// Parse a quiz definition from a TOML file.
pub fn load_quiz(path: &Path) -> Result<QuizFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse TOML: {}", path.display()))
}

/// Parse an answers file from TOML.
pub fn load_answers(path: &Path) -> Result<AnswersFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse TOML: {}", path.display()))
}
