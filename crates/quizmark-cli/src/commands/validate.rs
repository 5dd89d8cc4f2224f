//! The `quizmark validate` command.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use quizmark_core::validate::validate_question;

use crate::quizfile;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let paths = if quiz_path.is_dir() {
        collect_toml_files(&quiz_path)?
    } else {
        vec![quiz_path]
    };

    let mut total_errors = 0;

    for path in &paths {
        let file = quizfile::load_quiz(path)?;
        println!(
            "Quiz: {} ({} questions)",
            file.quiz.name,
            file.questions.len()
        );

        if file.quiz.name.is_empty() {
            println!("  ERROR: quiz name must not be empty");
            total_errors += 1;
        }
        for question in &file.questions {
            if let Err(e) = validate_question(&question.text, question.kind, &question.answers) {
                println!("  [{}] ERROR: {e}", question.text);
                total_errors += 1;
            }
        }
    }

    if total_errors == 0 {
        println!("All quiz files valid.");
        Ok(())
    } else {
        bail!("{total_errors} invalid question(s) found");
    }
}

fn collect_toml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
