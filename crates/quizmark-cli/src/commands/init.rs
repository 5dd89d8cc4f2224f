//! The `quizmark init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quiz.toml").exists() {
        println!("quiz.toml already exists, skipping.");
    } else {
        std::fs::write("quiz.toml", SAMPLE_QUIZ)?;
        println!("Created quiz.toml");
    }

    if std::path::Path::new("answers.toml").exists() {
        println!("answers.toml already exists, skipping.");
    } else {
        std::fs::write("answers.toml", SAMPLE_ANSWERS)?;
        println!("Created answers.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit quiz.toml with your own questions");
    println!("  2. Run: quizmark validate --quiz quiz.toml");
    println!("  3. Run: quizmark grade --quiz quiz.toml --answers answers.toml");

    Ok(())
}

const SAMPLE_QUIZ: &str = r#"# A starter quiz showing all four question kinds.

[quiz]
name = "Starter Quiz"

[[questions]]
text = "What is the capital of France?"
kind = "single-answer"

[[questions.answers]]
text = "Paris"
correct = true

[[questions.answers]]
text = "London"
correct = false

[[questions.answers]]
text = "Madrid"
correct = false

[[questions]]
text = "Which of these are European capitals?"
kind = "multiple-answer"

[[questions.answers]]
text = "Paris"
correct = true

[[questions.answers]]
text = "London"
correct = true

[[questions.answers]]
text = "Tokyo"
correct = false

[[questions]]
text = "Order these years, earliest first"
kind = "sorting"

[[questions.answers]]
text = "990"
position = 1

[[questions.answers]]
text = "1290"
position = 2

[[questions.answers]]
text = "1900"
position = 3

[[questions]]
text = "What is the capital of El Salvador?"
kind = "plain-text"

[[questions.answers]]
text = "San Salvador"
"#;

const SAMPLE_ANSWERS: &str = r#"# Answers reference questions by text; choice and sorting answers by
# their text, plain-text answers verbatim.

[[answers]]
question = "What is the capital of France?"
given = ["Paris"]

[[answers]]
question = "Which of these are European capitals?"
given = ["Paris", "London"]

[[answers]]
question = "Order these years, earliest first"
given = ["990", "1290", "1900"]

[[answers]]
question = "What is the capital of El Salvador?"
given = ["san salvador"]
"#;
