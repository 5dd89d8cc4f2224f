//! quizmark CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod quizfile;

#[derive(Parser)]
#[command(name = "quizmark", version, about = "Quiz validation and grading engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate quiz TOML files
    Validate {
        /// Path to a quiz .toml file or a directory of them
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Grade an answers file against a quiz file
    Grade {
        /// Path to the quiz .toml file
        #[arg(long)]
        quiz: PathBuf,

        /// Path to the answers .toml file
        #[arg(long)]
        answers: PathBuf,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Create starter quiz and answers files
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizmark=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Grade {
            quiz,
            answers,
            format,
        } => commands::grade::execute(quiz, answers, format).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
