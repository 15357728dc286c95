//! The `compass validate` command.

use std::path::PathBuf;

use anyhow::Result;

use compass_core::parser::validate_quiz;
use compass_core::MaxScores;

use super::fetch_quiz;
use crate::config::load_config_from;

pub async fn execute(quiz: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let source = config.quiz_source(quiz.as_deref())?;
    let quiz = fetch_quiz(&source).await?;

    println!("Quiz: {} ({} questions)", source, quiz.len());

    let warnings = validate_quiz(&quiz, &MaxScores::DEFAULT);
    for w in &warnings {
        let prefix = w
            .question
            .map(|q| format!("  [question {q}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Quiz is valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
