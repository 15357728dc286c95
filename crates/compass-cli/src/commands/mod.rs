pub mod init;
pub mod score;
pub mod show;
pub mod take;
pub mod validate;

use anyhow::{Context, Result};

use compass_core::Quiz;
use compass_loader::{load_quiz, QuizSource};

const LOAD_FAILURE: &str = "An error occurred. Please try again later.";

/// Fetch the quiz once; any failure ends the command.
pub(crate) async fn fetch_quiz(source: &QuizSource) -> Result<Quiz> {
    load_quiz(source)
        .await
        .with_context(|| format!("{LOAD_FAILURE} (could not load quiz from {source})"))
}
