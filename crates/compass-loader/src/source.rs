//! Quiz sources and the one-shot loader.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::instrument;

use compass_core::parser::parse_quiz_str;
use compass_core::{DataLoadError, Quiz};

const FETCH_TIMEOUT_SECS: u64 = 30;

/// Where a quiz definition comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizSource {
    File(PathBuf),
    Url(String),
}

impl fmt::Display for QuizSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizSource::File(path) => write!(f, "{}", path.display()),
            QuizSource::Url(url) => write!(f, "{url}"),
        }
    }
}

impl FromStr for QuizSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("quiz source is empty".into());
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(QuizSource::Url(s.to_string()))
        } else {
            Ok(QuizSource::File(PathBuf::from(s)))
        }
    }
}

/// Load and parse the quiz from `source`.
#[instrument(skip(source), fields(source = %source))]
pub async fn load_quiz(source: &QuizSource) -> Result<Quiz, DataLoadError> {
    let content = match source {
        QuizSource::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| DataLoadError::Io {
                    path: path.display().to_string(),
                    source: e,
                })?
        }
        QuizSource::Url(url) => fetch(url).await?,
    };

    let quiz = parse_quiz_str(&content)?;
    tracing::info!(questions = quiz.len(), "quiz loaded");
    Ok(quiz)
}

async fn fetch(url: &str) -> Result<String, DataLoadError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .map_err(|e| DataLoadError::Network(e.to_string()))?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            DataLoadError::Network(format!("timed out after {FETCH_TIMEOUT_SECS}s"))
        } else {
            DataLoadError::Network(e.to_string())
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%status, "quiz fetch rejected");
        return Err(DataLoadError::Http {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| DataLoadError::Network(e.to_string()))
}
