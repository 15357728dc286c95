//! Error types for quiz sessions and quiz-definition loading.
//!
//! Both are local to a single session and never retried. `DataLoadError` is
//! defined here so the loader crate and the file parser share one taxonomy.

use thiserror::Error;

use crate::engine::QuizState;
use crate::model::Trait;

/// Errors raised by the quiz engine and scoring calculator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// `answer` was called with a choice index outside the current question.
    #[error("choice index {index} out of range (question has {len} choices)")]
    OutOfRange { index: usize, len: usize },

    /// An operation was called in a state that does not allow it.
    #[error("cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: QuizState,
    },

    /// A max-score table entry was zero, which would divide by zero.
    #[error("max score for {0} must be positive")]
    ZeroMaxScore(Trait),
}

/// Errors that can occur while loading a quiz definition.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// Reading a local quiz file failed.
    #[error("failed to read quiz file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The server answered with a non-success status.
    #[error("quiz fetch from {url} failed (HTTP {status})")]
    Http { url: String, status: u16 },

    /// The request could not be completed.
    #[error("network error: {0}")]
    Network(String),

    /// The payload was not a valid quiz document.
    #[error("failed to parse quiz: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but cannot be played.
    #[error("invalid quiz: question {question}: {reason}")]
    Invalid { question: usize, reason: String },
}
