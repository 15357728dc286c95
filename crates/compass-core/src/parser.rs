//! JSON quiz-definition parser.
//!
//! Parses quiz documents, rejects ones that cannot be played, and reports
//! softer authoring problems as warnings.

use std::collections::HashSet;
use std::path::Path;

use crate::error::DataLoadError;
use crate::model::{Quiz, ScoreVector, Trait};
use crate::scoring::MaxScores;

/// Parse a single JSON file into a `Quiz`.
pub fn parse_quiz_file(path: &Path) -> Result<Quiz, DataLoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_quiz_str(&content)
}

/// Parse a JSON string into a `Quiz`.
///
/// Questions without choices are rejected.
pub fn parse_quiz_str(content: &str) -> Result<Quiz, DataLoadError> {
    let quiz: Quiz = serde_json::from_str(content)?;

    if let Some(position) = quiz.questions().iter().position(|q| q.choices.is_empty()) {
        return Err(DataLoadError::Invalid {
            question: position + 1,
            reason: "question has no choices".into(),
        });
    }

    tracing::debug!(questions = quiz.len(), "parsed quiz");
    Ok(quiz)
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based question number (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn at(question: usize, message: impl Into<String>) -> Self {
        Self {
            question: Some(question + 1),
            message: message.into(),
        }
    }
}

/// Validate a quiz for common authoring issues.
pub fn validate_quiz(quiz: &Quiz, max: &MaxScores) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if quiz.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "quiz has no questions; sessions complete immediately".into(),
        });
    }

    for (i, question) in quiz.questions().iter().enumerate() {
        if question.question.trim().is_empty() {
            warnings.push(ValidationWarning::at(i, "question text is empty"));
        }

        let mut seen = HashSet::new();
        for (c, choice) in question.choices.iter().enumerate() {
            if choice.text.trim().is_empty() {
                warnings.push(ValidationWarning::at(i, format!("choice {} has no text", c + 1)));
            }
            if !seen.insert(choice.text.trim()) {
                warnings.push(ValidationWarning::at(
                    i,
                    format!("duplicate choice text: {}", choice.text.trim()),
                ));
            }
            if choice.scores.is_zero() {
                warnings.push(ValidationWarning::at(
                    i,
                    format!("choice {} carries no trait weights", c + 1),
                ));
            }
        }
    }

    let reachable = reachable_maximum(quiz);
    for t in Trait::ALL {
        if reachable[t] > max.get(t) {
            warnings.push(ValidationWarning {
                question: None,
                message: format!(
                    "{t} can reach {} but its max score is {}; results may exceed 100%",
                    reachable[t],
                    max.get(t)
                ),
            });
        }
    }

    warnings
}

/// Highest raw score per trait a single forward pass can produce.
pub fn reachable_maximum(quiz: &Quiz) -> ScoreVector {
    let mut total = ScoreVector::zero();
    for question in quiz.questions() {
        for t in Trait::ALL {
            let best = question
                .choices
                .iter()
                .map(|c| c.scores[t])
                .max()
                .unwrap_or(0);
            total[t] = total[t].saturating_add(best);
        }
    }
    total
}
