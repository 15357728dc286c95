//! Quiz progression state machine.
//!
//! The engine owns the quiz and one session's state. A presenter drives it
//! with [`QuizEngine::start`], [`QuizEngine::answer`] and
//! [`QuizEngine::go_back`], then asks for results once it reports completion.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{Modality, Question, Quiz, ScoreVector};
use crate::scoring::{compute_results, MaxScores, QuizResult};

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// No session running; waiting for a modality.
    Welcome,
    /// Showing the question at `index`.
    InProgress { index: usize },
    /// Every question answered.
    Completed,
}

impl fmt::Display for QuizState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizState::Welcome => write!(f, "at the welcome step"),
            QuizState::InProgress { index } => write!(f, "on question {}", index + 1),
            QuizState::Completed => write!(f, "completed"),
        }
    }
}

/// What `go_back` does to the score added by the answer being revisited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackNavigation {
    /// Keep the score; re-answering counts the question twice.
    #[default]
    Retain,
    /// Subtract the weights of the choice recorded for that question.
    Rewind,
}

impl fmt::Display for BackNavigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackNavigation::Retain => write!(f, "retain"),
            BackNavigation::Rewind => write!(f, "rewind"),
        }
    }
}

impl std::str::FromStr for BackNavigation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "retain" => Ok(BackNavigation::Retain),
            "rewind" => Ok(BackNavigation::Rewind),
            other => Err(format!(
                "unknown back navigation policy: {other} (expected retain or rewind)"
            )),
        }
    }
}

/// Configuration for the quiz engine.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub back_navigation: BackNavigation,
    pub max_scores: MaxScores,
}

/// The quiz engine.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    quiz: Quiz,
    config: EngineConfig,
    state: QuizState,
    modality: Option<Modality>,
    scores: ScoreVector,
    // Choice picked for each question before the current one.
    answers: Vec<usize>,
}

impl QuizEngine {
    pub fn new(quiz: Quiz) -> Self {
        Self::with_config(quiz, EngineConfig::default())
    }

    pub fn with_config(quiz: Quiz, config: EngineConfig) -> Self {
        Self {
            quiz,
            config,
            state: QuizState::Welcome,
            modality: None,
            scores: ScoreVector::zero(),
            answers: Vec::new(),
        }
    }

    /// Begin a fresh session with the given modality.
    ///
    /// Allowed from any state. An empty quiz completes immediately.
    pub fn start(&mut self, modality: Modality) -> QuizState {
        self.modality = Some(modality);
        self.scores = ScoreVector::zero();
        self.answers.clear();
        self.state = if self.quiz.is_empty() {
            QuizState::Completed
        } else {
            QuizState::InProgress { index: 0 }
        };
        tracing::debug!(%modality, questions = self.quiz.len(), "quiz started");
        self.state
    }

    /// Pick `choice_index` for the current question and advance.
    ///
    /// On error the session is left untouched.
    pub fn answer(&mut self, choice_index: usize) -> Result<QuizState, QuizError> {
        let index = self.in_progress_index("answer")?;
        let question = self.question_at(index)?;
        let delta = question
            .choices
            .get(choice_index)
            .map(|choice| choice.scores)
            .ok_or(QuizError::OutOfRange {
                index: choice_index,
                len: question.choices.len(),
            })?;

        self.scores.add(&delta);
        self.answers.push(choice_index);

        let next = index + 1;
        self.state = if next == self.quiz.len() {
            QuizState::Completed
        } else {
            QuizState::InProgress { index: next }
        };
        tracing::trace!(question = index, choice = choice_index, state = %self.state, "answered");
        Ok(self.state)
    }

    /// Return to the previous question.
    ///
    /// A no-op outside `InProgress` or on the first question; returns whether
    /// the index moved.
    pub fn go_back(&mut self) -> bool {
        let index = match self.state {
            QuizState::InProgress { index } if index > 0 => index,
            _ => return false,
        };
        let previous = index - 1;
        let picked = self.answers.pop();

        if self.config.back_navigation == BackNavigation::Rewind {
            if let Some(choice) = picked
                .and_then(|c| self.quiz.get(previous).and_then(|q| q.choices.get(c)))
            {
                self.scores.sub(&choice.scores);
            }
        }

        self.state = QuizState::InProgress { index: previous };
        tracing::trace!(question = previous, policy = %self.config.back_navigation, "went back");
        true
    }

    /// The question being shown.
    pub fn current_question(&self) -> Result<&Question, QuizError> {
        let index = self.in_progress_index("read the current question")?;
        self.question_at(index)
    }

    pub fn is_complete(&self) -> bool {
        self.state == QuizState::Completed
    }

    /// Discard the session and go back to the welcome step.
    pub fn reset(&mut self) {
        self.state = QuizState::Welcome;
        self.modality = None;
        self.scores = ScoreVector::zero();
        self.answers.clear();
        tracing::debug!("quiz reset");
    }

    /// Results for a completed session.
    pub fn compute_results(&self) -> Result<QuizResult, QuizError> {
        match (self.state, self.modality) {
            (QuizState::Completed, Some(modality)) => Ok(compute_results(
                &self.scores,
                modality,
                &self.config.max_scores,
            )),
            (state, _) => Err(QuizError::InvalidState {
                operation: "compute results",
                state,
            }),
        }
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn modality(&self) -> Option<Modality> {
        self.modality
    }

    /// Raw accumulated scores.
    pub fn scores(&self) -> &ScoreVector {
        &self.scores
    }

    /// Choice indices picked for the questions before the current one.
    pub fn answers(&self) -> &[usize] {
        &self.answers
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// `(answered, total)` for the running session.
    pub fn progress(&self) -> (usize, usize) {
        let answered = match self.state {
            QuizState::Welcome => 0,
            QuizState::InProgress { index } => index,
            QuizState::Completed => self.quiz.len(),
        };
        (answered, self.quiz.len())
    }

    fn in_progress_index(&self, operation: &'static str) -> Result<usize, QuizError> {
        match self.state {
            QuizState::InProgress { index } => Ok(index),
            state => Err(QuizError::InvalidState { operation, state }),
        }
    }

    fn question_at(&self, index: usize) -> Result<&Question, QuizError> {
        self.quiz.get(index).ok_or(QuizError::InvalidState {
            operation: "read a question",
            state: self.state,
        })
    }
}
