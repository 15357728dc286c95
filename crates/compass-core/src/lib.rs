//! compass-core — Quiz engine, trait scoring, and data model.
//!
//! This crate holds the personality-quiz state machine, the scoring
//! calculator, and the quiz-definition types every presenter builds on.

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod scoring;

pub use engine::{BackNavigation, EngineConfig, QuizEngine, QuizState};
pub use error::{DataLoadError, QuizError};
pub use model::{Choice, Modality, Question, Quiz, ScoreVector, Trait};
pub use scoring::{compute_results, MaxScores, QuizResult};
