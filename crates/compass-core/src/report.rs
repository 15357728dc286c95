//! Session reports with JSON persistence.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::QuizEngine;
use crate::model::{Modality, ScoreVector};
use crate::scoring::QuizResult;

/// A record of one completed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the session completed.
    pub created_at: DateTime<Utc>,
    pub modality: Modality,
    /// Number of questions in the quiz.
    pub question_count: usize,
    /// Choice index picked for each question.
    pub answers: Vec<usize>,
    /// Scores before normalization.
    pub raw_scores: ScoreVector,
    pub result: QuizResult,
}

impl SessionReport {
    /// Build a report from a completed engine.
    pub fn from_engine(engine: &QuizEngine) -> Result<Self> {
        let result = engine.compute_results()?;
        Ok(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            modality: result.modality,
            question_count: engine.quiz().len(),
            answers: engine.answers().to_vec(),
            raw_scores: *engine.scores(),
            result,
        })
    }

    /// File name used when saving into a directory.
    pub fn file_name(&self) -> String {
        format!("session-{}.json", self.id)
    }

    /// Save into `dir` under [`SessionReport::file_name`], returning the path.
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        self.save_json(&path)?;
        Ok(path)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
