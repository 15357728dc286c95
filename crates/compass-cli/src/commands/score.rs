//! The `compass score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use compass_core::report::SessionReport;
use compass_core::{EngineConfig, Modality, QuizEngine};

use super::fetch_quiz;
use crate::config::load_config_from;
use crate::render::{self, OutputFormat};

/// One step of a scripted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// 0-based choice index.
    Answer(usize),
    Back,
}

fn parse_script(answers: &str) -> Result<Vec<Step>> {
    answers
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s {
            "b" | "back" => Ok(Step::Back),
            n => n
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .map(Step::Answer)
                .ok_or_else(|| anyhow::anyhow!("invalid answer: '{s}' (expected a choice number or b)")),
        })
        .collect()
}

/// Replay `steps` on a started engine.
fn replay(engine: &mut QuizEngine, steps: &[Step]) -> Result<()> {
    for (i, step) in steps.iter().enumerate() {
        match *step {
            Step::Answer(choice) => {
                anyhow::ensure!(
                    !engine.is_complete(),
                    "answer {} given after the last question",
                    i + 1
                );
                engine
                    .answer(choice)
                    .with_context(|| format!("answer {} (choice {})", i + 1, choice + 1))?;
            }
            Step::Back => {
                if !engine.go_back() {
                    tracing::warn!(step = i + 1, "back ignored");
                }
            }
        }
    }
    let (answered, total) = engine.progress();
    anyhow::ensure!(
        engine.is_complete(),
        "only {answered} of {total} questions answered"
    );
    Ok(())
}

pub async fn execute(
    quiz: Option<String>,
    modality: String,
    answers: String,
    back_navigation: Option<String>,
    format: OutputFormat,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let source = config.quiz_source(quiz.as_deref())?;
    let back_navigation = config.back_navigation(back_navigation.as_deref())?;
    let modality: Modality = modality
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;
    let steps = parse_script(&answers)?;

    let quiz = fetch_quiz(&source).await?;
    let mut engine = QuizEngine::with_config(
        quiz,
        EngineConfig {
            back_navigation,
            ..Default::default()
        },
    );
    engine.start(modality);
    replay(&mut engine, &steps)?;

    let report = SessionReport::from_engine(&engine)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report.result)?);
        }
        OutputFormat::Text => {
            render::results(&mut std::io::stdout().lock(), &report.result)?;
        }
    }

    if let Some(dir) = output.or(config.output_dir) {
        let path = report.save_in(&dir)?;
        eprintln!("Session saved to {}", path.display());
    }

    Ok(())
}
