//! The `compass show` command.

use std::path::PathBuf;

use anyhow::Result;

use compass_core::report::SessionReport;

use crate::render::{self, OutputFormat};

pub fn execute(report_path: PathBuf, format: OutputFormat) -> Result<()> {
    let report = SessionReport::load_json(&report_path)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            println!(
                "Session {} ({}), {} of {} questions answered as {}",
                report.id,
                report.created_at.format("%Y-%m-%d %H:%M UTC"),
                report.answers.len(),
                report.question_count,
                report.modality
            );
            render::results(&mut std::io::stdout().lock(), &report.result)?;
        }
    }

    Ok(())
}
