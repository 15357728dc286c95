//! Text rendering for questions and results.

use std::io::Write;

use anyhow::Result;
use comfy_table::{Cell, Table};

use compass_core::{Question, QuizResult, Trait};

pub const TITLE: &str = "Commander's Compass";

/// How `score` and `show` print their results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn welcome(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{TITLE}")?;
    writeln!(out, "Welcome, Commander. Before we begin, a choice must be made.")?;
    writeln!(
        out,
        "Will you lead as a Hero, or contribute as a key part of the Team?"
    )?;
    Ok(())
}

pub fn question(out: &mut impl Write, index: usize, total: usize, question: &Question) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Question {} of {}", index + 1, total)?;
    writeln!(out, "{}", question.question)?;
    for (i, choice) in question.choices.iter().enumerate() {
        writeln!(out, "  {}) {}", i + 1, choice.text)?;
    }
    Ok(())
}

/// Table of percentages in trait order.
pub fn score_table(result: &QuizResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Trait", "Score"]);
    for (t, value) in result.normalized_scores.iter() {
        table.add_row(vec![Cell::new(t.label()), Cell::new(format!("{value}%"))]);
    }
    table
}

pub fn results(out: &mut impl Write, result: &QuizResult) -> Result<()> {
    let top = result.top_trait.label();
    writeln!(out)?;
    writeln!(out, "The {TITLE}")?;
    writeln!(out, "Your journey is complete, Commander. Your results are in:")?;
    writeln!(out, "Your Primary Trait: {top}")?;
    writeln!(out, "{}", score_table(result))?;
    writeln!(
        out,
        "Based on your profile, you are a natural-born {}.",
        result.modality
    )?;
    writeln!(
        out,
        "A true {top} leads the charge with conviction. Use this knowledge to your advantage."
    )?;
    Ok(())
}

/// One `trait: value%` line per trait, for plain logs.
pub fn score_summary(result: &QuizResult) -> String {
    Trait::ALL
        .iter()
        .map(|&t| format!("{}: {}%", t, result.normalized_scores[t]))
        .collect::<Vec<_>>()
        .join(", ")
}
