//! The `compass take` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use compass_core::report::SessionReport;
use compass_core::{EngineConfig, Modality, QuizEngine};

use super::fetch_quiz;
use crate::config::load_config_from;
use crate::render;

pub async fn execute(
    quiz: Option<String>,
    modality: Option<String>,
    back_navigation: Option<String>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let source = config.quiz_source(quiz.as_deref())?;
    let back_navigation = config.back_navigation(back_navigation.as_deref())?;
    let modality = match modality {
        Some(m) => Some(m.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?),
        None => config.default_modality,
    };
    let save_dir = output.or(config.output_dir);

    let quiz = fetch_quiz(&source).await?;
    let engine = QuizEngine::with_config(
        quiz,
        EngineConfig {
            back_navigation,
            ..Default::default()
        },
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut presenter = Presenter::new(engine, stdin.lock(), stdout.lock())
        .with_modality(modality)
        .with_save_dir(save_dir);
    let reports = presenter.run()?;

    tracing::debug!(sessions = reports.len(), "presenter finished");
    Ok(())
}

/// Drives a [`QuizEngine`] from line-based input.
pub struct Presenter<R, W> {
    engine: QuizEngine,
    input: R,
    output: W,
    modality: Option<Modality>,
    save_dir: Option<PathBuf>,
}

impl<R: BufRead, W: Write> Presenter<R, W> {
    pub fn new(engine: QuizEngine, input: R, output: W) -> Self {
        Self {
            engine,
            input,
            output,
            modality: None,
            save_dir: None,
        }
    }

    /// Skip the welcome prompt and always use `modality`.
    pub fn with_modality(mut self, modality: Option<Modality>) -> Self {
        self.modality = modality;
        self
    }

    pub fn with_save_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.save_dir = dir;
        self
    }

    /// Run sessions until the user quits or input ends.
    ///
    /// Returns a report for every completed session.
    pub fn run(&mut self) -> Result<Vec<SessionReport>> {
        let mut reports = Vec::new();

        loop {
            let Some(modality) = self.welcome()? else {
                break;
            };
            self.engine.start(modality);

            if !self.play()? {
                writeln!(self.output, "Quiz abandoned.")?;
                break;
            }

            let report = SessionReport::from_engine(&self.engine)?;
            render::results(&mut self.output, &report.result)?;
            tracing::info!(
                top_trait = %report.result.top_trait,
                scores = %render::score_summary(&report.result),
                "session complete"
            );
            if let Some(dir) = &self.save_dir {
                let path = report.save_in(dir)?;
                writeln!(self.output, "Session saved to {}", path.display())?;
            }
            reports.push(report);

            writeln!(self.output)?;
            write!(self.output, "Start over? [y/N] ")?;
            self.output.flush()?;
            match read_line(&mut self.input)? {
                Some(line) if matches!(line.as_str(), "y" | "yes") => self.engine.reset(),
                _ => break,
            }
        }

        Ok(reports)
    }

    fn welcome(&mut self) -> Result<Option<Modality>> {
        render::welcome(&mut self.output)?;
        if let Some(modality) = self.modality {
            writeln!(self.output, "You have chosen: {modality}.")?;
            return Ok(Some(modality));
        }

        loop {
            write!(self.output, "[hero/team, q to quit] ")?;
            self.output.flush()?;
            let Some(line) = read_line(&mut self.input)? else {
                return Ok(None);
            };
            match line.as_str() {
                "q" | "quit" => return Ok(None),
                "h" => return Ok(Some(Modality::Hero)),
                "t" => return Ok(Some(Modality::Team)),
                other => match other.parse::<Modality>() {
                    Ok(modality) => return Ok(Some(modality)),
                    Err(_) => writeln!(self.output, "Please answer hero or team.")?,
                },
            }
        }
    }

    // Returns false if the user quit before finishing.
    fn play(&mut self) -> Result<bool> {
        while !self.engine.is_complete() {
            let (index, total) = self.engine.progress();
            let question = self.engine.current_question()?;
            let choices = question.choices.len();
            render::question(&mut self.output, index, total, question)?;

            let hint = if index > 0 {
                format!("[1-{choices}, b to go back, q to quit] ")
            } else {
                format!("[1-{choices}, q to quit] ")
            };

            loop {
                write!(self.output, "{hint}")?;
                self.output.flush()?;
                let Some(line) = read_line(&mut self.input)? else {
                    return Ok(false);
                };
                match line.as_str() {
                    "q" | "quit" => return Ok(false),
                    "b" | "back" => {
                        if self.engine.go_back() {
                            break;
                        }
                        writeln!(self.output, "Already at the first question.")?;
                    }
                    other => match other.parse::<usize>() {
                        Ok(n) if (1..=choices).contains(&n) => {
                            self.engine.answer(n - 1)?;
                            break;
                        }
                        _ => writeln!(self.output, "Please pick a number between 1 and {choices}.")?,
                    },
                }
            }
        }
        Ok(true)
    }
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_core::{BackNavigation, Choice, Question, Quiz, ScoreVector, Trait};

    fn quiz() -> Quiz {
        Quiz::new(vec![
            Question::new(
                "First?",
                vec![
                    Choice::new("Bold", ScoreVector::from_pairs([(Trait::Extraversion, 20)])),
                    Choice::new("Careful", ScoreVector::from_pairs([(Trait::Conscientiousness, 9)])),
                ],
            ),
            Question::new(
                "Second?",
                vec![Choice::new("Kind", ScoreVector::from_pairs([(Trait::Agreeableness, 9)]))],
            ),
        ])
    }

    fn run(engine: QuizEngine, script: &str) -> (Vec<SessionReport>, String) {
        let mut out = Vec::new();
        let reports = Presenter::new(engine, script.as_bytes(), &mut out)
            .run()
            .unwrap();
        (reports, String::from_utf8(out).unwrap())
    }

    #[test]
    fn completes_a_session() {
        let (reports, out) = run(QuizEngine::new(quiz()), "hero\n1\n1\nn\n");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].answers, vec![0, 0]);
        assert_eq!(reports[0].result.top_trait, Trait::Extraversion);
        assert!(out.contains("Question 1 of 2"));
        assert!(out.contains("Question 2 of 2"));
        assert!(out.contains("Your Primary Trait: Extraversion"));
    }

    #[test]
    fn bad_input_reprompts() {
        let (reports, out) = run(QuizEngine::new(quiz()), "pirate\nt\n7\nzero\nb\n2\n1\n");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].modality, Modality::Team);
        assert!(out.contains("Please answer hero or team."));
        assert!(out.contains("Please pick a number between 1 and 2."));
        assert!(out.contains("Already at the first question."));
    }

    #[test]
    fn back_double_counts_under_retain() {
        let (reports, _) = run(QuizEngine::new(quiz()), "hero\n2\nb\n2\n1\n");
        assert_eq!(reports[0].raw_scores[Trait::Conscientiousness], 18);
    }

    #[test]
    fn back_rewinds_when_configured() {
        let engine = QuizEngine::with_config(
            quiz(),
            EngineConfig {
                back_navigation: BackNavigation::Rewind,
                ..Default::default()
            },
        );
        let (reports, _) = run(engine, "hero\n2\nb\n1\n1\n");
        assert_eq!(reports[0].raw_scores[Trait::Conscientiousness], 0);
        assert_eq!(reports[0].raw_scores[Trait::Extraversion], 20);
    }

    #[test]
    fn quit_and_eof_end_without_report() {
        let (reports, out) = run(QuizEngine::new(quiz()), "team\n1\nq\n");
        assert!(reports.is_empty());
        assert!(out.contains("Quiz abandoned."));

        let (reports, _) = run(QuizEngine::new(quiz()), "");
        assert!(reports.is_empty());
    }

    #[test]
    fn start_over_runs_a_second_session() {
        let engine = QuizEngine::new(quiz());
        let mut out = Vec::new();
        let reports = Presenter::new(engine, "1\n1\ny\n2\n1\nn\n".as_bytes(), &mut out)
            .with_modality(Some(Modality::Hero))
            .run()
            .unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].answers, vec![1, 0]);
    }

    #[test]
    fn empty_quiz_goes_straight_to_results() {
        let (reports, out) = run(QuizEngine::new(Quiz::default()), "team\n");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].result.top_trait, Trait::Agreeableness);
        assert!(!out.contains("Question 1"));
    }

    #[test]
    fn saves_reports_when_asked() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let reports = Presenter::new(QuizEngine::new(quiz()), "hero\n1\n1\n".as_bytes(), &mut out)
            .with_save_dir(Some(dir.path().to_path_buf()))
            .run()
            .unwrap();
        let saved = dir.path().join(reports[0].file_name());
        assert!(saved.exists());
    }
}
