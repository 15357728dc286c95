//! compass CLI — the terminal presenter for the quiz engine.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod render;

use render::OutputFormat;

#[derive(Parser)]
#[command(name = "compass", version, about = "Commander's Compass personality quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz interactively
    Take {
        /// Quiz file path or http(s) URL
        #[arg(long)]
        quiz: Option<String>,

        /// Skip the welcome choice: hero or team
        #[arg(long)]
        modality: Option<String>,

        /// What going back does to earlier scores: retain or rewind
        #[arg(long)]
        back_navigation: Option<String>,

        /// Directory to save session reports in
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a scripted set of answers without prompting
    Score {
        /// Quiz file path or http(s) URL
        #[arg(long)]
        quiz: Option<String>,

        /// hero or team
        #[arg(long)]
        modality: String,

        /// Comma-separated choice numbers (1-based), `b` to go back
        #[arg(long, default_value = "")]
        answers: String,

        /// What going back does to earlier scores: retain or rewind
        #[arg(long)]
        back_navigation: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Directory to save the session report in
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a quiz definition
    Validate {
        /// Quiz file path or http(s) URL
        #[arg(long)]
        quiz: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print a saved session report
    Show {
        /// Session report JSON
        #[arg(long)]
        report: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Create starter config and sample quiz
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("compass=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            quiz,
            modality,
            back_navigation,
            output,
            config,
        } => commands::take::execute(quiz, modality, back_navigation, output, config).await,
        Commands::Score {
            quiz,
            modality,
            answers,
            back_navigation,
            format,
            output,
            config,
        } => {
            commands::score::execute(
                quiz,
                modality,
                answers,
                back_navigation,
                format,
                output,
                config,
            )
            .await
        }
        Commands::Validate { quiz, config } => commands::validate::execute(quiz, config).await,
        Commands::Show { report, format } => commands::show::execute(report, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
