//! The `compass init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("compass.toml").exists() {
        println!("compass.toml already exists, skipping.");
    } else {
        std::fs::write("compass.toml", SAMPLE_CONFIG)?;
        println!("Created compass.toml");
    }

    if std::path::Path::new("quiz.json").exists() {
        println!("quiz.json already exists, skipping.");
    } else {
        std::fs::write("quiz.json", SAMPLE_QUIZ)?;
        println!("Created quiz.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit quiz.json to write your own questions");
    println!("  2. Run: compass validate");
    println!("  3. Run: compass take");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# compass configuration

# Quiz file path or http(s) URL
quiz = "quiz.json"

# What "back" does to the score of the question you return to:
#   retain - keep it (re-answering counts that question twice)
#   rewind - subtract it
back_navigation = "retain"

# Uncomment to skip the hero/team prompt
# default_modality = "hero"

# Uncomment to save a JSON report for every completed session
# output_dir = "sessions"
"#;

const SAMPLE_QUIZ: &str = include_str!("sample_quiz.json");

#[cfg(test)]
mod tests {
    use super::*;
    use compass_core::parser::{parse_quiz_str, validate_quiz};
    use compass_core::MaxScores;

    #[test]
    fn sample_quiz_is_valid() {
        let quiz = parse_quiz_str(SAMPLE_QUIZ).unwrap();
        assert_eq!(quiz.len(), 9);
        assert!(validate_quiz(&quiz, &MaxScores::DEFAULT).is_empty());
    }

    #[test]
    fn sample_config_parses() {
        let config: crate::config::CompassConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.quiz, "quiz.json");
    }
}
