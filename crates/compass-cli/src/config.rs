//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use compass_core::{BackNavigation, Modality};
use compass_loader::QuizSource;

/// Top-level compass configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompassConfig {
    /// Quiz file path or http(s) URL.
    #[serde(default = "default_quiz")]
    pub quiz: String,
    /// What `back` does to the score of the revisited question.
    #[serde(default)]
    pub back_navigation: BackNavigation,
    /// Modality to use without asking.
    #[serde(default)]
    pub default_modality: Option<Modality>,
    /// Directory for session reports; none means reports are not saved.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_quiz() -> String {
    "quiz.json".to_string()
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            quiz: default_quiz(),
            back_navigation: BackNavigation::default(),
            default_modality: None,
            output_dir: None,
        }
    }
}

impl CompassConfig {
    /// The quiz source, preferring a command-line override.
    pub fn quiz_source(&self, cli_override: Option<&str>) -> Result<QuizSource> {
        cli_override
            .unwrap_or(&self.quiz)
            .parse()
            .map_err(|e: String| anyhow::anyhow!("{}", e))
    }

    /// The back-navigation policy, preferring a command-line override.
    pub fn back_navigation(&self, cli_override: Option<&str>) -> Result<BackNavigation> {
        match cli_override {
            Some(s) => s.parse().map_err(|e: String| anyhow::anyhow!("{}", e)),
            None => Ok(self.back_navigation),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `compass.toml` in the current directory
/// 2. `~/.config/compass/config.toml`
///
/// `COMPASS_QUIZ` overrides the quiz source.
pub fn load_config_from(path: Option<&Path>) -> Result<CompassConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("compass.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<CompassConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => CompassConfig::default(),
    };

    if let Ok(quiz) = std::env::var("COMPASS_QUIZ") {
        config.quiz = quiz;
    }

    config.quiz = resolve_env_vars(&config.quiz);
    config.output_dir = config
        .output_dir
        .map(|dir| PathBuf::from(resolve_env_vars(&dir.to_string_lossy())));

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("compass"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_COMPASS_TEST_VAR", "quizzes");
        assert_eq!(resolve_env_vars("${_COMPASS_TEST_VAR}"), "quizzes");
        assert_eq!(
            resolve_env_vars("${_COMPASS_TEST_VAR}/compass.json"),
            "quizzes/compass.json"
        );
        assert_eq!(resolve_env_vars("no vars"), "no vars");
        std::env::remove_var("_COMPASS_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_rescan_values() {
        std::env::set_var("_COMPASS_TEST_SELF", "${_COMPASS_TEST_SELF}");
        std::env::set_var("_COMPASS_TEST_DIR", "quizzes");
        assert_eq!(
            resolve_env_vars("${_COMPASS_TEST_SELF}/${_COMPASS_TEST_DIR}/q.json"),
            "${_COMPASS_TEST_SELF}/quizzes/q.json"
        );
        assert_eq!(resolve_env_vars("a/${unterminated"), "a/${unterminated");
        assert_eq!(resolve_env_vars("${_COMPASS_TEST_UNSET}x"), "x");
        std::env::remove_var("_COMPASS_TEST_SELF");
        std::env::remove_var("_COMPASS_TEST_DIR");
    }

    #[test]
    fn default_config() {
        let config = CompassConfig::default();
        assert_eq!(config.quiz, "quiz.json");
        assert_eq!(config.back_navigation, BackNavigation::Retain);
        assert!(config.default_modality.is_none());
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn parse_config() {
        let toml_str = r#"
quiz = "https://example.com/quizData.json"
back_navigation = "rewind"
default_modality = "team"
output_dir = "sessions"
"#;
        let config: CompassConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.back_navigation, BackNavigation::Rewind);
        assert_eq!(config.default_modality, Some(Modality::Team));
        assert!(matches!(
            config.quiz_source(None).unwrap(),
            QuizSource::Url(_)
        ));
        assert!(matches!(
            config.quiz_source(Some("local.json")).unwrap(),
            QuizSource::File(_)
        ));
    }

    #[test]
    fn back_navigation_override() {
        let config = CompassConfig::default();
        assert_eq!(
            config.back_navigation(Some("rewind")).unwrap(),
            BackNavigation::Rewind
        );
        assert_eq!(config.back_navigation(None).unwrap(), BackNavigation::Retain);
        assert!(config.back_navigation(Some("sideways")).is_err());
    }

    #[test]
    fn missing_explicit_config_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/compass.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
