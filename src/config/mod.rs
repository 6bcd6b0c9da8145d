mod schema;
mod validation;

pub use schema::{Config, QuestionConfig, QuestionType, StudentConfig};
pub use validation::validate_config;

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::survey::Question;

/// Get the config directory path (~/.config/group-score/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("group-score"))
}

/// Get the default session file path (~/.config/group-score/survey.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("survey.yaml"))
}

/// Load a session file from YAML
///
/// # Arguments
///
/// * `path` - Optional path to the file. If None, uses the default path (~/.config/group-score/survey.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist
/// - The file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        bail!(
            "Survey file not found at {}. Pass --config or create ~/.config/group-score/survey.yaml",
            config_path.display()
        );
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read survey file at {}", config_path.display()))?;

    serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse survey: invalid YAML in {}", config_path.display()))
}

impl QuestionConfig {
    /// Construct the question this entry describes
    pub fn build(&self) -> Result<Question> {
        let question = match self.kind {
            QuestionType::MultipleChoice => {
                Question::multiple_choice(self.id, self.text.as_str(), self.required_options()?)?
            }
            QuestionType::Checkbox => {
                Question::checkbox(self.id, self.text.as_str(), self.required_options()?)?
            }
            QuestionType::YesNo => Question::yes_no(self.id, self.text.as_str())?,
            QuestionType::Numeric => {
                let (Some(min), Some(max)) = (self.min, self.max) else {
                    bail!("numeric questions need both min and max");
                };
                Question::numeric(self.id, self.text.as_str(), min, max)?
            }
        };
        Ok(question)
    }

    fn required_options(&self) -> Result<Vec<String>> {
        match &self.options {
            Some(options) => Ok(options.clone()),
            None => bail!("options are required for this question type"),
        }
    }
}
