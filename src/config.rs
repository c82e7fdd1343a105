//! Configuration management for the skill-gap engine

use crate::error::{Result, SkillGapError};
use crate::processing::learning_plan::Difficulty;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub processing: ProcessingConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Upper bound on the TF-IDF vocabulary size
    pub max_vocabulary: usize,
    /// Add 1 to every IDF so terms shared by both documents keep a non-zero weight
    pub smooth_idf: bool,
    /// Minimum length of both sides of a fuzzy containment match
    pub fuzzy_min_len: usize,
    pub top_explanations: usize,
    pub max_resources_per_skill: usize,
    pub resource_level: Difficulty,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Role catalog used when `--roles` is not given
    pub roles_path: Option<PathBuf>,
    /// Market demand table used when `--market` is not given
    pub market_path: Option<PathBuf>,
    /// Learning resources used when `--resources` is not given
    pub resources_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub include_learning_plan: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_vocabulary: 5000,
            smooth_idf: true,
            fuzzy_min_len: 3,
            top_explanations: 5,
            max_resources_per_skill: 3,
            resource_level: Difficulty::Beginner,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
            include_learning_plan: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            processing: ProcessingConfig::default(),
            data: DataConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| SkillGapError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SkillGapError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skillgap")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.processing.max_vocabulary == 0 {
            return Err(SkillGapError::Configuration(
                "processing.max_vocabulary must be greater than zero".to_string(),
            ));
        }
        if self.processing.max_resources_per_skill == 0 {
            return Err(SkillGapError::Configuration(
                "processing.max_resources_per_skill must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Set a dotted configuration key, e.g. `processing.smooth_idf = false`
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "processing.max_vocabulary" => self.processing.max_vocabulary = parse_value(key, value)?,
            "processing.smooth_idf" => self.processing.smooth_idf = parse_value(key, value)?,
            "processing.fuzzy_min_len" => self.processing.fuzzy_min_len = parse_value(key, value)?,
            "processing.top_explanations" => self.processing.top_explanations = parse_value(key, value)?,
            "processing.max_resources_per_skill" => {
                self.processing.max_resources_per_skill = parse_value(key, value)?
            }
            "processing.resource_level" => {
                self.processing.resource_level = value.parse().map_err(SkillGapError::Configuration)?
            }
            "data.roles_path" => self.data.roles_path = optional_path(value),
            "data.market_path" => self.data.market_path = optional_path(value),
            "data.resources_path" => self.data.resources_path = optional_path(value),
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value).map_err(SkillGapError::Configuration)?
            }
            "output.detailed" => self.output.detailed = parse_value(key, value)?,
            "output.color_output" => self.output.color_output = parse_value(key, value)?,
            "output.include_learning_plan" => self.output.include_learning_plan = parse_value(key, value)?,
            _ => {
                return Err(SkillGapError::Configuration(format!("Unknown configuration key: {}", key)));
            }
        }
        self.validate()
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| SkillGapError::Configuration(format!("Invalid value '{}' for {}", value, key)))
}

fn optional_path(value: &str) -> Option<PathBuf> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}
