//! Input manager for documents and JSON catalogs

use crate::error::{Result, SkillGapError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::learning_plan::ResourceCatalog;
use crate::processing::market::MarketData;
use crate::processing::profile::{CandidateProfile, RoleCatalog};
use log::info;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, String>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Résumé or job description text from a .txt or .md file
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if let Some(cached_text) = self.cache.get(&path_str) {
            info!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        Self::ensure_exists(path)?;

        let text = match FileType::from_path(path) {
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Json | FileType::Unknown => {
                return Err(SkillGapError::UnsupportedFormat(format!(
                    "Expected a .txt or .md document, got: {}",
                    path.display()
                )));
            }
        };

        self.cache.insert(path_str, text.clone());

        Ok(text)
    }

    pub async fn load_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        Self::ensure_exists(path)?;
        if FileType::from_path(path) != FileType::Json {
            return Err(SkillGapError::UnsupportedFormat(format!(
                "Expected a .json file, got: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).await?;
        let value = serde_json::from_str(&content).map_err(|e| {
            SkillGapError::InvalidInput(format!("Failed to parse '{}': {}", path.display(), e))
        })?;
        Ok(value)
    }

    /// Role catalog file: a JSON array of roles with their requirements
    pub async fn load_roles(&self, path: &Path) -> Result<RoleCatalog> {
        info!("Loading role catalog: {}", path.display());
        let roles = self.load_json(path).await?;
        Ok(RoleCatalog { roles })
    }

    pub async fn load_market(&self, path: &Path) -> Result<MarketData> {
        info!("Loading market data: {}", path.display());
        self.load_json(path).await
    }

    pub async fn load_profile(&self, path: &Path) -> Result<CandidateProfile> {
        info!("Loading candidate profile: {}", path.display());
        self.load_json(path).await
    }

    /// Learning resource file: a JSON array of resources tagged with their skill
    pub async fn load_resources(&self, path: &Path) -> Result<ResourceCatalog> {
        info!("Loading learning resources: {}", path.display());
        let resources = self.load_json(path).await?;
        Ok(ResourceCatalog::from_resources(resources))
    }

    fn ensure_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(SkillGapError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }
        Ok(())
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
