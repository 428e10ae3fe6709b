// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::models::stage::Stage;
use crate::provider::GenerationConfig;
use crate::provider::groq::DEFAULT_BASE_URL;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub models: ModelRoster,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub review: ReviewConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

/// Model and temperature per stage. The roster mirrors how the stages pull
/// in different directions: creative generation runs hot, review runs cold.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelRoster {
    pub planner: GenerationConfig,
    pub creator: GenerationConfig,
    pub bugfix: GenerationConfig,
    pub student_interaction: GenerationConfig,
    pub incorporate_feedback: GenerationConfig,
    pub review: GenerationConfig,
}

impl Default for ModelRoster {
    fn default() -> Self {
        Self {
            planner: GenerationConfig::new("llama-3.3-70b-versatile", 0.3),
            creator: GenerationConfig::new("llama-3.3-70b-versatile", 0.7),
            bugfix: GenerationConfig::new("openai/gpt-oss-20b", 0.2),
            student_interaction: GenerationConfig::new("openai/gpt-oss-20b", 0.6),
            incorporate_feedback: GenerationConfig::new("openai/gpt-oss-20b", 0.2),
            review: GenerationConfig::new("qwen/qwen3-32b", 0.1),
        }
    }
}

impl ModelRoster {
    pub fn for_stage(&self, stage: Stage) -> GenerationConfig {
        match stage {
            Stage::Planner => self.planner.clone(),
            Stage::Creator => self.creator.clone(),
            Stage::Bugfix => self.bugfix.clone(),
            Stage::StudentInteraction => self.student_interaction.clone(),
            Stage::IncorporateFeedback => self.incorporate_feedback.clone(),
            Stage::Review => self.review.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub save_intermediates: bool,
    pub snippet_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            save_intermediates: true,
            snippet_limit: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub root: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./output"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewConfig {
    pub score_floor: f64,
    pub mean_floor: f64,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            score_floor: 3.0,
            mean_floor: 4.0,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("SIM_GENERATE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        if config.provider.api_key.is_none() {
            config.provider.api_key = std::env::var("GROQ_API_KEY").ok();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self::default()
    }

    fn validate(&self) -> Result<()> {
        if !self.provider.base_url.starts_with("http://")
            && !self.provider.base_url.starts_with("https://")
        {
            return Err(PipelineError::Config(format!(
                "provider base_url must be an http(s) URL, got {}",
                self.provider.base_url
            )));
        }

        if self.pipeline.snippet_limit == 0 {
            return Err(PipelineError::Config(
                "snippet_limit must be greater than 0".to_string(),
            ));
        }

        if self.review.score_floor > self.review.mean_floor {
            return Err(PipelineError::Config(
                "review score_floor cannot exceed mean_floor".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert!(config.pipeline.save_intermediates);
        assert_eq!(config.review.score_floor, 3.0);
    }

    #[test]
    fn test_roster_covers_every_stage() {
        let roster = ModelRoster::default();
        for stage in Stage::SEQUENCE {
            assert!(!roster.for_stage(stage).model.is_empty());
        }
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = Config::default_config();
        config.provider.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_snippet_limit() {
        let mut config = Config::default_config();
        config.pipeline.snippet_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_review_floors() {
        let mut config = Config::default_config();
        config.review.score_floor = 4.5;
        assert!(config.validate().is_err());
    }
}
