use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::scoring::{NormalizedWeights, SimpleWeights};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    pub min_group_size: usize,
    pub min_eligible: usize,
    pub positive_threshold: f64,
    pub negative_threshold: f64,
    pub recommend_threshold: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            min_group_size: 2,
            min_eligible: 3,
            positive_threshold: 1.2,
            negative_threshold: 0.8,
            recommend_threshold: 1.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    pub reach_threshold: u64,
    pub sample_cap: usize,
    pub min_items: usize,
    pub min_text_chars: usize,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            reach_threshold: 3000,
            sample_cap: 10,
            min_items: 2,
            min_text_chars: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    pub top_items: usize,
    pub preview_chars: usize,
    pub max_chars: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            top_items: 5,
            preview_chars: 220,
            max_chars: 6000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
    pub result_limit: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8900".to_string(),
            timeout_ms: 2500,
            result_limit: 8,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeightsConfig {
    pub simple: SimpleWeights,
    pub normalized: NormalizedWeights,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightConfig {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub patterns: PatternConfig,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl InsightConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                InsightConfig::default()
            }
        } else {
            InsightConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload).map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = env::var("MEMORY_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                self.memory.endpoint = endpoint;
            }
        }
        if let Ok(timeout) = env::var("MEMORY_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.memory.timeout_ms = value;
            }
        }
        if let Ok(limit) = env::var("MEMORY_RESULT_LIMIT") {
            if let Ok(value) = limit.parse::<usize>() {
                self.memory.result_limit = value;
            }
        }
        if let Ok(top) = env::var("CONTEXT_TOP_ITEMS") {
            if let Ok(value) = top.parse::<usize>() {
                self.context.top_items = value;
            }
        }
        if let Ok(threshold) = env::var("STYLE_REACH_THRESHOLD") {
            if let Ok(value) = threshold.parse::<u64>() {
                self.style.reach_threshold = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("INSIGHT_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/insight.toml")))
}
