use serde::{Deserialize, Serialize};

use content_insight::context::RankingSource;
use content_insight::patterns::PatternAnalysis;
use content_insight::{ContentItem, Platform};

#[derive(Debug, Deserialize)]
pub struct ApiAnalyzeRequest {
    pub items: Vec<ContentItem>,
    pub platform: Option<String>,
}

impl ApiAnalyzeRequest {
    pub fn platform(&self) -> Result<Option<Platform>, String> {
        match self.platform.as_deref() {
            None => Ok(None),
            Some(value) => Platform::from_str(value)
                .map(Some)
                .ok_or_else(|| format!("invalid platform: {}", value)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiAnalyzeResponse {
    pub analysis: PatternAnalysis,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiContextRequest {
    pub items: Vec<ContentItem>,
    pub platform: String,
    pub query: Option<String>,
    #[serde(default)]
    pub semantic: bool,
}

impl ApiContextRequest {
    pub fn platform(&self) -> Result<Platform, String> {
        Platform::from_str(&self.platform)
            .ok_or_else(|| format!("invalid platform: {}", self.platform))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiContextResponse {
    pub context: String,
    pub ranking: RankingSource,
    pub degraded: bool,
    pub item_count: usize,
}
