use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::config::MemoryConfig;
use crate::Platform;

#[derive(Clone)]
pub struct MemoryClient {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    ContentItem,
    Learning,
    Conversation,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemoryQuery {
    pub query: String,
    pub platform: Platform,
    pub kind: MemoryKind,
    pub limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemoryHit {
    pub text: String,
    pub similarity: f64,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl MemoryHit {
    pub fn item_id(&self) -> Option<&str> {
        self.metadata.get("item_id").map(|id| id.as_str())
    }

    // Similarity is only a sort key; clamp for display, never validate.
    pub fn display_similarity(&self) -> f64 {
        if self.similarity.is_nan() {
            return 0.0;
        }
        self.similarity.max(0.0).min(1.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemoryResponse {
    pub results: Vec<MemoryHit>,
}

impl MemoryClient {
    pub fn from_config(config: &MemoryConfig) -> Result<Self, String> {
        let timeout = Duration::from_millis(config.timeout_ms);
        MemoryClient::new(config.endpoint.clone(), timeout)
    }

    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| format!("failed to build memory client: {}", err))?;
        Ok(Self { endpoint, client })
    }

    pub async fn search(&self, query: MemoryQuery) -> Result<MemoryResponse, String> {
        let url = format!("{}/search", self.endpoint.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .json(&query)
            .send()
            .await
            .map_err(|err| format!("memory request failed: {}", err))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("memory error {}: {}", status, body));
        }

        response
            .json::<MemoryResponse>()
            .await
            .map_err(|err| format!("memory response parse failed: {}", err))
    }
}
