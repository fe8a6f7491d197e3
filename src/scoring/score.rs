use serde::{Deserialize, Serialize};

use crate::{ContentItem, PlatformMetrics};

// Ranking scheme: rewards high-intent actions, lets raw reach count only
// where the platform reports nothing better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleWeights {
    pub likes: f64,
    pub comments: f64,
    pub shares: f64,
    pub saves: f64,
    pub views: f64,
}

impl Default for SimpleWeights {
    fn default() -> Self {
        Self {
            likes: 1.0,
            comments: 3.0,
            shares: 5.0,
            saves: 5.0,
            views: 0.01,
        }
    }
}

// Comparison scheme: reach is discounted hard so distribution luck cannot
// dominate the pattern signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedWeights {
    pub reach: f64,
    pub likes: f64,
    pub comments: f64,
    pub shares: f64,
}

impl Default for NormalizedWeights {
    fn default() -> Self {
        Self {
            reach: 0.01,
            likes: 1.0,
            comments: 5.0,
            shares: 3.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoreCalculator {
    simple: SimpleWeights,
    normalized: NormalizedWeights,
}

impl ScoreCalculator {
    pub fn new(simple: SimpleWeights, normalized: NormalizedWeights) -> Self {
        Self { simple, normalized }
    }

    pub fn simple_score(&self, item: &ContentItem) -> f64 {
        let Some(metrics) = item.metrics else {
            return 0.0;
        };
        let w = &self.simple;
        match metrics {
            PlatformMetrics::Twitter {
                likes,
                replies,
                reposts,
                ..
            } => likes as f64 * w.likes + replies as f64 * w.comments + reposts as f64 * w.shares,
            PlatformMetrics::Linkedin {
                likes,
                comments,
                shares,
                ..
            } => likes as f64 * w.likes + comments as f64 * w.comments + shares as f64 * w.shares,
            PlatformMetrics::Instagram {
                likes,
                comments,
                saves,
                ..
            } => likes as f64 * w.likes + comments as f64 * w.comments + saves as f64 * w.saves,
            PlatformMetrics::Tiktok {
                likes,
                comments,
                shares,
                ..
            } => likes as f64 * w.likes + comments as f64 * w.comments + shares as f64 * w.shares,
            PlatformMetrics::Youtube {
                views,
                likes,
                comments,
            } => likes as f64 * w.likes + comments as f64 * w.comments + views as f64 * w.views,
        }
    }

    pub fn normalized_score(&self, item: &ContentItem) -> f64 {
        let Some(metrics) = item.metrics else {
            return 0.0;
        };
        let w = &self.normalized;
        let reach = metrics.reach_like() as f64 * w.reach;
        match metrics {
            PlatformMetrics::Twitter {
                likes,
                replies,
                reposts,
                ..
            } => {
                reach
                    + likes as f64 * w.likes
                    + replies as f64 * w.comments
                    + reposts as f64 * w.shares
            }
            PlatformMetrics::Linkedin {
                likes,
                comments,
                shares,
                ..
            } => {
                reach
                    + likes as f64 * w.likes
                    + comments as f64 * w.comments
                    + shares as f64 * w.shares
            }
            PlatformMetrics::Instagram {
                likes,
                comments,
                saves,
                ..
            } => {
                reach
                    + likes as f64 * w.likes
                    + comments as f64 * w.comments
                    + saves as f64 * w.shares
            }
            PlatformMetrics::Tiktok {
                likes,
                comments,
                shares,
                ..
            } => {
                reach
                    + likes as f64 * w.likes
                    + comments as f64 * w.comments
                    + shares as f64 * w.shares
            }
            PlatformMetrics::Youtube {
                likes, comments, ..
            } => reach + likes as f64 * w.likes + comments as f64 * w.comments,
        }
    }
}
