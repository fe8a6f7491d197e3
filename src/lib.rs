pub mod config;
pub mod context;
pub mod memory_client;
pub mod patterns;
pub mod recommend;
pub mod scoring;
pub mod style;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Twitter,
    Linkedin,
    Instagram,
    Tiktok,
    Youtube,
}

impl Platform {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "twitter" | "x" => Some(Platform::Twitter),
            "linkedin" => Some(Platform::Linkedin),
            "instagram" | "ig" => Some(Platform::Instagram),
            "tiktok" => Some(Platform::Tiktok),
            "youtube" | "yt" => Some(Platform::Youtube),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::Twitter => "Twitter",
            Platform::Linkedin => "LinkedIn",
            Platform::Instagram => "Instagram",
            Platform::Tiktok => "TikTok",
            Platform::Youtube => "YouTube",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Idea,
    Draft,
    Scheduled,
    Published,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "snake_case")]
pub enum ContentPayload {
    Twitter {
        text: String,
    },
    Linkedin {
        hook: String,
        body: String,
        call_to_action: String,
    },
    Instagram {
        caption: String,
        #[serde(default)]
        hashtags: Vec<String>,
    },
    Tiktok {
        hook: String,
        script: String,
        call_to_action: String,
    },
    Youtube {
        title: String,
        description: String,
    },
}

impl ContentPayload {
    pub fn platform(&self) -> Platform {
        match self {
            ContentPayload::Twitter { .. } => Platform::Twitter,
            ContentPayload::Linkedin { .. } => Platform::Linkedin,
            ContentPayload::Instagram { .. } => Platform::Instagram,
            ContentPayload::Tiktok { .. } => Platform::Tiktok,
            ContentPayload::Youtube { .. } => Platform::Youtube,
        }
    }

    pub fn text(&self) -> String {
        match self {
            ContentPayload::Twitter { text } => text.clone(),
            ContentPayload::Linkedin {
                hook,
                body,
                call_to_action,
            } => join_parts(&[hook, body, call_to_action]),
            ContentPayload::Instagram { caption, .. } => caption.clone(),
            ContentPayload::Tiktok {
                hook,
                script,
                call_to_action,
            } => join_parts(&[hook, script, call_to_action]),
            ContentPayload::Youtube { title, description } => join_parts(&[title, description]),
        }
    }
}

fn join_parts(parts: &[&String]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "snake_case")]
pub enum PlatformMetrics {
    Twitter {
        impressions: u64,
        likes: u64,
        replies: u64,
        reposts: u64,
    },
    Linkedin {
        impressions: u64,
        likes: u64,
        comments: u64,
        shares: u64,
    },
    Instagram {
        #[serde(default)]
        reach: u64,
        #[serde(default)]
        impressions: u64,
        likes: u64,
        comments: u64,
        saves: u64,
    },
    Tiktok {
        views: u64,
        likes: u64,
        comments: u64,
        shares: u64,
    },
    Youtube {
        views: u64,
        likes: u64,
        comments: u64,
    },
}

impl PlatformMetrics {
    pub fn platform(&self) -> Platform {
        match self {
            PlatformMetrics::Twitter { .. } => Platform::Twitter,
            PlatformMetrics::Linkedin { .. } => Platform::Linkedin,
            PlatformMetrics::Instagram { .. } => Platform::Instagram,
            PlatformMetrics::Tiktok { .. } => Platform::Tiktok,
            PlatformMetrics::Youtube { .. } => Platform::Youtube,
        }
    }

    // Reach-like counter used by the winner heuristic and normalized scoring.
    // Instagram reports both impressions and reach; impressions wins when set.
    pub fn reach_like(&self) -> u64 {
        match *self {
            PlatformMetrics::Twitter { impressions, .. } => impressions,
            PlatformMetrics::Linkedin { impressions, .. } => impressions,
            PlatformMetrics::Instagram {
                reach, impressions, ..
            } => {
                if impressions > 0 {
                    impressions
                } else {
                    reach
                }
            }
            PlatformMetrics::Tiktok { views, .. } => views,
            PlatformMetrics::Youtube { views, .. } => views,
        }
    }

    pub fn summary(&self) -> String {
        match *self {
            PlatformMetrics::Twitter {
                impressions,
                likes,
                replies,
                reposts,
            } => format!(
                "{} impressions | {} likes | {} replies | {} reposts",
                format_number(impressions as f64),
                format_number(likes as f64),
                format_number(replies as f64),
                format_number(reposts as f64)
            ),
            PlatformMetrics::Linkedin {
                impressions,
                likes,
                comments,
                shares,
            } => format!(
                "{} impressions | {} likes | {} comments | {} shares",
                format_number(impressions as f64),
                format_number(likes as f64),
                format_number(comments as f64),
                format_number(shares as f64)
            ),
            PlatformMetrics::Instagram {
                reach,
                impressions,
                likes,
                comments,
                saves,
            } => format!(
                "{} reach | {} likes | {} comments | {} saves",
                format_number(impressions.max(reach) as f64),
                format_number(likes as f64),
                format_number(comments as f64),
                format_number(saves as f64)
            ),
            PlatformMetrics::Tiktok {
                views,
                likes,
                comments,
                shares,
            } => format!(
                "{} views | {} likes | {} comments | {} shares",
                format_number(views as f64),
                format_number(likes as f64),
                format_number(comments as f64),
                format_number(shares as f64)
            ),
            PlatformMetrics::Youtube {
                views,
                likes,
                comments,
            } => format!(
                "{} views | {} likes | {} comments",
                format_number(views as f64),
                format_number(likes as f64),
                format_number(comments as f64)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookType {
    Question,
    Story,
    Stat,
    Contrarian,
    HowTo,
    Listicle,
}

impl HookType {
    pub fn label(self) -> &'static str {
        match self {
            HookType::Question => "question",
            HookType::Story => "story",
            HookType::Stat => "stat",
            HookType::Contrarian => "contrarian",
            HookType::HowTo => "how-to",
            HookType::Listicle => "listicle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Product,
    Marketing,
    Industry,
    Personal,
    Education,
    BehindTheScenes,
}

impl Topic {
    pub fn label(self) -> &'static str {
        match self {
            Topic::Product => "product",
            Topic::Marketing => "marketing",
            Topic::Industry => "industry",
            Topic::Personal => "personal",
            Topic::Education => "education",
            Topic::BehindTheScenes => "behind-the-scenes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentFormat {
    Text,
    Image,
    Carousel,
    Video,
    Thread,
    Poll,
}

impl ContentFormat {
    pub fn label(self) -> &'static str {
        match self {
            ContentFormat::Text => "text",
            ContentFormat::Image => "image",
            ContentFormat::Carousel => "carousel",
            ContentFormat::Video => "video",
            ContentFormat::Thread => "thread",
            ContentFormat::Poll => "poll",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceRating {
    Winner,
    Average,
    Loser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub platform: Platform,
    pub status: ContentStatus,
    pub payload: ContentPayload,
    #[serde(default)]
    pub metrics: Option<PlatformMetrics>,
    #[serde(default)]
    pub hook_type: Option<HookType>,
    #[serde(default)]
    pub topic: Option<Topic>,
    #[serde(default)]
    pub format: Option<ContentFormat>,
    #[serde(default)]
    pub hypothesis: Option<String>,
    #[serde(default)]
    pub learning_note: Option<String>,
    #[serde(default)]
    pub rating: Option<PerformanceRating>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl ContentItem {
    // Payload and metrics must carry the item's own platform; anything else
    // is a malformed record from the store and gets skipped, not raised.
    pub fn is_consistent(&self) -> bool {
        if self.payload.platform() != self.platform {
            return false;
        }
        match self.metrics {
            Some(metrics) => metrics.platform() == self.platform,
            None => true,
        }
    }

    pub fn text(&self) -> String {
        self.payload.text()
    }

    pub fn is_published(&self) -> bool {
        self.status == ContentStatus::Published
    }

    pub fn effective_timestamp(&self) -> Option<DateTime<Utc>> {
        self.published_at.or(self.scheduled_for)
    }
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}\u{2026}", truncated.trim_end())
}

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
