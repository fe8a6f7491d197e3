use chrono::{Datelike, Timelike, Weekday};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::PatternConfig;
use crate::scoring::ScoreCalculator;
use crate::{ContentItem, Platform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn from_count(count: usize) -> Self {
        if count >= 5 {
            Confidence::High
        } else if count >= 3 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    Hook,
    Topic,
    Format,
    Hour,
    Weekday,
}

impl PatternCategory {
    pub fn label(self) -> &'static str {
        match self {
            PatternCategory::Hook => "hook",
            PatternCategory::Topic => "topic",
            PatternCategory::Format => "format",
            PatternCategory::Hour => "hour",
            PatternCategory::Weekday => "weekday",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Positive,
    Avoid,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatternGroup {
    pub label: String,
    pub count: usize,
    pub average_score: f64,
    pub multiplier: f64,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatternStatement {
    pub category: PatternCategory,
    pub direction: Direction,
    pub label: String,
    pub multiplier: f64,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatternReport {
    pub platform: Option<Platform>,
    pub eligible: usize,
    pub corpus_average: f64,
    pub hook_groups: Vec<PatternGroup>,
    pub topic_groups: Vec<PatternGroup>,
    pub format_groups: Vec<PatternGroup>,
    pub hour_groups: Vec<PatternGroup>,
    pub weekday_groups: Vec<PatternGroup>,
    pub statements: Vec<PatternStatement>,
}

impl PatternReport {
    pub fn groups_for(&self, category: PatternCategory) -> &[PatternGroup] {
        match category {
            PatternCategory::Hook => &self.hook_groups,
            PatternCategory::Topic => &self.topic_groups,
            PatternCategory::Format => &self.format_groups,
            PatternCategory::Hour => &self.hour_groups,
            PatternCategory::Weekday => &self.weekday_groups,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub enum PatternAnalysis {
    InsufficientData { eligible: usize },
    Report(PatternReport),
}

#[derive(Debug, Clone, Default)]
pub struct PatternAnalyzer {
    calculator: ScoreCalculator,
    config: PatternConfig,
}

impl PatternAnalyzer {
    pub fn new(calculator: ScoreCalculator, config: PatternConfig) -> Self {
        Self { calculator, config }
    }

    pub fn analyze(&self, items: &[ContentItem], platform: Option<Platform>) -> PatternAnalysis {
        let eligible: Vec<&ContentItem> = items
            .iter()
            .filter(|item| {
                if !item.is_consistent() {
                    warn!(id = %item.id, "skipping malformed content item");
                    return false;
                }
                item.is_published()
                    && item.metrics.is_some()
                    && platform.map(|p| item.platform == p).unwrap_or(true)
            })
            .collect();

        if eligible.len() < self.config.min_eligible {
            debug!(
                eligible = eligible.len(),
                "not enough published metriced items for pattern analysis"
            );
            return PatternAnalysis::InsufficientData {
                eligible: eligible.len(),
            };
        }

        let scores: Vec<f64> = eligible
            .iter()
            .map(|item| self.calculator.normalized_score(item))
            .collect();
        let corpus_average = scores.iter().sum::<f64>() / scores.len() as f64;

        let hook_groups = self.build_groups(&eligible, &scores, corpus_average, |item| {
            item.hook_type.map(|hook| hook.label().to_string())
        });
        let topic_groups = self.build_groups(&eligible, &scores, corpus_average, |item| {
            item.topic.map(|topic| topic.label().to_string())
        });
        let format_groups = self.build_groups(&eligible, &scores, corpus_average, |item| {
            item.format.map(|format| format.label().to_string())
        });
        // Items without any timestamp stay in the categorical partitions but
        // cannot participate in timing ones.
        let hour_groups = self.build_groups(&eligible, &scores, corpus_average, |item| {
            item.effective_timestamp()
                .map(|ts| format!("{:02}:00", ts.hour()))
        });
        let weekday_groups = self.build_groups(&eligible, &scores, corpus_average, |item| {
            item.effective_timestamp()
                .map(|ts| weekday_label(ts.weekday()).to_string())
        });

        let mut statements = Vec::new();
        let categories = [
            (PatternCategory::Hook, &hook_groups),
            (PatternCategory::Topic, &topic_groups),
            (PatternCategory::Format, &format_groups),
            (PatternCategory::Hour, &hour_groups),
            (PatternCategory::Weekday, &weekday_groups),
        ];
        for (category, groups) in categories {
            for group in groups.iter() {
                if group.confidence == Confidence::Low {
                    continue;
                }
                if group.multiplier > self.config.positive_threshold {
                    statements.push(build_statement(category, group, Direction::Positive));
                } else if group.multiplier < self.config.negative_threshold {
                    statements.push(build_statement(category, group, Direction::Avoid));
                }
            }
        }
        statements.sort_by(|a, b| {
            let rank = |s: &PatternStatement| match s.direction {
                Direction::Positive => 0,
                Direction::Avoid => 1,
            };
            rank(a).cmp(&rank(b))
        });

        PatternAnalysis::Report(PatternReport {
            platform,
            eligible: eligible.len(),
            corpus_average,
            hook_groups,
            topic_groups,
            format_groups,
            hour_groups,
            weekday_groups,
            statements,
        })
    }

    fn build_groups<F>(
        &self,
        items: &[&ContentItem],
        scores: &[f64],
        corpus_average: f64,
        attribute: F,
    ) -> Vec<PatternGroup>
    where
        F: Fn(&ContentItem) -> Option<String>,
    {
        let mut buckets: HashMap<String, Vec<f64>> = HashMap::new();
        for (item, score) in items.iter().zip(scores) {
            if let Some(label) = attribute(item) {
                buckets.entry(label).or_default().push(*score);
            }
        }

        let mut groups: Vec<PatternGroup> = buckets
            .into_iter()
            .filter(|(_, group_scores)| group_scores.len() >= self.config.min_group_size)
            .map(|(label, group_scores)| {
                let count = group_scores.len();
                let average_score = group_scores.iter().sum::<f64>() / count as f64;
                let multiplier = if corpus_average == 0.0 {
                    1.0
                } else {
                    average_score / corpus_average
                };
                PatternGroup {
                    label,
                    count,
                    average_score,
                    multiplier,
                    confidence: Confidence::from_count(count),
                }
            })
            .collect();

        groups.sort_by(|a, b| {
            b.multiplier
                .partial_cmp(&a.multiplier)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.label.cmp(&b.label))
        });
        groups
    }
}

fn build_statement(
    category: PatternCategory,
    group: &PatternGroup,
    direction: Direction,
) -> PatternStatement {
    let delta = match direction {
        Direction::Positive => (group.multiplier - 1.0) * 100.0,
        Direction::Avoid => (1.0 - group.multiplier) * 100.0,
    };
    let delta = delta.round() as i64;
    let subject = match category {
        PatternCategory::Hook => format!("{} hooks", group.label),
        PatternCategory::Topic => format!("{} posts", group.label),
        PatternCategory::Format => format!("{} format posts", group.label),
        PatternCategory::Hour => format!("posts published around {}", group.label),
        PatternCategory::Weekday => format!("posts published on {}", group.label),
    };
    let text = match direction {
        Direction::Positive => format!(
            "{} outperform your average by {}% ({} samples, {} confidence)",
            subject,
            delta,
            group.count,
            group.confidence.label()
        ),
        Direction::Avoid => format!(
            "{} underperform your average by {}% ({} samples, {} confidence)",
            subject,
            delta,
            group.count,
            group.confidence.label()
        ),
    };

    PatternStatement {
        category,
        direction,
        label: group.label.clone(),
        multiplier: group.multiplier,
        text,
    }
}

fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
