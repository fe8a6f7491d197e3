use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{InsightConfig, PatternConfig};
use crate::memory_client::{MemoryClient, MemoryKind, MemoryQuery};
use crate::patterns::{PatternAnalysis, PatternAnalyzer};
use crate::recommend::build_recommendations;
use crate::scoring::{item_engagement_rate, ScoreCalculator};
use crate::style::{StyleAnalysis, StyleProfiler, WinnerPolicy};
use crate::{format_float, format_percent, truncate_chars, ContentItem, Platform};

pub const SECTION_TOP_ITEMS: &str = "## Top-Performing Items";
pub const SECTION_PATTERNS: &str = "## Detected Patterns";
pub const SECTION_STYLE: &str = "## Style Fingerprint";
pub const SECTION_RECOMMENDATIONS: &str = "## Recommendations";
pub const SECTION_STATISTICS: &str = "## Statistics";

pub const EMPTY_PLACEHOLDER: &str = "No published content with metrics is available for this \
platform yet. Import historical content or publish posts and sync their metrics to enable \
learning-based context.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingSource {
    Score,
    Semantic,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContextBundle {
    pub text: String,
    pub ranking: RankingSource,
    pub degraded: bool,
    pub item_count: usize,
}

#[derive(Debug, Clone)]
pub struct ContextAssembler {
    calculator: ScoreCalculator,
    analyzer: PatternAnalyzer,
    profiler: StyleProfiler,
    pattern_config: PatternConfig,
    top_items: usize,
    preview_chars: usize,
    max_chars: usize,
    memory_limit: usize,
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::from_config(&InsightConfig::default())
    }
}

impl ContextAssembler {
    pub fn from_config(config: &InsightConfig) -> Self {
        let calculator = ScoreCalculator::new(
            config.weights.simple.clone(),
            config.weights.normalized.clone(),
        );
        let analyzer = PatternAnalyzer::new(calculator.clone(), config.patterns.clone());
        let profiler = StyleProfiler::new(
            WinnerPolicy::new(config.style.reach_threshold),
            config.style.clone(),
        );
        Self {
            calculator,
            analyzer,
            profiler,
            pattern_config: config.patterns.clone(),
            top_items: config.context.top_items,
            preview_chars: config.context.preview_chars,
            max_chars: config.context.max_chars,
            memory_limit: config.memory.result_limit,
        }
    }

    pub fn assemble(&self, items: &[ContentItem], platform: Platform) -> ContextBundle {
        let eligible = self.eligible(items, platform);
        if eligible.is_empty() {
            return ContextBundle {
                text: EMPTY_PLACEHOLDER.to_string(),
                ranking: RankingSource::Score,
                degraded: false,
                item_count: 0,
            };
        }

        let top = self.rank_by_score(&eligible);
        let text = self.render(items, &eligible, &top, platform);
        ContextBundle {
            text,
            ranking: RankingSource::Score,
            degraded: false,
            item_count: eligible.len(),
        }
    }

    // Semantic mode: ask the memory collaborator to rank; any failure falls
    // back to score ranking and the rendered text matches the default mode
    // byte for byte.
    pub async fn assemble_semantic(
        &self,
        items: &[ContentItem],
        platform: Platform,
        query: &str,
        client: &MemoryClient,
    ) -> ContextBundle {
        let eligible = self.eligible(items, platform);
        if eligible.is_empty() {
            return ContextBundle {
                text: EMPTY_PLACEHOLDER.to_string(),
                ranking: RankingSource::Score,
                degraded: false,
                item_count: 0,
            };
        }

        let request = MemoryQuery {
            query: query.to_string(),
            platform,
            kind: MemoryKind::ContentItem,
            limit: self.memory_limit,
        };

        match client.search(request).await {
            Ok(response) => {
                let top = self.rank_by_hits(&eligible, &response.results);
                if top.is_empty() {
                    warn!("memory search returned no mappable hits; using score ranking");
                    let mut bundle = self.assemble(items, platform);
                    bundle.degraded = true;
                    return bundle;
                }
                let text = self.render(items, &eligible, &top, platform);
                ContextBundle {
                    text,
                    ranking: RankingSource::Semantic,
                    degraded: false,
                    item_count: eligible.len(),
                }
            }
            Err(err) => {
                warn!(error = %err, "memory search failed; using score ranking");
                let mut bundle = self.assemble(items, platform);
                bundle.degraded = true;
                bundle
            }
        }
    }

    fn eligible<'a>(&self, items: &'a [ContentItem], platform: Platform) -> Vec<&'a ContentItem> {
        items
            .iter()
            .filter(|item| {
                if !item.is_consistent() {
                    warn!(id = %item.id, "skipping malformed content item");
                    return false;
                }
                item.platform == platform && item.is_published() && item.metrics.is_some()
            })
            .collect()
    }

    fn rank_by_score<'a>(&self, eligible: &[&'a ContentItem]) -> Vec<&'a ContentItem> {
        let mut ranked: Vec<&ContentItem> = eligible.to_vec();
        ranked.sort_by(|a, b| {
            self.calculator
                .simple_score(b)
                .partial_cmp(&self.calculator.simple_score(a))
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        ranked.truncate(self.top_items);
        ranked
    }

    fn rank_by_hits<'a>(
        &self,
        eligible: &[&'a ContentItem],
        hits: &[crate::memory_client::MemoryHit],
    ) -> Vec<&'a ContentItem> {
        let mut hits: Vec<&crate::memory_client::MemoryHit> = hits.iter().collect();
        hits.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut ranked: Vec<&ContentItem> = Vec::new();
        for hit in hits {
            let Some(id) = hit.item_id() else {
                continue;
            };
            if ranked.iter().any(|item| item.id == id) {
                continue;
            }
            if let Some(item) = eligible.iter().copied().find(|item| item.id == id) {
                debug!(
                    id = %item.id,
                    similarity = hit.display_similarity(),
                    "memory hit mapped to content item"
                );
                ranked.push(item);
            }
        }
        ranked.truncate(self.top_items);
        ranked
    }

    fn render(
        &self,
        items: &[ContentItem],
        eligible: &[&ContentItem],
        top: &[&ContentItem],
        platform: Platform,
    ) -> String {
        let mut doc = String::new();

        doc.push_str(SECTION_TOP_ITEMS);
        doc.push('\n');
        for (index, item) in top.iter().enumerate() {
            let score = self.calculator.simple_score(item);
            let rate = item_engagement_rate(item)
                .map(format_percent)
                .unwrap_or_else(|| "n/a".to_string());
            doc.push_str(&format!(
                "{}. [{}] score {} | engagement {}\n",
                index + 1,
                item.id,
                format_float(score, 1),
                rate
            ));
            doc.push_str(&format!(
                "   {}\n",
                truncate_chars(&item.text().replace('\n', " "), self.preview_chars)
            ));
            if let Some(metrics) = item.metrics {
                doc.push_str(&format!("   {}\n", metrics.summary()));
            }
        }

        doc.push('\n');
        doc.push_str(SECTION_PATTERNS);
        doc.push('\n');
        let analysis = self.analyzer.analyze(items, Some(platform));
        match &analysis {
            PatternAnalysis::InsufficientData { eligible } => {
                doc.push_str(&format!(
                    "Not enough published content with metrics to detect patterns yet ({} items).\n",
                    eligible
                ));
            }
            PatternAnalysis::Report(report) => {
                if report.statements.is_empty() {
                    doc.push_str("No strong patterns detected yet; keep tagging and publishing.\n");
                }
                for statement in &report.statements {
                    doc.push_str(&format!("- {}\n", statement.text));
                }
            }
        }

        if let StyleAnalysis::Profile(profile) = self.profiler.profile(items, platform) {
            doc.push('\n');
            doc.push_str(SECTION_STYLE);
            doc.push('\n');
            doc.push_str(&format!(
                "Tone: {} (formality {}/10, emotionality {}/10, directness {}/10)\n",
                profile.tone.description,
                format_float(profile.tone.formality, 1),
                format_float(profile.tone.emotionality, 1),
                format_float(profile.tone.directness, 1)
            ));
            doc.push_str(&format!(
                "Structure: {} paragraphs avg, {} sentences per paragraph, {} emoji, {} spacing\n",
                format_float(profile.structure.avg_paragraphs, 1),
                format_float(profile.structure.avg_sentences_per_paragraph, 1),
                profile.structure.emoji_density.label(),
                profile.formatting.line_spacing.label()
            ));
            doc.push_str(&format!(
                "Openers: {} | Closers: {}\n",
                profile.structure.hook_style, profile.structure.cta_style
            ));
            if profile.structure.uses_bullets || profile.structure.uses_numbered_lists {
                doc.push_str("Uses bullet or numbered lists for scannability\n");
            }
            if !profile.vocabulary.top_words.is_empty() {
                let words: Vec<&str> = profile
                    .vocabulary
                    .top_words
                    .iter()
                    .take(8)
                    .map(|entry| entry.word.as_str())
                    .collect();
                doc.push_str(&format!("Recurring words: {}\n", words.join(", ")));
            }
            if !profile.vocabulary.signature_phrases.is_empty() {
                doc.push_str(&format!(
                    "Signature phrases: {}\n",
                    profile.vocabulary.signature_phrases.join("; ")
                ));
            }
            if profile.formatting.caps_emphasis {
                doc.push_str("Uses capitalization for emphasis\n");
            }
            if !profile.formatting.recurring_symbols.is_empty() {
                doc.push_str(&format!(
                    "Recurring symbols: {}\n",
                    profile.formatting.recurring_symbols.join(" ")
                ));
            }
            for example in &profile.examples {
                doc.push_str(&format!(
                    "Example [{}]: {} ({})\n",
                    example.id, example.preview, example.metrics_summary
                ));
                if let Some(note) = &example.learning_note {
                    doc.push_str(&format!("  Learning: {}\n", note));
                }
            }
        }

        doc.push('\n');
        doc.push_str(SECTION_RECOMMENDATIONS);
        doc.push('\n');
        for recommendation in build_recommendations(&analysis, &self.pattern_config) {
            doc.push_str(&format!("- {}\n", recommendation));
        }

        doc.push('\n');
        doc.push_str(SECTION_STATISTICS);
        doc.push('\n');
        let published = items
            .iter()
            .filter(|item| item.is_consistent() && item.platform == platform && item.is_published())
            .count();
        doc.push_str(&format!(
            "Published items: {} | with metrics: {}\n",
            published,
            eligible.len()
        ));
        let rates: Vec<f64> = eligible.iter().filter_map(|item| item_engagement_rate(item)).collect();
        if rates.is_empty() {
            doc.push_str("Engagement rate: unavailable (no reach-like metrics reported)\n");
        } else {
            let avg = rates.iter().sum::<f64>() / rates.len() as f64;
            let min = rates.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = rates.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            doc.push_str(&format!(
                "Engagement rate: avg {} | min {} | max {}\n",
                format_percent(avg),
                format_percent(min),
                format_percent(max)
            ));
        }

        truncate_chars(&doc, self.max_chars)
    }
}
