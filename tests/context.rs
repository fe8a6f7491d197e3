use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use content_insight::config::InsightConfig;
use content_insight::context::{
    ContextAssembler, RankingSource, EMPTY_PLACEHOLDER, SECTION_PATTERNS,
    SECTION_RECOMMENDATIONS, SECTION_STATISTICS, SECTION_STYLE, SECTION_TOP_ITEMS,
};
use content_insight::memory_client::MemoryClient;
use content_insight::{
    ContentItem, ContentPayload, ContentStatus, HookType, PerformanceRating, Platform,
    PlatformMetrics,
};

fn when(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, day, 9, 0, 0).unwrap()
}

fn tweet(id: &str, likes: u64, day: u32) -> ContentItem {
    let created = when(1);
    ContentItem {
        id: id.to_string(),
        platform: Platform::Twitter,
        status: ContentStatus::Published,
        payload: ContentPayload::Twitter {
            text: format!(
                "Post {} with enough body text to preview cleanly in the briefing output.",
                id
            ),
        },
        metrics: Some(PlatformMetrics::Twitter {
            impressions: 1_000,
            likes,
            replies: 2,
            reposts: 1,
        }),
        hook_type: Some(HookType::Question),
        topic: None,
        format: None,
        hypothesis: None,
        learning_note: None,
        rating: None,
        created_at: created,
        updated_at: created,
        scheduled_for: None,
        published_at: Some(when(day)),
    }
}

fn corpus() -> Vec<ContentItem> {
    vec![
        tweet("alpha", 50, 2),
        tweet("bravo", 10, 3),
        tweet("charlie", 90, 4),
        tweet("delta", 30, 5),
        tweet("echo", 70, 6),
        tweet("foxtrot", 5, 7),
    ]
}

fn failing_client() -> MemoryClient {
    // Nothing listens on this port; every search errors or times out.
    MemoryClient::new(
        "http://127.0.0.1:9".to_string(),
        Duration::from_millis(200),
    )
    .unwrap()
}

#[test]
fn empty_collection_returns_placeholder_not_empty() {
    // Scenario C.
    let bundle = ContextAssembler::default().assemble(&[], Platform::Twitter);
    assert_eq!(bundle.text, EMPTY_PLACEHOLDER);
    assert!(!bundle.text.is_empty());
    assert_eq!(bundle.item_count, 0);
}

#[test]
fn platform_without_published_items_returns_placeholder() {
    let mut draft = tweet("draft", 50, 2);
    draft.status = ContentStatus::Draft;

    let bundle = ContextAssembler::default().assemble(&[draft], Platform::Twitter);
    assert_eq!(bundle.text, EMPTY_PLACEHOLDER);

    let bundle = ContextAssembler::default().assemble(&corpus(), Platform::Linkedin);
    assert_eq!(bundle.text, EMPTY_PLACEHOLDER);
}

#[test]
fn sections_appear_in_fixed_order() {
    let bundle = ContextAssembler::default().assemble(&corpus(), Platform::Twitter);

    let top = bundle.text.find(SECTION_TOP_ITEMS).expect("top section");
    let patterns = bundle.text.find(SECTION_PATTERNS).expect("patterns section");
    let recs = bundle
        .text
        .find(SECTION_RECOMMENDATIONS)
        .expect("recommendations section");
    let stats = bundle.text.find(SECTION_STATISTICS).expect("stats section");

    assert!(top < patterns && patterns < recs && recs < stats);
    // No winners above the reach threshold and no ratings: fingerprint omitted.
    assert!(!bundle.text.contains(SECTION_STYLE));
}

#[test]
fn style_section_present_when_winners_exist() {
    let mut items = corpus();
    for item in items.iter_mut().take(3) {
        item.rating = Some(PerformanceRating::Winner);
    }

    let bundle = ContextAssembler::default().assemble(&items, Platform::Twitter);
    let style = bundle.text.find(SECTION_STYLE).expect("style section");
    let patterns = bundle.text.find(SECTION_PATTERNS).unwrap();
    let recs = bundle.text.find(SECTION_RECOMMENDATIONS).unwrap();
    assert!(patterns < style && style < recs);
}

#[test]
fn top_items_ranked_by_simple_score_and_capped() {
    let bundle = ContextAssembler::default().assemble(&corpus(), Platform::Twitter);

    let order: Vec<&str> = bundle
        .text
        .lines()
        .filter_map(|line| {
            let start = line.find('[')?;
            let end = line.find(']')?;
            if line.chars().next()?.is_ascii_digit() {
                Some(&line[start + 1..end])
            } else {
                None
            }
        })
        .collect();

    assert_eq!(order, vec!["charlie", "echo", "alpha", "delta", "bravo"]);
    assert!(!bundle.text.contains("[foxtrot]"));
}

#[test]
fn statistics_report_engagement_spread() {
    let bundle = ContextAssembler::default().assemble(&corpus(), Platform::Twitter);
    assert!(bundle.text.contains("Published items: 6 | with metrics: 6"));
    assert!(bundle.text.contains("Engagement rate: avg"));
}

#[tokio::test]
async fn semantic_failure_degrades_to_identical_default_output() {
    let assembler = ContextAssembler::default();
    let items = corpus();

    let default_bundle = assembler.assemble(&items, Platform::Twitter);
    let degraded_bundle = assembler
        .assemble_semantic(&items, Platform::Twitter, "launch retro ideas", &failing_client())
        .await;

    assert!(degraded_bundle.degraded);
    assert_eq!(degraded_bundle.ranking, RankingSource::Score);
    assert_eq!(degraded_bundle.text, default_bundle.text);
}

#[tokio::test]
async fn semantic_mode_on_empty_collection_still_returns_placeholder() {
    let bundle = ContextAssembler::default()
        .assemble_semantic(&[], Platform::Twitter, "anything", &failing_client())
        .await;
    assert_eq!(bundle.text, EMPTY_PLACEHOLDER);
    assert!(!bundle.degraded);
}

#[test]
fn briefing_respects_the_configured_character_ceiling() {
    let mut config = InsightConfig::default();
    config.context.max_chars = 160;

    let bundle = ContextAssembler::from_config(&config).assemble(&corpus(), Platform::Twitter);
    assert!(bundle.text.chars().count() <= 160);
    assert!(bundle.text.ends_with('\u{2026}'));
}

#[test]
fn assembly_is_idempotent() {
    let assembler = ContextAssembler::default();
    let items = corpus();
    let first = assembler.assemble(&items, Platform::Twitter);
    let second = assembler.assemble(&items, Platform::Twitter);
    assert_eq!(first.text, second.text);
}
