use chrono::{DateTime, TimeZone, Utc};
use content_insight::config::PatternConfig;
use content_insight::patterns::{
    Confidence, Direction, PatternAnalysis, PatternAnalyzer, PatternCategory,
};
use content_insight::scoring::ScoreCalculator;
use content_insight::{
    ContentItem, ContentPayload, ContentStatus, HookType, Platform, PlatformMetrics,
};

fn analyzer() -> PatternAnalyzer {
    PatternAnalyzer::new(ScoreCalculator::default(), PatternConfig::default())
}

fn published_at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
}

// Normalized score reduces to plain likes when every other counter is zero.
fn tweet(id: &str, hook: Option<HookType>, likes: u64, when: Option<DateTime<Utc>>) -> ContentItem {
    let created = published_at(1, 8);
    ContentItem {
        id: id.to_string(),
        platform: Platform::Twitter,
        status: ContentStatus::Published,
        payload: ContentPayload::Twitter {
            text: format!("post {}", id),
        },
        metrics: Some(PlatformMetrics::Twitter {
            impressions: 0,
            likes,
            replies: 0,
            reposts: 0,
        }),
        hook_type: hook,
        topic: None,
        format: None,
        hypothesis: None,
        learning_note: None,
        rating: None,
        created_at: created,
        updated_at: created,
        scheduled_for: None,
        published_at: when,
    }
}

#[test]
fn question_hooks_emerge_as_positive_pattern() {
    // Scenario A: three question posts at 10/12/11, one story post at 2.
    let items = vec![
        tweet("q1", Some(HookType::Question), 10, Some(published_at(2, 9))),
        tweet("q2", Some(HookType::Question), 12, Some(published_at(3, 9))),
        tweet("q3", Some(HookType::Question), 11, Some(published_at(4, 9))),
        tweet("s1", Some(HookType::Story), 2, Some(published_at(5, 9))),
    ];

    let analysis = analyzer().analyze(&items, Some(Platform::Twitter));
    let PatternAnalysis::Report(report) = analysis else {
        panic!("expected a report");
    };

    assert!((report.corpus_average - 8.75).abs() < 1e-6);

    assert_eq!(report.hook_groups.len(), 1);
    let question = &report.hook_groups[0];
    assert_eq!(question.label, "question");
    assert_eq!(question.count, 3);
    assert!((question.average_score - 11.0).abs() < 1e-6);
    assert!((question.multiplier - 11.0 / 8.75).abs() < 1e-6);
    assert_eq!(question.confidence, Confidence::Medium);

    let positive: Vec<_> = report
        .statements
        .iter()
        .filter(|s| s.category == PatternCategory::Hook && s.direction == Direction::Positive)
        .collect();
    assert_eq!(positive.len(), 1);
    assert_eq!(positive[0].label, "question");
}

#[test]
fn fewer_than_three_eligible_items_is_insufficient() {
    let items = vec![
        tweet("a", Some(HookType::Question), 10, Some(published_at(2, 9))),
        tweet("b", Some(HookType::Question), 12, Some(published_at(3, 9))),
    ];

    match analyzer().analyze(&items, Some(Platform::Twitter)) {
        PatternAnalysis::InsufficientData { eligible } => assert_eq!(eligible, 2),
        PatternAnalysis::Report(_) => panic!("expected insufficient data"),
    }
}

#[test]
fn multiplier_is_exactly_one_when_group_matches_corpus() {
    let items = vec![
        tweet("a", Some(HookType::Question), 5, Some(published_at(2, 9))),
        tweet("b", Some(HookType::Question), 5, Some(published_at(3, 9))),
        tweet("c", Some(HookType::Question), 5, Some(published_at(4, 9))),
        tweet("d", Some(HookType::Question), 5, Some(published_at(5, 9))),
    ];

    let PatternAnalysis::Report(report) = analyzer().analyze(&items, Some(Platform::Twitter))
    else {
        panic!("expected a report");
    };
    assert_eq!(report.hook_groups[0].multiplier, 1.0);
}

#[test]
fn zero_corpus_average_defaults_multiplier_to_one() {
    let items = vec![
        tweet("a", Some(HookType::Question), 0, Some(published_at(2, 9))),
        tweet("b", Some(HookType::Question), 0, Some(published_at(3, 9))),
        tweet("c", Some(HookType::Story), 0, Some(published_at(4, 9))),
        tweet("d", Some(HookType::Story), 0, Some(published_at(5, 9))),
    ];

    let PatternAnalysis::Report(report) = analyzer().analyze(&items, Some(Platform::Twitter))
    else {
        panic!("expected a report");
    };
    for group in &report.hook_groups {
        assert_eq!(group.multiplier, 1.0);
    }
    assert!(report.statements.is_empty());
}

#[test]
fn confidence_tiers_follow_counts() {
    let mut items = Vec::new();
    for index in 0..5 {
        items.push(tweet(
            &format!("q{}", index),
            Some(HookType::Question),
            10,
            Some(published_at(2, 9)),
        ));
    }
    for index in 0..3 {
        items.push(tweet(
            &format!("s{}", index),
            Some(HookType::Story),
            10,
            Some(published_at(3, 9)),
        ));
    }
    for index in 0..2 {
        items.push(tweet(
            &format!("h{}", index),
            Some(HookType::HowTo),
            10,
            Some(published_at(4, 9)),
        ));
    }
    items.push(tweet("l1", Some(HookType::Listicle), 10, Some(published_at(5, 9))));

    let PatternAnalysis::Report(report) = analyzer().analyze(&items, Some(Platform::Twitter))
    else {
        panic!("expected a report");
    };

    let tier = |label: &str| {
        report
            .hook_groups
            .iter()
            .find(|group| group.label == label)
            .map(|group| group.confidence)
    };
    assert_eq!(tier("question"), Some(Confidence::High));
    assert_eq!(tier("story"), Some(Confidence::Medium));
    assert_eq!(tier("how-to"), Some(Confidence::Low));
    // Single-item groups never appear at all.
    assert_eq!(tier("listicle"), None);
}

#[test]
fn items_without_timestamps_skip_timing_partitions_only() {
    let items = vec![
        tweet("a", Some(HookType::Question), 10, Some(published_at(2, 9))),
        tweet("b", Some(HookType::Question), 12, Some(published_at(2, 9))),
        tweet("c", Some(HookType::Question), 11, None),
    ];

    let PatternAnalysis::Report(report) = analyzer().analyze(&items, Some(Platform::Twitter))
    else {
        panic!("expected a report");
    };

    assert_eq!(report.hook_groups[0].count, 3);
    assert_eq!(report.hour_groups[0].count, 2);
    assert_eq!(report.weekday_groups[0].count, 2);
}

#[test]
fn malformed_items_are_skipped_not_fatal() {
    let mut broken = tweet("broken", Some(HookType::Question), 50, Some(published_at(2, 9)));
    broken.platform = Platform::Linkedin; // payload still carries Twitter

    let items = vec![
        broken,
        tweet("a", Some(HookType::Question), 10, Some(published_at(2, 9))),
        tweet("b", Some(HookType::Question), 12, Some(published_at(3, 9))),
        tweet("c", Some(HookType::Question), 11, Some(published_at(4, 9))),
    ];

    let PatternAnalysis::Report(report) = analyzer().analyze(&items, None) else {
        panic!("expected a report");
    };
    assert_eq!(report.eligible, 3);
}

#[test]
fn avoid_statements_require_confident_underperformers() {
    let mut items = vec![
        tweet("s1", Some(HookType::Story), 2, Some(published_at(2, 9))),
        tweet("s2", Some(HookType::Story), 2, Some(published_at(3, 9))),
        tweet("s3", Some(HookType::Story), 2, Some(published_at(4, 9))),
    ];
    for index in 0..3 {
        items.push(tweet(
            &format!("q{}", index),
            Some(HookType::Question),
            20,
            Some(published_at(5, 9)),
        ));
    }

    let PatternAnalysis::Report(report) = analyzer().analyze(&items, Some(Platform::Twitter))
    else {
        panic!("expected a report");
    };

    let avoid: Vec<_> = report
        .statements
        .iter()
        .filter(|s| s.direction == Direction::Avoid)
        .collect();
    assert_eq!(avoid.len(), 1);
    assert_eq!(avoid[0].label, "story");
}

#[test]
fn repeated_analysis_is_identical() {
    let items = vec![
        tweet("a", Some(HookType::Question), 10, Some(published_at(2, 9))),
        tweet("b", Some(HookType::Question), 12, Some(published_at(3, 9))),
        tweet("c", Some(HookType::Story), 11, Some(published_at(4, 9))),
        tweet("d", Some(HookType::Story), 3, Some(published_at(5, 9))),
    ];

    let first = analyzer().analyze(&items, Some(Platform::Twitter));
    let second = analyzer().analyze(&items, Some(Platform::Twitter));
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
