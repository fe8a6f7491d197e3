use chrono::{DateTime, TimeZone, Utc};
use content_insight::config::StyleConfig;
use content_insight::style::{
    EmojiDensity, StyleAnalysis, StyleProfiler, WinnerPolicy,
};
use content_insight::{
    ContentItem, ContentPayload, ContentStatus, PerformanceRating, Platform, PlatformMetrics,
};

fn profiler() -> StyleProfiler {
    StyleProfiler::new(WinnerPolicy::new(3000), StyleConfig::default())
}

fn when(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, day, 10, 0, 0).unwrap()
}

fn winner(id: &str, text: &str, day: u32) -> ContentItem {
    let created = when(1);
    ContentItem {
        id: id.to_string(),
        platform: Platform::Twitter,
        status: ContentStatus::Published,
        payload: ContentPayload::Twitter {
            text: text.to_string(),
        },
        metrics: Some(PlatformMetrics::Twitter {
            impressions: 1_000,
            likes: 50,
            replies: 5,
            reposts: 5,
        }),
        hook_type: None,
        topic: None,
        format: None,
        hypothesis: None,
        learning_note: None,
        rating: Some(PerformanceRating::Winner),
        created_at: created,
        updated_at: created,
        scheduled_for: None,
        published_at: Some(when(day)),
    }
}

#[test]
fn two_winner_texts_produce_a_profile() {
    // Scenario D: 60 and 80 character winner texts.
    let text_60 = "Most teams track the wrong metric and wonder why growth dies";
    let text_80 = "I spent a year rewriting our onboarding and these three lessons kept showing up.";
    assert_eq!(text_60.chars().count(), 60);
    assert_eq!(text_80.chars().count(), 80);

    let items = vec![winner("a", text_60, 2), winner("b", text_80, 3)];
    match profiler().profile(&items, Platform::Twitter) {
        StyleAnalysis::Profile(profile) => {
            assert_eq!(profile.sample_size, 2);
            assert_eq!(profile.platform, Platform::Twitter);
        }
        StyleAnalysis::Unavailable { .. } => panic!("expected a profile"),
    }

    let single = vec![winner("a", text_60, 2)];
    match profiler().profile(&single, Platform::Twitter) {
        StyleAnalysis::Unavailable { qualifying } => assert_eq!(qualifying, 1),
        StyleAnalysis::Profile(_) => panic!("expected unavailable"),
    }
}

#[test]
fn short_texts_do_not_count_toward_the_minimum() {
    let items = vec![
        winner("a", "Too short to profile.", 2),
        winner("b", "Also far too short for any signal here.", 3),
    ];
    assert!(matches!(
        profiler().profile(&items, Platform::Twitter),
        StyleAnalysis::Unavailable { .. }
    ));
}

#[test]
fn reach_threshold_promotes_unrated_items() {
    let text = "Here is a longer reflection on what actually moved the needle for our launch.";
    let mut implicit = winner("implicit", text, 2);
    implicit.rating = None;
    implicit.metrics = Some(PlatformMetrics::Twitter {
        impressions: 5_000,
        likes: 10,
        replies: 1,
        reposts: 1,
    });

    let mut below = winner("below", text, 3);
    below.rating = None;
    below.metrics = Some(PlatformMetrics::Twitter {
        impressions: 2_000,
        likes: 10,
        replies: 1,
        reposts: 1,
    });

    let explicit = winner("explicit", text, 4);

    match profiler().profile(&[implicit, below, explicit], Platform::Twitter) {
        StyleAnalysis::Profile(profile) => assert_eq!(profile.sample_size, 2),
        StyleAnalysis::Unavailable { .. } => panic!("expected a profile"),
    }
}

#[test]
fn explicit_rating_overrides_the_reach_heuristic() {
    let text = "A high-reach post the author still marked as a loser after reading replies.";
    let mut loser = winner("loser", text, 2);
    loser.rating = Some(PerformanceRating::Loser);
    loser.metrics = Some(PlatformMetrics::Twitter {
        impressions: 50_000,
        likes: 10,
        replies: 1,
        reposts: 1,
    });

    let items = vec![loser, winner("w", text, 3)];
    match profiler().profile(&items, Platform::Twitter) {
        StyleAnalysis::Unavailable { qualifying } => assert_eq!(qualifying, 1),
        StyleAnalysis::Profile(_) => panic!("expected unavailable"),
    }
}

#[test]
fn sample_is_capped_to_the_most_recent_ten() {
    let text = "Another long-form note about the campaign retro and what we changed afterwards.";
    let items: Vec<ContentItem> = (1..=12)
        .map(|day| winner(&format!("item-{}", day), text, day))
        .collect();

    match profiler().profile(&items, Platform::Twitter) {
        StyleAnalysis::Profile(profile) => {
            assert_eq!(profile.sample_size, 10);
            // Most recent first; day 12 leads, days 1 and 2 fall out.
            assert_eq!(profile.examples[0].id, "item-12");
        }
        StyleAnalysis::Unavailable { .. } => panic!("expected a profile"),
    }
}

#[test]
fn structure_picks_up_lists_and_emoji() {
    let listy = "3 things that worked for us this quarter:\n\n\
                 1. Shorter hooks\n2. Fewer links\n3. Clear asks\n\n\
                 Which one would you try first?";
    let bullets = "What we changed after the retro \u{1F525}\n\n\
                   - Tighter openers\n- One idea per post\n- A real question at the end\n\n\
                   Steal these before your next planning cycle.";

    let items = vec![winner("a", listy, 2), winner("b", bullets, 3)];
    match profiler().profile(&items, Platform::Twitter) {
        StyleAnalysis::Profile(profile) => {
            assert!(profile.structure.uses_bullets);
            assert!(profile.structure.uses_numbered_lists);
            assert_ne!(profile.structure.emoji_density, EmojiDensity::None);
            assert_eq!(profile.structure.hook_style, "number-led");
        }
        StyleAnalysis::Unavailable { .. } => panic!("expected a profile"),
    }
}

#[test]
fn vocabulary_excludes_stop_words_and_short_words() {
    let a = "Onboarding flows decide retention. Onboarding changes compound over quarters.";
    let b = "Our onboarding experiment doubled activation and retention inside a month.";

    let items = vec![winner("a", a, 2), winner("b", b, 3)];
    match profiler().profile(&items, Platform::Twitter) {
        StyleAnalysis::Profile(profile) => {
            let words: Vec<&str> = profile
                .vocabulary
                .top_words
                .iter()
                .map(|entry| entry.word.as_str())
                .collect();
            assert!(words.contains(&"onboarding"));
            assert!(!words.contains(&"over"));
            assert!(!words.contains(&"and"));
            assert!(profile.vocabulary.avg_word_length > 3.0);
        }
        StyleAnalysis::Unavailable { .. } => panic!("expected a profile"),
    }
}

#[test]
fn caps_runs_flag_emphasis_formatting() {
    let shouty = "This launch was HUGE for the team and the numbers kept climbing all week long.";
    let calm = "A quieter follow-up post with the numbers behind the launch, one week later on.";

    let items = vec![winner("a", shouty, 2), winner("b", calm, 3)];
    match profiler().profile(&items, Platform::Twitter) {
        StyleAnalysis::Profile(profile) => assert!(profile.formatting.caps_emphasis),
        StyleAnalysis::Unavailable { .. } => panic!("expected a profile"),
    }
}
