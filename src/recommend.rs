use crate::config::PatternConfig;
use crate::patterns::{Confidence, PatternAnalysis, PatternCategory, PatternGroup, PatternReport};

const FALLBACK: &str = "Publish more annotated content with metrics to unlock performance \
recommendations; at least a handful of published, tagged, metriced posts are needed.";

// Fixed category priority: hook first, timing last, avoid-warnings after
// everything else.
const CATEGORY_ORDER: [PatternCategory; 5] = [
    PatternCategory::Hook,
    PatternCategory::Topic,
    PatternCategory::Format,
    PatternCategory::Hour,
    PatternCategory::Weekday,
];

pub fn build_recommendations(analysis: &PatternAnalysis, config: &PatternConfig) -> Vec<String> {
    let report = match analysis {
        PatternAnalysis::InsufficientData { .. } => return vec![FALLBACK.to_string()],
        PatternAnalysis::Report(report) => report,
    };

    let mut recommendations = Vec::new();

    for category in CATEGORY_ORDER {
        if let Some(best) = best_group(report, category, config.recommend_threshold) {
            recommendations.push(positive_sentence(category, best));
        }
    }

    let mut warnings: Vec<(&PatternGroup, PatternCategory)> = Vec::new();
    for category in CATEGORY_ORDER {
        for group in report.groups_for(category) {
            if group.confidence != Confidence::Low && group.multiplier < config.negative_threshold {
                warnings.push((group, category));
            }
        }
    }
    warnings.sort_by(|a, b| {
        a.0.multiplier
            .partial_cmp(&b.0.multiplier)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (group, category) in warnings {
        recommendations.push(avoid_sentence(category, group));
    }

    if recommendations.is_empty() {
        recommendations.push(FALLBACK.to_string());
    }
    recommendations
}

fn best_group<'a>(
    report: &'a PatternReport,
    category: PatternCategory,
    threshold: f64,
) -> Option<&'a PatternGroup> {
    // Groups are already sorted descending by multiplier.
    report
        .groups_for(category)
        .iter()
        .find(|group| group.confidence != Confidence::Low && group.multiplier > threshold)
}

fn positive_sentence(category: PatternCategory, group: &PatternGroup) -> String {
    let lift = ((group.multiplier - 1.0) * 100.0).round() as i64;
    match category {
        PatternCategory::Hook => format!(
            "Open with a {} hook; that opening style runs {}% above your average.",
            group.label, lift
        ),
        PatternCategory::Topic => format!(
            "Lean into {} topics; they run {}% above your average.",
            group.label, lift
        ),
        PatternCategory::Format => format!(
            "Favor the {} format; it runs {}% above your average.",
            group.label, lift
        ),
        PatternCategory::Hour => format!(
            "Schedule posts around {}; that slot runs {}% above your average.",
            group.label, lift
        ),
        PatternCategory::Weekday => format!(
            "Post on {}s; that day runs {}% above your average.",
            group.label, lift
        ),
    }
}

fn avoid_sentence(category: PatternCategory, group: &PatternGroup) -> String {
    let drop = ((1.0 - group.multiplier) * 100.0).round() as i64;
    match category {
        PatternCategory::Hook => format!(
            "Avoid {} hooks for now; they run {}% below your average.",
            group.label, drop
        ),
        PatternCategory::Topic => format!(
            "Avoid {} topics for now; they run {}% below your average.",
            group.label, drop
        ),
        PatternCategory::Format => format!(
            "Avoid the {} format for now; it runs {}% below your average.",
            group.label, drop
        ),
        PatternCategory::Hour => format!(
            "Avoid posting around {}; that slot runs {}% below your average.",
            group.label, drop
        ),
        PatternCategory::Weekday => format!(
            "Avoid posting on {}s; that day runs {}% below your average.",
            group.label, drop
        ),
    }
}
