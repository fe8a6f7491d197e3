use crate::{ContentItem, PlatformMetrics};

// Engagements over the platform's reach-like denominator, as a percentage.
// A zero or unreported denominator yields None: "no rate", which downstream
// rendering must keep distinct from a true 0% rate.
pub fn engagement_rate(metrics: &PlatformMetrics) -> Option<f64> {
    let (engagements, denominator) = match *metrics {
        PlatformMetrics::Twitter {
            impressions,
            likes,
            replies,
            reposts,
        } => (likes + replies + reposts, impressions),
        PlatformMetrics::Linkedin {
            impressions,
            likes,
            comments,
            shares,
        } => (likes + comments + shares, impressions),
        PlatformMetrics::Instagram {
            reach,
            impressions,
            likes,
            comments,
            saves,
        } => {
            let denominator = if impressions > 0 { impressions } else { reach };
            (likes + comments + saves, denominator)
        }
        PlatformMetrics::Tiktok {
            views,
            likes,
            comments,
            shares,
        } => (likes + comments + shares, views),
        PlatformMetrics::Youtube {
            views,
            likes,
            comments,
        } => (likes + comments, views),
    };

    if denominator == 0 {
        return None;
    }
    Some(engagements as f64 / denominator as f64 * 100.0)
}

pub fn item_engagement_rate(item: &ContentItem) -> Option<f64> {
    item.metrics.as_ref().and_then(engagement_rate)
}
