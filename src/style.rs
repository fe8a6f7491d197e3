use serde::Serialize;
use tracing::{debug, warn};

use crate::config::StyleConfig;
use crate::{truncate_chars, ContentItem, PerformanceRating, Platform};

const FORMAL_MARKERS: &[&str] = &[
    "therefore",
    "moreover",
    "furthermore",
    "regarding",
    "accordingly",
    "consequently",
    "notably",
    "significant",
    "demonstrates",
    "ensure",
];

const INFORMAL_MARKERS: &[&str] = &[
    "gonna", "wanna", "kinda", "stuff", "yeah", "hey", "btw", "lol", "tbh", "honestly", "super",
    "crazy",
];

const EMOTIONAL_MARKERS: &[&str] = &[
    "love",
    "hate",
    "feel",
    "felt",
    "excited",
    "amazing",
    "grateful",
    "proud",
    "scared",
    "struggled",
    "obsessed",
    "thrilled",
];

const COMMAND_MARKERS: &[&str] = &[
    "stop", "start", "must", "never", "always", "now", "today", "don't", "do", "try", "steal",
    "remember",
];

const FIRST_PERSON_MARKERS: &[&str] = &["i", "my", "me", "mine", "we", "our"];

const STOP_WORDS: &[&str] = &[
    "this", "that", "with", "from", "they", "them", "their", "what", "when", "where", "which",
    "will", "would", "could", "should", "have", "been", "were", "your", "you're", "about", "just",
    "like", "more", "most", "some", "than", "then", "there", "these", "those", "into", "over",
    "only", "also", "because", "while", "every", "being", "doing", "here", "it's", "don't",
];

const SYMBOL_ALLOW_LIST: &[&str] = &[
    "→", "✅", "🔥", "💡", "👇", "🚀", "✨", "⚡", "❌", "📈", "•", "—",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmojiDensity {
    None,
    Sparse,
    Moderate,
    Heavy,
}

impl EmojiDensity {
    pub fn label(self) -> &'static str {
        match self {
            EmojiDensity::None => "none",
            EmojiDensity::Sparse => "sparse",
            EmojiDensity::Moderate => "moderate",
            EmojiDensity::Heavy => "heavy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSpacing {
    Tight,
    Normal,
    Airy,
}

impl LineSpacing {
    pub fn label(self) -> &'static str {
        match self {
            LineSpacing::Tight => "tight",
            LineSpacing::Normal => "normal",
            LineSpacing::Airy => "airy",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToneProfile {
    pub formality: f64,
    pub emotionality: f64,
    pub directness: f64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StructureProfile {
    pub avg_paragraphs: f64,
    pub avg_sentences_per_paragraph: f64,
    pub line_break_density: f64,
    pub uses_bullets: bool,
    pub uses_numbered_lists: bool,
    pub emoji_density: EmojiDensity,
    pub hook_style: String,
    pub cta_style: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct VocabularyProfile {
    pub top_words: Vec<WordCount>,
    pub signature_phrases: Vec<String>,
    pub avg_word_length: f64,
    pub avg_words_per_sentence: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormattingProfile {
    pub caps_emphasis: bool,
    pub recurring_symbols: Vec<String>,
    pub line_spacing: LineSpacing,
}

#[derive(Debug, Clone, Serialize)]
pub struct StyleExample {
    pub id: String,
    pub preview: String,
    pub metrics_summary: String,
    pub learning_note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StyleProfile {
    pub platform: Platform,
    pub sample_size: usize,
    pub tone: ToneProfile,
    pub structure: StructureProfile,
    pub vocabulary: VocabularyProfile,
    pub formatting: FormattingProfile,
    pub examples: Vec<StyleExample>,
}

#[derive(Debug, Clone, Serialize)]
pub enum StyleAnalysis {
    Unavailable { qualifying: usize },
    Profile(StyleProfile),
}

// Decides which items count as top performers. An explicit human rating wins
// outright; the reach threshold only applies to unrated items.
#[derive(Debug, Clone, Copy)]
pub struct WinnerPolicy {
    pub reach_threshold: u64,
}

impl WinnerPolicy {
    pub fn new(reach_threshold: u64) -> Self {
        Self { reach_threshold }
    }

    pub fn qualifies(&self, item: &ContentItem) -> bool {
        match item.rating {
            Some(PerformanceRating::Winner) => true,
            Some(_) => false,
            None => item
                .metrics
                .map(|metrics| metrics.reach_like() > self.reach_threshold)
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StyleProfiler {
    policy: WinnerPolicy,
    config: StyleConfig,
}

impl Default for StyleProfiler {
    fn default() -> Self {
        let config = StyleConfig::default();
        Self {
            policy: WinnerPolicy::new(config.reach_threshold),
            config,
        }
    }
}

impl StyleProfiler {
    pub fn new(policy: WinnerPolicy, config: StyleConfig) -> Self {
        Self { policy, config }
    }

    pub fn profile(&self, items: &[ContentItem], platform: Platform) -> StyleAnalysis {
        let mut winners: Vec<&ContentItem> = items
            .iter()
            .filter(|item| {
                if !item.is_consistent() {
                    warn!(id = %item.id, "skipping malformed content item");
                    return false;
                }
                item.platform == platform && item.is_published() && self.policy.qualifies(item)
            })
            .collect();

        winners.sort_by(|a, b| b.effective_timestamp().cmp(&a.effective_timestamp()));
        winners.truncate(self.config.sample_cap);

        let sample: Vec<(&ContentItem, String)> = winners
            .iter()
            .map(|item| (*item, item.text()))
            .filter(|(_, text)| text.chars().count() > self.config.min_text_chars)
            .collect();

        if sample.len() < self.config.min_items {
            debug!(
                qualifying = sample.len(),
                "not enough high-performing text samples for a style profile"
            );
            return StyleAnalysis::Unavailable {
                qualifying: sample.len(),
            };
        }

        let texts: Vec<&str> = sample.iter().map(|(_, text)| text.as_str()).collect();

        let examples = sample
            .iter()
            .take(3)
            .map(|(item, text)| StyleExample {
                id: item.id.clone(),
                preview: truncate_chars(text, 160),
                metrics_summary: item
                    .metrics
                    .map(|metrics| metrics.summary())
                    .unwrap_or_else(|| "no metrics".to_string()),
                learning_note: item.learning_note.clone(),
            })
            .collect();

        StyleAnalysis::Profile(StyleProfile {
            platform,
            sample_size: sample.len(),
            tone: extract_tone(&texts),
            structure: extract_structure(&texts),
            vocabulary: extract_vocabulary(&texts),
            formatting: extract_formatting(&texts),
            examples,
        })
    }
}

fn extract_tone(texts: &[&str]) -> ToneProfile {
    let mut words = 0usize;
    let mut formal = 0usize;
    let mut informal = 0usize;
    let mut emotional = 0usize;
    let mut command = 0usize;
    let mut first_person = 0usize;

    for text in texts {
        for token in tokenize(text) {
            words += 1;
            if FORMAL_MARKERS.contains(&token.as_str()) {
                formal += 1;
            }
            if INFORMAL_MARKERS.contains(&token.as_str()) {
                informal += 1;
            }
            if EMOTIONAL_MARKERS.contains(&token.as_str()) {
                emotional += 1;
            }
            if COMMAND_MARKERS.contains(&token.as_str()) {
                command += 1;
            }
            if FIRST_PERSON_MARKERS.contains(&token.as_str()) {
                first_person += 1;
            }
        }
    }

    let rate = |hits: usize| {
        if words == 0 {
            0.0
        } else {
            hits as f64 / words as f64 * 100.0
        }
    };

    let formality = clamp_scale(5.0 + (rate(formal) - rate(informal)) * 1.5);
    let emotionality = clamp_scale((rate(emotional) + rate(first_person) * 0.5) * 1.8);
    let directness = clamp_scale(rate(command) * 2.2);

    let description = tone_description(formality, emotionality, directness);

    ToneProfile {
        formality,
        emotionality,
        directness,
        description,
    }
}

fn tone_description(formality: f64, emotionality: f64, directness: f64) -> String {
    let register = if formality >= 6.5 {
        "polished, professional register"
    } else if formality <= 3.5 {
        "casual, conversational register"
    } else {
        "relaxed but composed register"
    };

    let lead = if emotionality >= directness && emotionality > 4.0 {
        "emotionally open, first-person voice"
    } else if directness > emotionality && directness > 4.0 {
        "direct, action-oriented voice"
    } else {
        "even, observational voice"
    };

    format!("{} with a {}", capitalize(register), lead)
}

fn extract_structure(texts: &[&str]) -> StructureProfile {
    let mut paragraph_total = 0usize;
    let mut sentence_total = 0usize;
    let mut line_breaks = 0usize;
    let mut chars = 0usize;
    let mut emoji = 0usize;
    let mut uses_bullets = false;
    let mut uses_numbered_lists = false;
    let mut hook_votes: Vec<&'static str> = Vec::new();
    let mut cta_votes: Vec<&'static str> = Vec::new();

    for text in texts {
        let paragraphs = split_paragraphs(text);
        paragraph_total += paragraphs.len();
        sentence_total += count_sentences(text);
        line_breaks += text.matches('\n').count();
        chars += text.chars().count();
        emoji += text.chars().filter(|ch| is_emoji(*ch)).count();

        for line in text.lines() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("- ")
                || trimmed.starts_with("* ")
                || trimmed.starts_with("\u{2022} ")
            {
                uses_bullets = true;
            }
            if is_numbered_line(trimmed) {
                uses_numbered_lists = true;
            }
        }

        if let Some(first) = text.lines().find(|line| !line.trim().is_empty()) {
            hook_votes.push(classify_hook_line(first));
        }
        if let Some(last) = text.lines().rev().find(|line| !line.trim().is_empty()) {
            cta_votes.push(classify_cta_line(last));
        }
    }

    let sample_count = texts.len().max(1) as f64;
    let avg_paragraphs = paragraph_total as f64 / sample_count;
    let avg_sentences_per_paragraph = if paragraph_total == 0 {
        0.0
    } else {
        sentence_total as f64 / paragraph_total as f64
    };
    let line_break_density = if chars == 0 {
        0.0
    } else {
        line_breaks as f64 / chars as f64 * 100.0
    };
    let emoji_per_100 = if chars == 0 {
        0.0
    } else {
        emoji as f64 / chars as f64 * 100.0
    };

    StructureProfile {
        avg_paragraphs,
        avg_sentences_per_paragraph,
        line_break_density,
        uses_bullets,
        uses_numbered_lists,
        emoji_density: emoji_tier(emoji_per_100),
        hook_style: majority_vote(&hook_votes).to_string(),
        cta_style: majority_vote(&cta_votes).to_string(),
    }
}

fn extract_vocabulary(texts: &[&str]) -> VocabularyProfile {
    let mut word_counts: std::collections::HashMap<String, usize> =
        std::collections::HashMap::new();
    let mut char_total = 0usize;
    let mut word_total = 0usize;
    let mut sentence_total = 0usize;
    let mut all_tokens: Vec<Vec<String>> = Vec::new();

    for text in texts {
        sentence_total += count_sentences(text);
        let tokens = tokenize(text);
        for token in &tokens {
            char_total += token.chars().count();
            word_total += 1;
            if token.chars().count() > 3 && !STOP_WORDS.contains(&token.as_str()) {
                *word_counts.entry(token.clone()).or_insert(0) += 1;
            }
        }
        all_tokens.push(tokens);
    }

    let mut top_words: Vec<WordCount> = word_counts
        .into_iter()
        .filter(|(_, count)| *count >= 2)
        .map(|(word, count)| WordCount { word, count })
        .collect();
    top_words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    top_words.truncate(15);

    let signature_phrases = extract_phrases(&all_tokens);

    let avg_word_length = if word_total == 0 {
        0.0
    } else {
        char_total as f64 / word_total as f64
    };
    let avg_words_per_sentence = if sentence_total == 0 {
        0.0
    } else {
        word_total as f64 / sentence_total as f64
    };

    VocabularyProfile {
        top_words,
        signature_phrases,
        avg_word_length,
        avg_words_per_sentence,
    }
}

fn extract_phrases(token_lists: &[Vec<String>]) -> Vec<String> {
    let mut counts: std::collections::HashMap<String, usize> = std::collections::HashMap::new();

    for tokens in token_lists {
        for size in [3usize, 2] {
            if tokens.len() < size {
                continue;
            }
            for window in tokens.windows(size) {
                if window.iter().all(|token| STOP_WORDS.contains(&token.as_str())) {
                    continue;
                }
                *counts.entry(window.join(" ")).or_insert(0) += 1;
            }
        }
    }

    let mut phrases: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count >= 2)
        .collect();
    phrases.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| b.0.len().cmp(&a.0.len()))
            .then_with(|| a.0.cmp(&b.0))
    });

    // Overlapping variants collapse to whichever ranked first: a kept
    // three-word phrase suppresses its two-word sub-phrases and vice versa.
    let mut kept: Vec<String> = Vec::new();
    for (phrase, _) in phrases {
        if kept
            .iter()
            .any(|existing| existing.contains(phrase.as_str()) || phrase.contains(existing.as_str()))
        {
            continue;
        }
        kept.push(phrase);
        if kept.len() == 8 {
            break;
        }
    }
    kept
}

fn extract_formatting(texts: &[&str]) -> FormattingProfile {
    let mut caps_emphasis = false;
    let mut symbol_counts: std::collections::HashMap<&'static str, usize> =
        std::collections::HashMap::new();
    let mut line_breaks = 0usize;
    let mut paragraphs = 0usize;

    for text in texts {
        if has_caps_run(text) {
            caps_emphasis = true;
        }
        for symbol in SYMBOL_ALLOW_LIST {
            let hits = text.matches(symbol).count();
            if hits > 0 {
                *symbol_counts.entry(symbol).or_insert(0) += hits;
            }
        }
        line_breaks += text.matches('\n').count();
        paragraphs += split_paragraphs(text).len();
    }

    let mut recurring_symbols: Vec<(&str, usize)> = symbol_counts
        .into_iter()
        .filter(|(_, count)| *count >= 2)
        .collect();
    recurring_symbols.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let recurring_symbols = recurring_symbols
        .into_iter()
        .map(|(symbol, _)| symbol.to_string())
        .collect();

    let breaks_per_paragraph = if paragraphs == 0 {
        0.0
    } else {
        line_breaks as f64 / paragraphs as f64
    };
    let line_spacing = if breaks_per_paragraph < 2.0 {
        LineSpacing::Tight
    } else if breaks_per_paragraph > 4.0 {
        LineSpacing::Airy
    } else {
        LineSpacing::Normal
    };

    FormattingProfile {
        caps_emphasis,
        recurring_symbols,
        line_spacing,
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|ch| ch.is_alphanumeric() || *ch == '\'')
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect()
}

fn count_sentences(text: &str) -> usize {
    let mut count = 0usize;
    let mut in_terminator = false;
    for ch in text.chars() {
        if ch == '.' || ch == '!' || ch == '?' {
            if !in_terminator {
                count += 1;
            }
            in_terminator = true;
        } else {
            in_terminator = false;
        }
    }
    count
}

fn is_numbered_line(line: &str) -> bool {
    let digits: String = line.chars().take_while(|ch| ch.is_ascii_digit()).collect();
    if digits.is_empty() {
        return false;
    }
    let rest = &line[digits.len()..];
    rest.starts_with('.') || rest.starts_with(')')
}

fn classify_hook_line(line: &str) -> &'static str {
    let trimmed = line.trim();
    if trimmed.contains('?') {
        return "question";
    }
    if trimmed.chars().next().map(|ch| ch.is_ascii_digit()).unwrap_or(false) {
        return "number-led";
    }
    let lowered = trimmed.to_lowercase();
    if tokenize(&lowered)
        .first()
        .map(|token| FIRST_PERSON_MARKERS.contains(&token.as_str()))
        .unwrap_or(false)
    {
        return "first-person story";
    }
    if trimmed.contains('!') {
        return "bold claim";
    }
    "statement"
}

fn classify_cta_line(line: &str) -> &'static str {
    let trimmed = line.trim();
    if trimmed.contains('?') {
        return "question prompt";
    }
    if trimmed.contains('!') {
        return "urgent push";
    }
    let tokens = tokenize(&trimmed.to_lowercase());
    if tokens
        .iter()
        .any(|token| FIRST_PERSON_MARKERS.contains(&token.as_str()))
    {
        return "personal invitation";
    }
    "soft ask"
}

fn majority_vote(votes: &[&'static str]) -> &'static str {
    if votes.is_empty() {
        return "unknown";
    }
    let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    for vote in votes {
        *counts.entry(vote).or_insert(0) += 1;
    }
    let best = counts.values().copied().max().unwrap_or(0);
    // Ties resolve to the earliest vote, keeping the label deterministic.
    votes
        .iter()
        .find(|vote| counts.get(**vote).copied().unwrap_or(0) == best)
        .copied()
        .unwrap_or("unknown")
}

fn has_caps_run(text: &str) -> bool {
    let mut run = 0usize;
    for ch in text.chars() {
        if ch.is_alphabetic() && ch.is_uppercase() {
            run += 1;
            if run >= 3 {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

fn is_emoji(ch: char) -> bool {
    let code = ch as u32;
    (0x1F300..=0x1FAFF).contains(&code)
        || (0x2600..=0x27BF).contains(&code)
        || (0x1F900..=0x1F9FF).contains(&code)
        || code == 0x2764
}

fn emoji_tier(per_100_chars: f64) -> EmojiDensity {
    if per_100_chars == 0.0 {
        EmojiDensity::None
    } else if per_100_chars <= 1.0 {
        EmojiDensity::Sparse
    } else if per_100_chars <= 3.0 {
        EmojiDensity::Moderate
    } else {
        EmojiDensity::Heavy
    }
}

fn clamp_scale(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(10.0)
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
