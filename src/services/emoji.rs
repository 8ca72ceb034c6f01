//! Emoji lookup: weighted multi-field scoring and ranking.
//!
//! Every record is scored against the query on four fields. The label, each
//! tag and each shortcode are compared after [`normalize`] in three tiers
//! (exact, prefix, substring); the emoticon is compared against the raw
//! query. Scores from different fields, and from several tags or shortcodes,
//! add up. Records that score zero are dropped, the rest are ranked by score
//! with ties kept in collection order.

use super::normalize::normalize;

/// Weights for one field: `(exact, prefix, substring)`.
type Tiers = (u32, u32, u32);

const LABEL_WEIGHTS: Tiers = (100, 80, 50);
const TAG_WEIGHTS: Tiers = (90, 70, 40);
const SHORTCODE_WEIGHTS: Tiers = (95, 75, 45);
const EMOTICON_WEIGHT: u32 = 60;

/// Maximum number of ranked matches returned for a non-empty query.
pub const MAX_RESULTS: usize = 50;

/// Maximum number of records returned for an empty query.
pub const FALLBACK_RESULTS: usize = 20;

/// Highest group id included in the empty-query fallback.
/// Emojibase groups 0 and 1 are "Smileys & Emotion" and "People & Body".
pub const FALLBACK_MAX_GROUP: u8 = 1;

/// An emoji entry with its display data and searchable fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emoji {
    /// The glyph itself, handed back to the caller
    pub emoji: String,
    /// Primary display name (e.g. "thumbs up")
    pub label: String,
    /// Descriptive keywords
    pub tags: Vec<String>,
    /// Alternate lookup names (e.g. "thumbsup", "+1"), without colons
    pub shortcodes: Vec<String>,
    /// ASCII emoticon equivalent(s) (e.g. ":)")
    pub emoticon: Option<Emoticon>,
    /// Category id, only used by the empty-query fallback
    pub group: Option<u8>,
    /// Unique code point sequence (e.g. "1F44D")
    pub hexcode: String,
}

/// Emoticon data as the dataset gives it: one string or a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emoticon {
    Text(String),
    List(Vec<String>),
}

impl Emoticon {
    /// A single emoticon matches when it contains `raw`; a list matches when
    /// one of its members equals `raw`.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            Emoticon::Text(text) => text.contains(raw),
            Emoticon::List(items) => items.iter().any(|item| item == raw),
        }
    }
}

impl Emoji {
    /// Tags as a comma-separated string, empty when there are none
    pub fn tag_list(&self) -> String {
        self.tags.join(", ")
    }

    /// Shortcodes as a comma-separated string, empty when there are none
    pub fn shortcode_list(&self) -> String {
        self.shortcodes.join(", ")
    }

    /// The shortcode to offer for insertion, `:thumbsup:` style.
    ///
    /// Falls back to the label with whitespace runs replaced by `_`.
    pub fn primary_shortcode(&self) -> String {
        match self.shortcodes.first().filter(|code| !code.is_empty()) {
            Some(code) => format!(":{}:", code),
            None => {
                let words: Vec<&str> = self.label.split_whitespace().collect();
                format!(":{}:", words.join("_"))
            }
        }
    }
}

/// Result limits for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_results: usize,
    pub fallback_results: usize,
    pub fallback_max_group: u8,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_results: MAX_RESULTS,
            fallback_results: FALLBACK_RESULTS,
            fallback_max_group: FALLBACK_MAX_GROUP,
        }
    }
}

/// A query prepared for scoring.
#[derive(Debug, Clone)]
pub struct Query<'q> {
    raw: &'q str,
    normalized: String,
}

impl<'q> Query<'q> {
    pub fn new(raw: &'q str) -> Self {
        Self {
            raw,
            normalized: normalize(raw),
        }
    }

    pub fn raw(&self) -> &str {
        self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Three-tier comparison of one field value; at most one tier fires.
    fn tiered(&self, value: &str, (exact, prefix, substring): Tiers) -> u32 {
        let value = normalize(value);
        if value == self.normalized {
            exact
        } else if value.starts_with(&self.normalized) {
            prefix
        } else if value.contains(&self.normalized) {
            substring
        } else {
            0
        }
    }
}

/// A record paired with its score for one query.
#[derive(Debug, Clone, Copy)]
struct ScoredMatch<'a> {
    emoji: &'a Emoji,
    score: u32,
}

/// Score one record against a prepared query. Zero means no field matched.
pub fn score(emoji: &Emoji, query: &Query<'_>) -> u32 {
    let mut score = query.tiered(&emoji.label, LABEL_WEIGHTS);

    score += emoji
        .tags
        .iter()
        .map(|tag| query.tiered(tag, TAG_WEIGHTS))
        .sum::<u32>();

    score += emoji
        .shortcodes
        .iter()
        .map(|code| query.tiered(code, SHORTCODE_WEIGHTS))
        .sum::<u32>();

    // Emoticons match against the raw query, case and whitespace included.
    if let Some(emoticon) = &emoji.emoticon {
        if emoticon.matches(query.raw()) {
            score += EMOTICON_WEIGHT;
        }
    }

    score
}

/// Search for emojis matching a query with the default limits
pub fn search<'a>(emojis: &'a [Emoji], query: &str) -> Vec<&'a Emoji> {
    search_with(emojis, query, &SearchLimits::default())
}

/// Search for emojis matching a query.
///
/// An empty query returns the first `fallback_results` records whose group
/// is at most `fallback_max_group`, in collection order. Records without a
/// group never appear in the fallback.
pub fn search_with<'a>(
    emojis: &'a [Emoji],
    query: &str,
    limits: &SearchLimits,
) -> Vec<&'a Emoji> {
    if query.is_empty() {
        return emojis
            .iter()
            .filter(|e| e.group.is_some_and(|g| g <= limits.fallback_max_group))
            .take(limits.fallback_results)
            .collect();
    }

    let query = Query::new(query);
    let mut results: Vec<ScoredMatch<'a>> = emojis
        .iter()
        .filter_map(|emoji| {
            let score = score(emoji, &query);
            (score > 0).then_some(ScoredMatch { emoji, score })
        })
        .collect();

    tracing::debug!(
        query = query.raw(),
        normalized = query.normalized(),
        matched = results.len(),
        "scored emoji collection"
    );

    // sort_by is stable, equal scores keep collection order
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
        .into_iter()
        .take(limits.max_results)
        .map(|m| m.emoji)
        .collect()
}
