//! Lexical rule scorer — the classifier of last resort.
//!
//! Weighted keyword tiers per recognized sentiment key, a 3-token negation
//! window, cross-polarity flips ("not bad"), and punctuation nudges.
//! Never fails: an input with no signal falls back to `neutral` or the
//! first category.

use crate::category::CategoryList;
use crate::result::{ClassificationResult, Method};

/// Category names the lexicon knows about (matched case-insensitively).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexiconKey {
    Positive,
    Negative,
    Neutral,
}

impl LexiconKey {
    pub fn from_category(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "positive" => Some(LexiconKey::Positive),
            "negative" => Some(LexiconKey::Negative),
            "neutral" => Some(LexiconKey::Neutral),
            _ => None,
        }
    }

    fn entry(self) -> &'static LexiconEntry {
        match self {
            LexiconKey::Positive => &POSITIVE,
            LexiconKey::Negative => &NEGATIVE,
            LexiconKey::Neutral => &NEUTRAL,
        }
    }

    /// Lexicon whose negated keywords count in this key's favour.
    fn opposite(self) -> Option<Self> {
        match self {
            LexiconKey::Positive => Some(LexiconKey::Negative),
            LexiconKey::Negative => Some(LexiconKey::Positive),
            LexiconKey::Neutral => None,
        }
    }
}

struct LexiconEntry {
    strong: &'static [&'static str],
    medium: &'static [&'static str],
    weak: &'static [&'static str],
}

#[derive(Clone, Copy)]
struct Tier {
    plain: f64,
    negated: f64,
}

const STRONG: Tier = Tier { plain: 3.0, negated: -2.0 };
const MEDIUM: Tier = Tier { plain: 2.0, negated: -1.5 };
const WEAK: Tier = Tier { plain: 1.0, negated: -0.5 };

const FLIP_BONUS: f64 = 1.5;
const EXCLAMATION_BONUS: f64 = 0.3;
const QUESTION_BONUS: f64 = 0.2;
const NEGATION_WINDOW: usize = 3;
const MAX_CONFIDENCE: f64 = 0.85;
const NO_SIGNAL_CONFIDENCE: f64 = 0.5;

static POSITIVE: LexiconEntry = LexiconEntry {
    strong: &[
        "excellent", "outstanding", "superb", "brilliant", "perfect", "exceptional",
        "phenomenal", "magnificent", "marvelous", "spectacular",
    ],
    medium: &[
        "good", "great", "nice", "wonderful", "amazing", "fantastic", "awesome", "beautiful",
        "lovely", "delightful", "pleased", "happy", "enjoy", "love", "best", "better",
    ],
    weak: &["okay", "fine", "decent", "acceptable", "satisfactory", "like", "well"],
};

// Multi-word weak entries never match a single whitespace token; kept as-is.
static NEGATIVE: LexiconEntry = LexiconEntry {
    strong: &[
        "terrible", "horrible", "awful", "disgusting", "atrocious", "abysmal", "dreadful",
        "pathetic", "appalling", "horrendous",
    ],
    medium: &[
        "bad", "poor", "disappointing", "worst", "hate", "dislike", "unfortunate", "sad",
        "unhappy", "upset", "angry", "fail", "failed", "problem", "issue",
    ],
    weak: &["not great", "not good", "could be better", "mediocre", "lacking", "subpar"],
};

static NEUTRAL: LexiconEntry = LexiconEntry {
    strong: &["neutral", "objective", "unbiased", "impartial", "factual"],
    medium: &["average", "normal", "standard", "typical", "ordinary", "moderate", "medium"],
    weak: &["okay", "fine", "alright"],
};

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nobody", "nothing", "nowhere", "hardly", "barely",
    "scarcely", "n't", "dont",
];

/// Whitespace tokens of the lowercased input plus negation marker positions.
struct Scan {
    tokens: Vec<String>,
    negations: Vec<usize>,
}

impl Scan {
    fn new(text: &str) -> Self {
        let tokens: Vec<String> = text
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let negations = tokens
            .iter()
            .enumerate()
            .filter(|(_, tok)| NEGATIONS.iter().any(|neg| tok.contains(neg)))
            .map(|(idx, _)| idx)
            .collect();
        Self { tokens, negations }
    }

    /// Index of the first token containing `keyword` (substring match).
    fn first_match(&self, keyword: &str) -> Option<usize> {
        self.tokens.iter().position(|tok| tok.contains(keyword))
    }

    fn is_negated(&self, idx: usize) -> bool {
        self.negations
            .iter()
            .any(|&n| n < idx && idx - n <= NEGATION_WINDOW)
    }

    /// Tier-weighted score of one lexicon entry. Only the first occurrence
    /// of each keyword counts.
    fn tier_score(&self, entry: &LexiconEntry) -> f64 {
        let mut score = 0.0;
        for (keywords, tier) in [(entry.strong, STRONG), (entry.medium, MEDIUM), (entry.weak, WEAK)] {
            for keyword in keywords {
                if let Some(idx) = self.first_match(keyword) {
                    score += if self.is_negated(idx) { tier.negated } else { tier.plain };
                }
            }
        }
        score
    }

    /// Bonus from the opposite lexicon's negated strong/medium keywords.
    fn flip_score(&self, opposite: &LexiconEntry) -> f64 {
        if self.negations.is_empty() {
            return 0.0;
        }
        opposite
            .strong
            .iter()
            .chain(opposite.medium)
            .filter_map(|keyword| self.first_match(keyword))
            .filter(|&idx| self.is_negated(idx))
            .count() as f64
            * FLIP_BONUS
    }
}

/// Per-category scores in category-list order, after normalization.
fn score_categories(text: &str, scan: &Scan, categories: &CategoryList) -> Vec<(String, f64)> {
    let exclamations = text.matches('!').count() as f64;
    let questions = text.matches('?').count() as f64;

    let mut scores: Vec<(String, f64)> = categories
        .iter()
        .map(|cat| {
            let mut score = 0.0;
            if let Some(key) = LexiconKey::from_category(cat) {
                score += scan.tier_score(key.entry());
                if let Some(opposite) = key.opposite() {
                    score += scan.flip_score(opposite.entry());
                }
                match key {
                    LexiconKey::Positive => score += EXCLAMATION_BONUS * exclamations,
                    LexiconKey::Neutral => score += QUESTION_BONUS * questions,
                    LexiconKey::Negative => {}
                }
            }
            (cat.to_string(), score)
        })
        .collect();

    let min = scores.iter().map(|(_, s)| *s).fold(f64::INFINITY, f64::min);
    if min < 0.0 {
        for (_, s) in &mut scores {
            *s -= min;
        }
    }
    scores
}

/// Score `input` against `categories` using the fixed lexicon.
pub fn classify_rule_based(input: &str, categories: &CategoryList) -> ClassificationResult {
    let scan = Scan::new(input);
    let scores = score_categories(input, &scan, categories);

    let max = scores.iter().map(|(_, s)| *s).fold(0.0, f64::max);
    let total: f64 = scores.iter().map(|(_, s)| *s).sum();

    let category = if max == 0.0 || total == 0.0 {
        // exact label match, unlike the lexicon lookup
        if categories.contains("neutral") {
            "neutral".to_string()
        } else {
            categories.first().to_string()
        }
    } else {
        scores
            .iter()
            .find(|(_, s)| *s == max)
            .map(|(c, _)| c.clone())
            .unwrap_or_else(|| categories.first().to_string())
    };

    let confidence = if max > 0.0 {
        (max / total * MAX_CONFIDENCE).min(MAX_CONFIDENCE)
    } else {
        NO_SIGNAL_CONFIDENCE
    };

    log::debug!(
        "rules: scores {scores:?}, negations {}, winner {category}",
        scan.negations.len()
    );

    ClassificationResult::new(category, confidence, Method::RuleBased).with_reasoning(format!(
        "Advanced rule-based classification (score: {max:.1}, negations: {})",
        scan.negations.len()
    ))
}
