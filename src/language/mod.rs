//! Language capabilities: tokenization, sentiment scoring, and token-set
//! similarity.
//!
//! Tokenization and sentiment are capability seams, not an NLP library. The
//! defaults here are a regex word tokenizer and a marker-lexicon scorer;
//! callers that need richer analysis plug in their own implementations.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{Alphabetic}\d']+").expect("valid word pattern"));

/// Splits text into an ordered sequence of word tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Unicode word tokenizer: alphanumeric runs, apostrophes kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        WORD_PATTERN
            .find_iter(text)
            .map(|word| word.as_str().to_string())
            .collect()
    }
}

/// Scores text valence: positive above zero, negative below.
pub trait SentimentProvider: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

/// Positive valence markers.
const POSITIVE_MARKERS: &[&str] = &[
    "thank", "thanks", "awesome", "great", "perfect", "love", "amazing", "excellent",
    "wonderful", "fantastic", "brilliant", "beautiful", "happy", "glad", "appreciate",
    "helpful", "nice", "good", "impressive", "delighted", "pleased", "excited",
    "success", "win", "hope", "curious", "interesting",
];

/// Negative valence markers.
const NEGATIVE_MARKERS: &[&str] = &[
    "frustrated", "annoying", "broken", "terrible", "hate", "awful", "horrible",
    "worst", "angry", "disappointing", "failed", "error", "wrong", "impossible",
    "disaster", "pain", "suffer", "struggling", "helpless", "furious", "disgusting",
    "useless", "waste", "sad", "afraid", "fear", "doubt",
];

static POSITIVE: Lazy<HashSet<&'static str>> =
    Lazy::new(|| POSITIVE_MARKERS.iter().copied().collect());
static NEGATIVE: Lazy<HashSet<&'static str>> =
    Lazy::new(|| NEGATIVE_MARKERS.iter().copied().collect());

/// Marker-lexicon scorer: (positive hits - negative hits) / token count.
/// Empty text scores `0.0`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconSentiment;

impl SentimentProvider for LexiconSentiment {
    fn score(&self, text: &str) -> f64 {
        let tokens = WordTokenizer.tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }
        let mut hits = 0i64;
        for token in &tokens {
            let lower = token.to_lowercase();
            if POSITIVE.contains(lower.as_str()) {
                hits += 1;
            } else if NEGATIVE.contains(lower.as_str()) {
                hits -= 1;
            }
        }
        hits as f64 / tokens.len() as f64
    }
}

/// Jaccard similarity of the lower-cased token sets of two texts.
///
/// Symmetric and in `[0, 1]`: identical non-empty token sets give `1.0`, and
/// an empty union gives `0.0` by convention.
pub fn jaccard_similarity(tokenizer: &dyn Tokenizer, a: &str, b: &str) -> f64 {
    let set_a: HashSet<String> = tokenizer
        .tokenize(a)
        .into_iter()
        .map(|token| token.to_lowercase())
        .collect();
    let set_b: HashSet<String> = tokenizer
        .tokenize(b)
        .into_iter()
        .map(|token| token.to_lowercase())
        .collect();

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / union as f64
}
