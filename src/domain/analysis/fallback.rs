//! Deterministic local scorer used when no provider answer is usable.
//!
//! Every rule is an ASCII case-insensitive substring test, so the output is a pure
//! function of the input text.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use super::result::{AnalysisResult, Inclusivity, InclusivityIssue, Sentiment, ToneBreakdown};

const POSITIVITY_HIGH: f64 = 0.8;
const POSITIVITY_LOW: f64 = 0.45;
const FORMALITY_HIGH: f64 = 0.7;
const FORMALITY_LOW: f64 = 0.4;
const CONFIDENCE_HIGH: f64 = 0.75;
const CONFIDENCE_LOW: f64 = 0.55;

const ISSUE_PENALTY: f64 = 0.2;
const READABILITY_BASE: f64 = 90.0;
const READABILITY_FLOOR: f64 = 30.0;

/// Prefix marking a rewrite as locally generated.
pub const IMPROVED_PREFIX: &str = "Improved (mock): ";

static POSITIVE_WORDS: Lazy<Regex> = Lazy::new(|| keywords("thank|thanks|excited|thrill|great"));
static FORMAL_WORDS: Lazy<Regex> = Lazy::new(|| keywords("we are|our team|announce"));
static CONFIDENT_WORDS: Lazy<Regex> = Lazy::new(|| keywords("will|guarantee|definitely"));
static EXCLUSIVE_WORDS: Lazy<Regex> = Lazy::new(|| keywords("guys|ladies|manpower"));
static GUYS: Lazy<Regex> = Lazy::new(|| keywords("guys"));

/// ASCII-only case folding; "ſ" and the Kelvin sign stay distinct from "s" and "k".
fn keywords(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .unicode(false)
        .build()
        .expect("valid pattern")
}

/// Scores `text` with fixed keyword heuristics.
pub fn fallback_score(text: &str) -> AnalysisResult {
    let positivity = pick(&POSITIVE_WORDS, text, POSITIVITY_HIGH, POSITIVITY_LOW);
    let formality = pick(&FORMAL_WORDS, text, FORMALITY_HIGH, FORMALITY_LOW);
    let confidence = pick(&CONFIDENT_WORDS, text, CONFIDENCE_HIGH, CONFIDENCE_LOW);

    let issues = if EXCLUSIVE_WORDS.is_match(text) {
        vec![InclusivityIssue {
            index: 0,
            text: "guys".to_string(),
            suggestion: "team".to_string(),
        }]
    } else {
        Vec::new()
    };
    let inclusivity_score = 1.0 - ISSUE_PENALTY * issues.len() as f64;

    AnalysisResult {
        sentiment: Sentiment::from_score(positivity),
        readability: readability(text),
        tone: ToneBreakdown {
            formality,
            confidence,
            positivity,
        },
        inclusivity: Inclusivity {
            score: inclusivity_score,
            issues,
        },
        improved_text: format!("{}{}", IMPROVED_PREFIX, GUYS.replace_all(text, "team")),
    }
}

/// Number of whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn readability(text: &str) -> f64 {
    (READABILITY_BASE - word_count(text) as f64 / 2.0).max(READABILITY_FLOOR)
}

fn pick(pattern: &Regex, text: &str, hit: f64, miss: f64) -> f64 {
    if pattern.is_match(text) {
        hit
    } else {
        miss
    }
}
