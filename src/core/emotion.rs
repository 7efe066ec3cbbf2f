//! Emotion Classifier: dominant emotion from lexicon bucket hits
//!
//! Buckets: fear, positive, negative (sadness- and anger-tagged entries).
//! Priority: fear > positive vs negative > neutral.

use crate::core::lexicon::{rules_for, LocaleRules};
use crate::error::{Result, SolaceError};
use crate::types::{EmotionCategory, EmotionResult, Locale};
use crate::{
    EMOTION_CONFIDENCE_CAP, EMOTION_WEIGHT_FEAR, EMOTION_WEIGHT_NEGATIVE,
    EMOTION_WEIGHT_POSITIVE,
};

/// Rule-based emotion classifier. Pure and stateless.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmotionClassifier;

impl EmotionClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify text. Never fails: internal errors yield (neutral, 0.5).
    pub fn classify(&self, text: &str, locale: Locale) -> EmotionResult {
        self.classify_with(text, locale, rules_for(locale))
    }

    fn classify_with(&self, text: &str, locale: Locale, rules: &LocaleRules) -> EmotionResult {
        match try_classify(text, rules) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(
                    text_len = text.len(),
                    locale = %locale,
                    error = %e,
                    "Emotion classification fell back to neutral"
                );
                EmotionResult::fallback()
            }
        }
    }
}

fn try_classify(text: &str, rules: &LocaleRules) -> Result<EmotionResult> {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return Ok(EmotionResult::neutral());
    }

    let hits = BucketHits::count(rules, &tokens)?;
    Ok(hits.into_result())
}

/// Lexicon hits per bucket. Each entry counts at most once.
#[derive(Debug, Default, Clone, Copy)]
struct BucketHits {
    fear: usize,
    positive: usize,
    sadness: usize,
    anger: usize,
}

impl BucketHits {
    fn count(rules: &LocaleRules, tokens: &[String]) -> Result<Self> {
        let buckets = [
            ("fear", rules.fear_words),
            ("positive", rules.positive_words),
            ("sadness", rules.sadness_words),
            ("anger", rules.anger_words),
        ];
        if let Some((name, _)) = buckets.iter().find(|(_, words)| words.is_empty()) {
            return Err(SolaceError::Classification(format!(
                "lexicon for '{}' has an empty {} bucket",
                rules.locale, name
            )));
        }

        Ok(Self {
            fear: count_entries(rules.fear_words, tokens),
            positive: count_entries(rules.positive_words, tokens),
            sadness: count_entries(rules.sadness_words, tokens),
            anger: count_entries(rules.anger_words, tokens),
        })
    }

    fn negative(&self) -> usize {
        self.sadness + self.anger
    }

    fn into_result(self) -> EmotionResult {
        let negative = self.negative();

        let (emotion, confidence) = if self.fear > 0 {
            (EmotionCategory::Fear, confidence(self.fear, EMOTION_WEIGHT_FEAR))
        } else if self.positive > negative {
            (EmotionCategory::Joy, confidence(self.positive, EMOTION_WEIGHT_POSITIVE))
        } else if negative > 0 {
            let emotion = if self.anger > self.sadness {
                EmotionCategory::Anger
            } else {
                EmotionCategory::Sadness
            };
            (emotion, confidence(negative, EMOTION_WEIGHT_NEGATIVE))
        } else {
            return EmotionResult::neutral();
        };

        EmotionResult {
            emotion,
            confidence,
            fear_hits: self.fear,
            positive_hits: self.positive,
            negative_hits: negative,
            degraded: false,
        }
    }
}

fn confidence(hits: usize, weight: f64) -> f64 {
    (hits as f64 * weight).min(EMOTION_CONFIDENCE_CAP)
}

/// Entries with at least one token starting with them
fn count_entries(entries: &[&str], tokens: &[String]) -> usize {
    entries
        .iter()
        .filter(|entry| tokens.iter().any(|t| t.starts_with(*entry)))
        .count()
}

/// Lowercased whitespace tokens with surrounding punctuation removed
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| c.is_ascii_punctuation() || c == '।' || c == '…')
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
