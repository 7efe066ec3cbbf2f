//! Lexicon & Pattern Store: per-locale keyword lists and crisis patterns
//!
//! Every `Locale` maps to one fixed-shape `LocaleRules` record. The match is
//! exhaustive, so adding a locale without authoring its rules does not build.
//! Patterns are compiled once; `validate()` surfaces compile errors at startup.

use lazy_static::lazy_static;
use regex::Regex;
use crate::error::{Result, SolaceError};
use crate::types::Locale;

// =============================================================================
// English
// =============================================================================

const EN_FEAR: &[&str] = &["scared", "afraid", "worried", "anxious", "panic", "fear", "terrified", "nervous"];
const EN_POSITIVE: &[&str] = &["happy", "joy", "excited", "good", "great", "love", "wonderful", "glad"];
// Negative bucket, split by sub-tag
const EN_SADNESS: &[&str] = &[
    "sad", "depressed", "terrible", "awful", "bad", "miserable", "lonely", "hopeless", "worthless",
];
const EN_ANGER: &[&str] = &["angry", "hate", "furious", "annoyed", "frustrated", "rage"];

const EN_CRISIS_PATTERNS: &[&str] = &[
    // Direct suicidal language
    r"(?i)\b(suicide|suicidal|kill\s+myself|end\s+it\s+all|end\s+my\s+life|take\s+my\s+own\s+life|want\s+to\s+die|better\s+off\s+dead)\b",
    // Self-harm methods
    r"(?i)\b(hurt\s+myself|harm\s+myself|self[\s-]?harm|cut\s+myself|kill\s+myself|overdose|jump\s+off)\b",
    // Stated intent
    r"(?i)\b(want|going|plan|planning|need|wish)\s+to\s+(die|kill\s+myself|end\s+it\s+all|end\s+my\s+life)\b",
    // Loss of will to live
    r"(?i)\b(no\s+point\s+(in\s+)?living|can'?t\s+go\s+on|no\s+reason\s+to\s+live)\b",
];

const EN_HIGH_RISK: &[&str] = &["hopeless", "worthless", "meaningless", "pointless", "alone", "trapped"];

// =============================================================================
// Hindi
// =============================================================================

const HI_FEAR: &[&str] = &["डर", "घबरा", "चिंता", "भय"];
const HI_POSITIVE: &[&str] = &["खुश", "आनंद", "अच्छा", "प्यार", "बढ़िया"];
const HI_SADNESS: &[&str] = &["दुखी", "उदास", "निराश", "बेकार", "अकेल"];
const HI_ANGER: &[&str] = &["गुस्सा", "नफरत", "नाराज"];

// Devanagari inflects by suffix, so no trailing word boundary
const HI_CRISIS_PATTERNS: &[&str] = &[
    r"(आत्महत्या|खुद\s*को\s*मार|मरना\s*चाहत|जीने\s*का\s*कोई\s*फायदा\s*नहीं)",
    r"(खुद\s*को\s*(चोट|नुकसान)|कोई\s*उम्मीद\s*नहीं)",
];

const HI_HIGH_RISK: &[&str] = &["निराश", "बेकार", "अकेला", "अकेली", "फंसा", "फंसी", "अर्थहीन"];

lazy_static! {
    static ref EN_COMPILED: std::result::Result<Vec<Regex>, regex::Error> = compile(EN_CRISIS_PATTERNS);
    static ref HI_COMPILED: std::result::Result<Vec<Regex>, regex::Error> = compile(HI_CRISIS_PATTERNS);

    static ref EN_RULES: LocaleRules = LocaleRules {
        locale: Locale::En,
        fear_words: EN_FEAR,
        positive_words: EN_POSITIVE,
        sadness_words: EN_SADNESS,
        anger_words: EN_ANGER,
        crisis_patterns: &*EN_COMPILED,
        high_risk_keywords: EN_HIGH_RISK,
    };

    static ref HI_RULES: LocaleRules = LocaleRules {
        locale: Locale::Hi,
        fear_words: HI_FEAR,
        positive_words: HI_POSITIVE,
        sadness_words: HI_SADNESS,
        anger_words: HI_ANGER,
        crisis_patterns: &*HI_COMPILED,
        high_risk_keywords: HI_HIGH_RISK,
    };
}

fn compile(sources: &[&str]) -> std::result::Result<Vec<Regex>, regex::Error> {
    sources.iter().map(|s| Regex::new(s)).collect()
}

/// Rule record for one locale
#[derive(Debug)]
pub struct LocaleRules {
    pub locale: Locale,
    pub fear_words: &'static [&'static str],
    pub positive_words: &'static [&'static str],
    /// Negative bucket, sadness-tagged
    pub sadness_words: &'static [&'static str],
    /// Negative bucket, anger-tagged
    pub anger_words: &'static [&'static str],
    crisis_patterns: &'static std::result::Result<Vec<Regex>, regex::Error>,
    /// Substring-matched, lowercase
    pub high_risk_keywords: &'static [&'static str],
}

impl LocaleRules {
    /// Compiled crisis patterns
    pub fn crisis_patterns(&self) -> Result<&'static [Regex]> {
        match self.crisis_patterns {
            Ok(patterns) => Ok(patterns.as_slice()),
            Err(e) => Err(SolaceError::Classification(format!(
                "crisis patterns for '{}' failed to compile: {}",
                self.locale, e
            ))),
        }
    }
}

/// Rules for an authored locale
pub fn rules_for(locale: Locale) -> &'static LocaleRules {
    match locale {
        Locale::En => &EN_RULES,
        Locale::Hi => &HI_RULES,
    }
}

/// Check every rule record is complete. Run once at startup.
pub fn validate() -> Result<()> {
    for locale in Locale::ALL {
        let rules = rules_for(locale);
        let buckets = [
            ("fear", rules.fear_words),
            ("positive", rules.positive_words),
            ("sadness", rules.sadness_words),
            ("anger", rules.anger_words),
            ("high-risk", rules.high_risk_keywords),
        ];
        for (name, words) in buckets {
            if words.is_empty() {
                return Err(SolaceError::Config(format!(
                    "locale '{}' has an empty {} word list",
                    locale, name
                )));
            }
        }
        let patterns = rules
            .crisis_patterns()
            .map_err(|e| SolaceError::Config(e.to_string()))?;
        if patterns.is_empty() {
            return Err(SolaceError::Config(format!(
                "locale '{}' has no crisis patterns",
                locale
            )));
        }
    }
    Ok(())
}

/// Rules with empty buckets and an uncompilable crisis pattern
#[cfg(test)]
pub(crate) fn broken_rules(locale: Locale) -> &'static LocaleRules {
    let compiled: &'static std::result::Result<Vec<Regex>, regex::Error> =
        Box::leak(Box::new(Regex::new("(unclosed").map(|r| vec![r])));
    Box::leak(Box::new(LocaleRules {
        locale,
        fear_words: &[],
        positive_words: &[],
        sadness_words: &[],
        anger_words: &[],
        crisis_patterns: compiled,
        high_risk_keywords: &[],
    }))
}

// =============================================================================
// TESTS
// =============================================================================
