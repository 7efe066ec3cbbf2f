//! Risk Classifier: crisis-pattern and high-risk keyword scoring
//!
//! score = 2 × (crisis pattern matches) + 1 × (high-risk keywords present)
//!
//! Deterministic and monotone: more matches never lower the level.
//! On internal failure the result is (minimal, 0, [], false), always logged.

use crate::core::lexicon::{rules_for, LocaleRules};
use crate::error::Result;
use crate::types::{Locale, RiskAssessment};
use crate::{RISK_POINTS_KEYWORD, RISK_POINTS_PATTERN};

/// Rule-based crisis risk classifier. Reads the whole text.
#[derive(Debug, Default, Clone, Copy)]
pub struct RiskClassifier;

impl RiskClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Assess text. Never fails.
    pub fn classify(&self, text: &str, locale: Locale) -> RiskAssessment {
        self.classify_with(text, locale, rules_for(locale))
    }

    fn classify_with(&self, text: &str, locale: Locale, rules: &LocaleRules) -> RiskAssessment {
        match try_classify(text, locale, rules) {
            Ok(assessment) => {
                if assessment.needs_intervention {
                    tracing::warn!(
                        text_len = text.len(),
                        locale = %locale,
                        risk_level = %assessment.level,
                        score = assessment.score,
                        "Intervention-level risk detected"
                    );
                }
                assessment
            }
            Err(e) => {
                // Safety-relevant: a real crisis may have gone unscored
                tracing::warn!(
                    text_len = text.len(),
                    locale = %locale,
                    error = %e,
                    "Risk classification fell back to minimal"
                );
                RiskAssessment::fallback()
            }
        }
    }
}

fn try_classify(text: &str, locale: Locale, rules: &LocaleRules) -> Result<RiskAssessment> {
    let lowered = text.to_lowercase();
    let mut score = 0;

    // Crisis patterns: every match counts
    let mut matched_patterns = Vec::new();
    for pattern in rules.crisis_patterns()? {
        for m in pattern.find_iter(&lowered) {
            score += RISK_POINTS_PATTERN;
            matched_patterns.push(m.as_str().to_string());
        }
    }

    // High-risk keywords: presence only
    let mut matched_keywords = Vec::new();
    for keyword in rules.high_risk_keywords {
        if lowered.contains(keyword) {
            score += RISK_POINTS_KEYWORD;
            matched_keywords.push(keyword.to_string());
        }
    }

    tracing::debug!(
        text_len = text.len(),
        locale = %locale,
        score,
        patterns = matched_patterns.len(),
        keywords = matched_keywords.len(),
        "Risk scored"
    );

    Ok(RiskAssessment::from_evidence(score, matched_patterns, matched_keywords))
}

// =============================================================================
// TESTS
// =============================================================================
