//! Integration tests for Slice 1 - Classifiers
//!
//! Tests emotion and risk classification through the public API

use solace::core::{EmotionClassifier, RiskClassifier};
use solace::types::{EmotionCategory, Locale, RiskLevel};
use solace::{EMOTION_CONFIDENCE_CAP, INTERVENTION_SEVERITY};
use pretty_assertions::assert_eq;

const EVIDENCE: &[&str] = &[
    "I feel alone",
    "everything is pointless",
    "I am trapped",
    "I want to die",
    "I might hurt myself",
    "there is no reason to live",
];

#[test]
fn test_risk_monotone_when_evidence_added() {
    let classifier = RiskClassifier::default();
    let bases = ["", "good morning", "I feel hopeless", "I want to kill myself"];

    for base in bases {
        let before = classifier.classify(base, Locale::En);
        for extra in EVIDENCE {
            let text = format!("{} and {}", base, extra);
            let after = classifier.classify(&text, Locale::En);
            assert!(after.score >= before.score, "'{}' lowered score", text);
            assert!(after.level >= before.level, "'{}' lowered level", text);
        }
    }
}

#[test]
fn test_risk_score_to_level_table() {
    let expected = [
        (0, RiskLevel::Minimal),
        (1, RiskLevel::Mild),
        (2, RiskLevel::Moderate),
        (3, RiskLevel::Moderate),
        (4, RiskLevel::Severe),
        (5, RiskLevel::Severe),
        (6, RiskLevel::Critical),
        (40, RiskLevel::Critical),
    ];
    for (score, level) in expected {
        assert_eq!(RiskLevel::from_score(score), level, "score {}", score);
    }
}

#[test]
fn test_intervention_boundary() {
    assert!(!RiskLevel::from_score(3).needs_intervention());
    assert!(RiskLevel::from_score(4).needs_intervention());
    for level in [RiskLevel::Minimal, RiskLevel::Mild, RiskLevel::Moderate, RiskLevel::Severe, RiskLevel::Critical] {
        assert_eq!(level.needs_intervention(), level.severity() >= INTERVENTION_SEVERITY);
    }
}

#[test]
fn test_crisis_phrase_is_critical() {
    let result = RiskClassifier::default().classify("I want to kill myself", Locale::En);
    assert_eq!(result.level, RiskLevel::Critical);
    assert!(result.needs_intervention);
    assert!(!result.matched_patterns.is_empty());
}

#[test]
fn test_hopeless_worthless_is_moderate_sadness() {
    let text = "I feel hopeless and worthless";
    let risk = RiskClassifier::default().classify(text, Locale::En);
    let emotion = EmotionClassifier::default().classify(text, Locale::En);

    assert_eq!(risk.level, RiskLevel::Moderate);
    assert!(!risk.needs_intervention);
    assert_eq!(emotion.emotion, EmotionCategory::Sadness);
}

#[test]
fn test_happy_text_is_joy_and_minimal() {
    let text = "I am so happy today, everything is great";
    let risk = RiskClassifier::default().classify(text, Locale::En);
    let emotion = EmotionClassifier::default().classify(text, Locale::En);

    assert_eq!(emotion.emotion, EmotionCategory::Joy);
    assert_eq!(risk.level, RiskLevel::Minimal);
    assert_eq!(risk.score, 0);
}

#[test]
fn test_classifiers_are_idempotent() {
    let emotion = EmotionClassifier::default();
    let risk = RiskClassifier::default();
    let texts = [
        "",
        "I am so happy today, everything is great",
        "I feel hopeless and worthless",
        "I want to kill myself",
        "I'm furious and I hate everything",
        "मैं बहुत दुखी हूँ",
    ];
    for text in texts {
        for locale in Locale::ALL {
            assert_eq!(emotion.classify(text, locale), emotion.classify(text, locale));
            assert_eq!(risk.classify(text, locale), risk.classify(text, locale));
        }
    }
}

#[test]
fn test_confidence_bounded() {
    let emotion = EmotionClassifier::default();
    let long = "happy great good wonderful amazing excellent fantastic love joy ".repeat(20);
    let result = emotion.classify(&long, Locale::En);
    assert!(result.confidence <= EMOTION_CONFIDENCE_CAP);
    assert!(result.confidence > 0.0);
}

#[test]
fn test_empty_text_is_not_a_failure() {
    let emotion = EmotionClassifier::default().classify("", Locale::En);
    let risk = RiskClassifier::default().classify("", Locale::En);

    assert_eq!(emotion.emotion, EmotionCategory::Neutral);
    assert_eq!(emotion.confidence, 0.5);
    assert!(!emotion.degraded);
    assert_eq!(risk.level, RiskLevel::Minimal);
    assert!(!risk.degraded);
}

#[test]
fn test_long_message_with_crisis_is_critical() {
    let text = format!("{} I want to kill myself", "I had a long day. ".repeat(1000));
    assert_eq!(text.len(), 18_022);

    let risk = RiskClassifier::default().classify(&text, Locale::En);
    let emotion = EmotionClassifier::default().classify(&text, Locale::En);

    assert_eq!(risk.level, RiskLevel::Critical);
    assert!(risk.needs_intervention);
    assert!(!risk.degraded);
    assert!(!emotion.degraded);
}
