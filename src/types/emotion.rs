//! Emotion categories and classifier output

use serde::{Deserialize, Serialize};

/// Coarse emotional tone of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionCategory {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Disgust,
    Love,
    Optimism,
    Pessimism,
    Neutral,
}

impl EmotionCategory {
    /// All categories, in declaration order
    pub const ALL: [EmotionCategory; 10] = [
        Self::Joy,
        Self::Sadness,
        Self::Anger,
        Self::Fear,
        Self::Surprise,
        Self::Disgust,
        Self::Love,
        Self::Optimism,
        Self::Pessimism,
        Self::Neutral,
    ];

    /// Display glyph (presentation only)
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Joy => "😊",
            Self::Sadness => "😢",
            Self::Anger => "😠",
            Self::Fear => "😨",
            Self::Surprise => "😲",
            Self::Disgust => "🤢",
            Self::Love => "❤️",
            Self::Optimism => "🌟",
            Self::Pessimism => "😔",
            Self::Neutral => "😐",
        }
    }

    /// Lowercase name used in logs and wire formats
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Sadness => "sadness",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Surprise => "surprise",
            Self::Disgust => "disgust",
            Self::Love => "love",
            Self::Optimism => "optimism",
            Self::Pessimism => "pessimism",
            Self::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of the emotion classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionResult {
    /// Dominant emotion
    pub emotion: EmotionCategory,
    /// 0.0-0.8 for rule-based hits, 0.5 for neutral
    pub confidence: f64,
    /// Lexicon entries that hit, per bucket
    pub fear_hits: usize,
    pub positive_hits: usize,
    pub negative_hits: usize,
    /// True when the classifier fell back after an internal failure
    pub degraded: bool,
}

impl EmotionResult {
    /// Conservative neutral result (empty input, nothing matched)
    pub fn neutral() -> Self {
        Self {
            emotion: EmotionCategory::Neutral,
            confidence: crate::NEUTRAL_CONFIDENCE,
            fear_hits: 0,
            positive_hits: 0,
            negative_hits: 0,
            degraded: false,
        }
    }

    /// Fail-safe result after an internal error
    pub fn fallback() -> Self {
        Self {
            degraded: true,
            ..Self::neutral()
        }
    }
}
