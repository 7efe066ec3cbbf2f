//! Generated response for one user turn

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{EmotionCategory, Locale, ReasonCode, ResponseStrategy, RiskDisplay, RiskLevel};

/// Output record returned by `process_turn`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedResponse {
    /// Rendered reply
    pub text: String,
    pub emotion: EmotionCategory,
    /// Emotion confidence 0.0-0.8
    pub confidence: f64,
    /// Exactly the level the risk classifier produced for this turn
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    pub needs_intervention: bool,
    pub strategy: ResponseStrategy,
    /// Audit identifier of the strategy used
    pub strategy_id: String,
    pub reason: ReasonCode,
    /// At most 4, insertion order
    pub suggested_actions: Vec<String>,
    /// Locale actually used after fallback
    pub locale: Locale,
    pub processing_ms: f64,
    pub timestamp: DateTime<Utc>,
    /// A classifier fell back to its safe default
    pub degraded: bool,
    /// Both turns reached the persistence collaborator
    pub persisted: bool,
}

impl GeneratedResponse {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.strategy.color_code();
        let reset = ResponseStrategy::color_reset();
        let risk = RiskDisplay::for_level(self.risk_level);

        let mut out = format!(
            "{}{} {}{}\n{}  emotion={} {} ({:.2}) | risk={} {} (score {}) | {}{}",
            color,
            self.strategy.glyph(),
            self.text,
            reset,
            "\x1b[90m",
            self.emotion,
            self.emotion.glyph(),
            self.confidence,
            risk.badge,
            self.risk_level,
            self.risk_score,
            self.strategy,
            reset,
        );
        for action in &self.suggested_actions {
            out.push_str(&format!("\n  • {}", action));
        }
        out
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "strategy={} | emotion={} | confidence={:.2} | risk={} | score={} | intervention={} | actions={} | text={}",
            self.strategy_id,
            self.emotion,
            self.confidence,
            self.risk_level,
            self.risk_score,
            self.needs_intervention,
            self.suggested_actions.join("; "),
            self.text,
        )
    }
}
