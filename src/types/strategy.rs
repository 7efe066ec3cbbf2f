//! Response strategies

use serde::{Deserialize, Serialize};

/// Response mode governing template and action selection.
/// Exactly one is chosen per turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStrategy {
    Crisis,
    Supportive,
    Therapeutic,
    Conversational,
}

impl ResponseStrategy {
    pub const ALL: [ResponseStrategy; 4] = [
        Self::Crisis,
        Self::Supportive,
        Self::Therapeutic,
        Self::Conversational,
    ];

    /// Identifier recorded for audit
    pub fn audit_id(&self) -> &'static str {
        match self {
            Self::Crisis => "crisis_protocol",
            Self::Supportive => "supportive_protocol",
            Self::Therapeutic => "therapeutic_protocol",
            Self::Conversational => "conversational_protocol",
        }
    }

    /// Glyph for terminal display
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Crisis => "🚨",
            Self::Supportive => "💙",
            Self::Therapeutic => "🩺",
            Self::Conversational => "💬",
        }
    }

    /// ANSI color for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Self::Crisis => "\x1b[31m",         // Red
            Self::Supportive => "\x1b[34m",     // Blue
            Self::Therapeutic => "\x1b[33m",    // Yellow
            Self::Conversational => "\x1b[90m", // Gray
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }
}

impl std::fmt::Display for ResponseStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Crisis => "CRISIS",
            Self::Supportive => "SUPPORTIVE",
            Self::Therapeutic => "THERAPEUTIC",
            Self::Conversational => "CONVERSATIONAL",
        };
        write!(f, "{}", name)
    }
}
