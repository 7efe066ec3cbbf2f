//! Risk levels and classifier output
//!
//! The core reasons only over the ordinal severity. Colors and badges live in
//! `RiskDisplay` and are never consulted by policy code.

use serde::{Deserialize, Serialize};
use crate::{
    INTERVENTION_SEVERITY, RISK_SCORE_CRITICAL, RISK_SCORE_MILD,
    RISK_SCORE_MODERATE, RISK_SCORE_SEVERE,
};

/// Ordered crisis-risk levels (minimal=1 .. critical=5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Minimal = 1,
    Mild = 2,
    Moderate = 3,
    Severe = 4,
    Critical = 5,
}

impl RiskLevel {
    /// Numeric severity 1-5
    pub fn severity(&self) -> u8 {
        *self as u8
    }

    /// Map a cumulative risk score to a level
    pub fn from_score(score: u32) -> Self {
        if score >= RISK_SCORE_CRITICAL {
            Self::Critical
        } else if score >= RISK_SCORE_SEVERE {
            Self::Severe
        } else if score >= RISK_SCORE_MODERATE {
            Self::Moderate
        } else if score >= RISK_SCORE_MILD {
            Self::Mild
        } else {
            Self::Minimal
        }
    }

    /// Level from numeric severity, if in range
    pub fn from_severity(severity: u8) -> Option<Self> {
        match severity {
            1 => Some(Self::Minimal),
            2 => Some(Self::Mild),
            3 => Some(Self::Moderate),
            4 => Some(Self::Severe),
            5 => Some(Self::Critical),
            _ => None,
        }
    }

    /// Severe and above require intervention
    pub fn needs_intervention(&self) -> bool {
        self.severity() >= INTERVENTION_SEVERITY
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Presentation metadata for a risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskDisplay {
    pub color: &'static str,
    pub badge: &'static str,
}

impl RiskDisplay {
    pub fn for_level(level: RiskLevel) -> Self {
        let (color, badge) = match level {
            RiskLevel::Minimal => ("#4CAF50", "🟢"),
            RiskLevel::Mild => ("#8BC34A", "🟡"),
            RiskLevel::Moderate => ("#FF9800", "🟠"),
            RiskLevel::Severe => ("#FF5722", "🔴"),
            RiskLevel::Critical => ("#D32F2F", "🚨"),
        };
        Self { color, badge }
    }
}

/// Output of the risk classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// Cumulative pattern + keyword score
    pub score: u32,
    /// Matched crisis-pattern substrings, in match order (audit only)
    pub matched_patterns: Vec<String>,
    /// High-risk keywords found
    pub matched_keywords: Vec<String>,
    pub needs_intervention: bool,
    /// True when the classifier fell back after an internal failure
    pub degraded: bool,
}

impl RiskAssessment {
    /// Build from a score and the evidence that produced it
    pub fn from_evidence(score: u32, matched_patterns: Vec<String>, matched_keywords: Vec<String>) -> Self {
        let level = RiskLevel::from_score(score);
        Self {
            level,
            score,
            matched_patterns,
            matched_keywords,
            needs_intervention: level.needs_intervention(),
            degraded: false,
        }
    }

    /// Fail-safe result after an internal error: never escalates
    pub fn fallback() -> Self {
        Self {
            degraded: true,
            ..Self::from_evidence(0, Vec::new(), Vec::new())
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
