//! Reason codes for strategy decisions and safety-relevant fallbacks

use serde::{Deserialize, Serialize};

/// Reason codes recorded with every decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // S00x: Strategy selection
    // =========================================================================
    /// Risk level requires intervention, crisis overrides emotion
    S001_CRISIS_OVERRIDE,
    /// Sadness or pessimism detected
    S002_NEGATIVE_AFFECT,
    /// Anger detected
    S003_ANGER,
    /// Nothing else matched
    S004_DEFAULT,

    // =========================================================================
    // F00x: Fallbacks
    // =========================================================================
    /// Detector hit an internal error, fail-safe result used
    F001_CLASSIFIER_FALLBACK,
    /// Persistence collaborator failed or timed out
    F002_PERSISTENCE_FAILED,
    /// No authored template, fixed fallback message used
    F003_TEMPLATE_FALLBACK,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::S001_CRISIS_OVERRIDE => "S001_CRISIS_OVERRIDE",
            Self::S002_NEGATIVE_AFFECT => "S002_NEGATIVE_AFFECT",
            Self::S003_ANGER => "S003_ANGER",
            Self::S004_DEFAULT => "S004_DEFAULT",
            Self::F001_CLASSIFIER_FALLBACK => "F001_CLASSIFIER_FALLBACK",
            Self::F002_PERSISTENCE_FAILED => "F002_PERSISTENCE_FAILED",
            Self::F003_TEMPLATE_FALLBACK => "F003_TEMPLATE_FALLBACK",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::S001_CRISIS_OVERRIDE => "Intervention required",
            Self::S002_NEGATIVE_AFFECT => "Negative affect, empathy first",
            Self::S003_ANGER => "Anger, de-escalation",
            Self::S004_DEFAULT => "Conversational default",
            Self::F001_CLASSIFIER_FALLBACK => "Classifier fell back to safe default",
            Self::F002_PERSISTENCE_FAILED => "Turn not persisted",
            Self::F003_TEMPLATE_FALLBACK => "Fixed fallback message used",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
