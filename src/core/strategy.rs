//! Strategy Selector: (risk, emotion, history) → response strategy
//!
//! Transition table, first match wins:
//! 1. needs_intervention → CRISIS
//! 2. sadness | pessimism → SUPPORTIVE
//! 3. anger → THERAPEUTIC
//! 4. otherwise → CONVERSATIONAL
//!
//! The order is safety policy. Crisis dominates every emotional read.

use crate::types::{
    ConversationSignals, EmotionCategory, ReasonCode, ResponseStrategy, RiskLevel,
};

/// Current-turn classification handed to a policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionInput {
    pub risk_level: RiskLevel,
    pub needs_intervention: bool,
    pub emotion: EmotionCategory,
}

/// A policy decision with its audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyDecision {
    pub strategy: ResponseStrategy,
    pub reason: ReasonCode,
}

impl StrategyDecision {
    pub fn audit_id(&self) -> &'static str {
        self.strategy.audit_id()
    }
}

/// Decision function seam. History is read-only.
pub trait StrategyPolicy: Send + Sync {
    fn select(&self, input: &SelectionInput, history: &ConversationSignals) -> StrategyDecision;

    /// Name for logs
    fn name(&self) -> &'static str;
}

/// Shipped policy: ignores history.
///
/// Whether repeated sadness across turns should escalate is an open
/// question; a history-aware policy plugs in through `StrategyPolicy`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HistoryBlindPolicy;

impl HistoryBlindPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl StrategyPolicy for HistoryBlindPolicy {
    fn select(&self, input: &SelectionInput, _history: &ConversationSignals) -> StrategyDecision {
        let (strategy, reason) = if input.needs_intervention {
            (ResponseStrategy::Crisis, ReasonCode::S001_CRISIS_OVERRIDE)
        } else {
            match input.emotion {
                EmotionCategory::Sadness | EmotionCategory::Pessimism => {
                    (ResponseStrategy::Supportive, ReasonCode::S002_NEGATIVE_AFFECT)
                }
                EmotionCategory::Anger => (ResponseStrategy::Therapeutic, ReasonCode::S003_ANGER),
                _ => (ResponseStrategy::Conversational, ReasonCode::S004_DEFAULT),
            }
        };
        StrategyDecision { strategy, reason }
    }

    fn name(&self) -> &'static str {
        "history_blind"
    }
}

// =============================================================================
// TESTS
// =============================================================================
