//! Solace: emotion, risk and response-strategy pipeline for support chat
//!
//! text → EmotionClassifier + RiskClassifier → StrategyPolicy → ResponseGenerator
//!
//! Per-user conversation state lives in a bounded context window guarded by
//! one lock per user id. Persistence is a collaborator behind `ContextStore`.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

// =============================================================================
// RISK SCORING [policy]
// =============================================================================

/// Points added for every crisis-pattern match
pub const RISK_POINTS_PATTERN: u32 = 2;

/// Points added for every high-risk keyword present
pub const RISK_POINTS_KEYWORD: u32 = 1;

/// Score thresholds for each risk level
pub const RISK_SCORE_CRITICAL: u32 = 6;
pub const RISK_SCORE_SEVERE: u32 = 4;
pub const RISK_SCORE_MODERATE: u32 = 2;
pub const RISK_SCORE_MILD: u32 = 1;

/// Severity at and above which intervention is required (severe = 4).
/// Policy invariant: do not change without a safety review.
pub const INTERVENTION_SEVERITY: u8 = 4;

// =============================================================================
// EMOTION SCORING
// =============================================================================

/// Confidence contributed per hit, by bucket
pub const EMOTION_WEIGHT_FEAR: f64 = 0.3;
pub const EMOTION_WEIGHT_POSITIVE: f64 = 0.2;
pub const EMOTION_WEIGHT_NEGATIVE: f64 = 0.2;

/// Rule-based classification never claims more than this
pub const EMOTION_CONFIDENCE_CAP: f64 = 0.8;

/// Confidence reported for neutral and fallback results
pub const NEUTRAL_CONFIDENCE: f64 = 0.5;

// =============================================================================
// CONTEXT & RESPONSE
// =============================================================================

/// Default context window capacity (turns)
pub const DEFAULT_CONTEXT_CAPACITY: usize = 10;

/// Upper bound on suggested actions in a response
pub const MAX_SUGGESTED_ACTIONS: usize = 4;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
