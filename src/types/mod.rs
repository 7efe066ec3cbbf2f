//! Core types for Solace

mod emotion;
mod risk;
mod strategy;
mod locale;
mod output;
mod reason;
mod turn;

pub use emotion::{EmotionCategory, EmotionResult};
pub use risk::{RiskLevel, RiskDisplay, RiskAssessment};
pub use strategy::ResponseStrategy;
pub use locale::{Locale, LocaleCatalog, LocaleEntry, normalize_code};
pub use output::GeneratedResponse;
pub use reason::ReasonCode;
pub use turn::{Author, Turn, ContextWindow, ConversationSignals, UserContext};
