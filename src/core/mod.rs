//! Core pipeline for Solace

mod emotion;
mod risk;
mod strategy;
mod responder;
mod orchestrator;
mod api;

pub mod lexicon;
pub mod store;
pub mod templates;

pub use emotion::EmotionClassifier;
pub use risk::RiskClassifier;
pub use strategy::{HistoryBlindPolicy, SelectionInput, StrategyDecision, StrategyPolicy};
pub use responder::{FixedPicker, RandomPicker, RenderRequest, RenderedReply, ResponseGenerator, TemplatePicker};
pub use orchestrator::TurnOrchestrator;
pub use store::{ContextStore, InMemoryStore, UnavailableStore};
pub use templates::TemplateCatalog;
pub use api::{create_router, run_server};
