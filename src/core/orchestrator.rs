//! Turn Orchestrator: one call per user message
//!
//! resolve locale → lock user → hydrate → classify → append inbound
//! → select strategy → generate → append outbound → persist
//!
//! Turns for the same user are serialized by a per-user async lock; turns
//! for different users never contend. Store calls run inside the user's
//! critical section but are bounded by `persistence_timeout_ms`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::config::SolaceConfig;
use crate::core::emotion::EmotionClassifier;
use crate::core::lexicon;
use crate::core::responder::{RenderRequest, ResponseGenerator, TemplatePicker};
use crate::core::risk::RiskClassifier;
use crate::core::store::ContextStore;
use crate::core::strategy::{HistoryBlindPolicy, SelectionInput, StrategyPolicy};
use crate::core::templates::TemplateCatalog;
use crate::error::{Result, SolaceError};
use crate::types::{GeneratedResponse, LocaleCatalog, Locale, ReasonCode, Turn, UserContext};

/// Live session slot. `None` until hydrated from the store.
type SessionSlot = Arc<Mutex<Option<UserContext>>>;

/// Pipeline driver. Share behind an `Arc`.
pub struct TurnOrchestrator {
    config: SolaceConfig,
    locales: LocaleCatalog,
    emotion: EmotionClassifier,
    risk: RiskClassifier,
    policy: Box<dyn StrategyPolicy>,
    generator: ResponseGenerator,
    store: Arc<dyn ContextStore>,
    sessions: DashMap<String, SessionSlot>,
    persistence_failures: AtomicU64,
    turns_processed: AtomicU64,
}

impl std::fmt::Debug for TurnOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnOrchestrator")
            .field("policy", &self.policy.name())
            .field("store", &self.store.name())
            .field("sessions", &self.sessions.len())
            .finish_non_exhaustive()
    }
}

impl TurnOrchestrator {
    /// Validate configuration and rule tables, then build the pipeline.
    ///
    /// # Errors
    ///
    /// Returns `SolaceError::Config` if the configuration, the lexicon or
    /// the template tables for the default locale are unusable.
    pub fn new(config: SolaceConfig, store: Arc<dyn ContextStore>) -> Result<Self> {
        config.validate()?;
        lexicon::validate()?;
        let default = config.default_locale()?;
        let locales = config.catalog()?;
        let templates = TemplateCatalog::load(default)?;

        tracing::info!(
            default_locale = %default,
            locales = locales.len(),
            context_capacity = config.context_capacity,
            store = store.name(),
            "Orchestrator ready"
        );

        Ok(Self {
            emotion: EmotionClassifier::new(),
            risk: RiskClassifier::new(),
            policy: Box::new(HistoryBlindPolicy::new()),
            generator: ResponseGenerator::with_random(templates),
            locales,
            store,
            config,
            sessions: DashMap::new(),
            persistence_failures: AtomicU64::new(0),
            turns_processed: AtomicU64::new(0),
        })
    }

    /// Replace the strategy policy
    pub fn with_policy(mut self, policy: impl StrategyPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Replace the template picker (deterministic output in tests)
    pub fn with_picker(mut self, picker: impl TemplatePicker + 'static) -> Self {
        let templates = self.generator.catalog().clone();
        self.generator = ResponseGenerator::new(templates, Box::new(picker));
        self
    }

    pub fn config(&self) -> &SolaceConfig {
        &self.config
    }

    pub fn locales(&self) -> &LocaleCatalog {
        &self.locales
    }

    /// Store calls that failed or timed out since startup
    pub fn persistence_failures(&self) -> u64 {
        self.persistence_failures.load(Ordering::Relaxed)
    }

    pub fn turns_processed(&self) -> u64 {
        self.turns_processed.load(Ordering::Relaxed)
    }

    /// Sessions currently held in memory
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Process one user message. Always returns a response.
    pub async fn process_turn(&self, user_id: &str, text: &str, locale: &str) -> GeneratedResponse {
        let start = Instant::now();
        let locale = self.locales.resolve(locale);

        let slot = self.session(user_id);
        let mut guard = slot.lock().await;
        if guard.is_none() {
            *guard = Some(self.hydrate(user_id, locale).await);
        }
        let context = guard.get_or_insert_with(|| self.fresh_context(user_id, locale));
        context.preferred_locale = locale;

        // Pure and independent of each other
        let emotion = self.emotion.classify(text, locale);
        let risk = self.risk.classify(text, locale);
        let degraded = emotion.degraded || risk.degraded;
        if degraded {
            tracing::warn!(
                user_id,
                text_len = text.len(),
                locale = %locale,
                reason = ReasonCode::F001_CLASSIFIER_FALLBACK.code(),
                "Turn answered with fail-safe classification"
            );
        }

        // History as it stood before this turn
        let history = context.window.signals();

        let inbound = Turn::user(
            context.next_turn_id(),
            text,
            locale,
            emotion.emotion,
            risk.level,
            emotion.confidence,
        );
        context.append(inbound.clone());

        let decision = self.policy.select(
            &SelectionInput {
                risk_level: risk.level,
                needs_intervention: risk.needs_intervention,
                emotion: emotion.emotion,
            },
            &history,
        );

        let reply = self.generator.generate(&RenderRequest {
            strategy: decision.strategy,
            locale,
            display_name: &context.display_name,
            emotion: emotion.emotion,
            risk_level: risk.level,
        });

        let outbound = Turn::system(context.next_turn_id(), reply.text.clone(), locale, risk.level);
        context.append(outbound.clone());

        let inbound_saved = self.persist(user_id, &inbound).await;
        let outbound_saved = self.persist(user_id, &outbound).await;
        drop(guard);

        self.turns_processed.fetch_add(1, Ordering::Relaxed);
        let processing_ms = start.elapsed().as_secs_f64() * 1000.0;

        tracing::info!(
            user_id,
            text_len = text.len(),
            locale = %locale,
            emotion = %emotion.emotion,
            risk_level = %risk.level,
            strategy = decision.audit_id(),
            policy = self.policy.name(),
            reason = decision.reason.code(),
            processing_ms,
            "Turn processed"
        );

        GeneratedResponse {
            text: reply.text,
            emotion: emotion.emotion,
            confidence: emotion.confidence,
            risk_level: risk.level,
            risk_score: risk.score,
            needs_intervention: risk.needs_intervention,
            strategy: decision.strategy,
            strategy_id: decision.audit_id().to_string(),
            reason: reply.fallback.unwrap_or(decision.reason),
            suggested_actions: reply.suggested_actions,
            locale,
            processing_ms,
            timestamp: Utc::now(),
            degraded,
            persisted: inbound_saved && outbound_saved,
        }
    }

    /// Copy of a live session's context, if it is in memory
    pub async fn context_snapshot(&self, user_id: &str) -> Option<UserContext> {
        let slot = self.sessions.get(user_id).map(|s| Arc::clone(s.value()))?;
        let guard = slot.lock().await;
        guard.clone()
    }

    /// Drop in-memory sessions idle past `session_idle_minutes`.
    /// Sessions in use are kept. The store is not touched.
    pub fn evict_idle(&self) -> usize {
        self.evict_idle_at(Utc::now())
    }

    /// `evict_idle` against an explicit clock
    pub fn evict_idle_at(&self, now: DateTime<Utc>) -> usize {
        let limit = i64::try_from(self.config.session_idle_minutes).unwrap_or(i64::MAX);
        let before = self.sessions.len();

        self.sessions.retain(|_, slot| {
            // Another task holds a handle: in use
            if Arc::strong_count(slot) > 1 {
                return true;
            }
            match slot.try_lock() {
                Ok(guard) => match guard.as_ref() {
                    Some(ctx) => ctx.idle_minutes(now) <= limit,
                    None => false,
                },
                Err(_) => true,
            }
        });

        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            tracing::info!(evicted, remaining = self.sessions.len(), "Evicted idle sessions");
        }
        evicted
    }

    fn session(&self, user_id: &str) -> SessionSlot {
        let entry = self
            .sessions
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(None)));
        Arc::clone(entry.value())
    }

    fn fresh_context(&self, user_id: &str, locale: Locale) -> UserContext {
        UserContext::new(
            user_id,
            self.config.default_display_name.clone(),
            locale,
            self.config.context_capacity,
        )
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.config.persistence_timeout_ms)
    }

    /// Load a stored context; missing or failing store gives a fresh one
    async fn hydrate(&self, user_id: &str, locale: Locale) -> UserContext {
        let result = tokio::time::timeout(self.timeout(), self.store.read_context(user_id))
            .await
            .unwrap_or(Err(SolaceError::StoreTimeout(self.config.persistence_timeout_ms)));

        match result {
            Ok(Some(mut stored)) => {
                // Stored history follows this process's configuration
                let dropped = stored.window.set_capacity(self.config.context_capacity);
                if stored.display_name.trim().is_empty() {
                    stored.display_name = self.config.default_display_name.clone();
                }
                tracing::debug!(user_id, turns = stored.window.len(), dropped, "Session restored");
                stored
            }
            Ok(None) => self.fresh_context(user_id, locale),
            Err(e) => {
                self.persistence_failures.fetch_add(1, Ordering::Relaxed);
                tracing::error!(
                    user_id,
                    store = self.store.name(),
                    error = %e,
                    "Context read failed, starting fresh"
                );
                self.fresh_context(user_id, locale)
            }
        }
    }

    /// Hand a turn to the store. Returns whether it was accepted.
    async fn persist(&self, user_id: &str, turn: &Turn) -> bool {
        let result = tokio::time::timeout(self.timeout(), self.store.append_turn(user_id, turn))
            .await
            .unwrap_or(Err(SolaceError::StoreTimeout(self.config.persistence_timeout_ms)));

        match result {
            Ok(()) => true,
            Err(e) => {
                self.persistence_failures.fetch_add(1, Ordering::Relaxed);
                tracing::error!(
                    user_id,
                    turn_id = turn.id,
                    store = self.store.name(),
                    reason = ReasonCode::F002_PERSISTENCE_FAILED.code(),
                    error = %e,
                    "Turn not persisted"
                );
                false
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::responder::FixedPicker;
    use crate::core::store::{InMemoryStore, UnavailableStore};
    use crate::types::{EmotionCategory, ResponseStrategy, RiskLevel};

    fn orchestrator() -> TurnOrchestrator {
        TurnOrchestrator::new(SolaceConfig::default(), Arc::new(InMemoryStore::default()))
            .unwrap()
            .with_picker(FixedPicker(0))
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let config = SolaceConfig {
            context_capacity: 0,
            ..SolaceConfig::default()
        };
        let result = TurnOrchestrator::new(config, Arc::new(InMemoryStore::default()));
        assert!(matches!(result, Err(SolaceError::Config(_))));
    }

    #[tokio::test]
    async fn test_default_without_templates_rejected() {
        let config = SolaceConfig {
            default_locale: "hi".to_string(),
            ..SolaceConfig::default()
        };
        let result = TurnOrchestrator::new(config, Arc::new(InMemoryStore::default()));
        assert!(matches!(result, Err(SolaceError::Config(_))));
    }

    #[tokio::test]
    async fn test_turn_appends_two_turns() {
        let orch = orchestrator();
        let response = orch.process_turn("u1", "hello there", "en").await;
        assert!(response.persisted);

        let ctx = orch.context_snapshot("u1").await.unwrap();
        assert_eq!(ctx.window.len(), 2);
        let turns: Vec<&Turn> = ctx.window.turns().collect();
        assert!(turns[0].is_user());
        assert!(!turns[1].is_user());
        assert_eq!(turns[1].text, response.text);
    }

    #[tokio::test]
    async fn test_outbound_turn_carries_inbound_risk() {
        let orch = orchestrator();
        let response = orch.process_turn("u1", "I want to kill myself", "en").await;
        assert_eq!(response.risk_level, RiskLevel::Critical);

        let ctx = orch.context_snapshot("u1").await.unwrap();
        for turn in ctx.window.turns() {
            assert_eq!(turn.risk, Some(RiskLevel::Critical));
        }
    }

    #[tokio::test]
    async fn test_long_message_is_fully_classified() {
        let orch = orchestrator();
        let text = format!("{} I want to kill myself", "I had a long day. ".repeat(1000));
        assert!(text.len() > 16 * 1024);

        let response = orch.process_turn("u1", &text, "en").await;
        assert!(!response.degraded);
        assert_eq!(response.risk_level, RiskLevel::Critical);
        assert!(response.needs_intervention);
        assert_eq!(response.strategy, ResponseStrategy::Crisis);
    }

    #[tokio::test]
    async fn test_one_emotion_per_user_turn() {
        let orch = orchestrator();
        orch.process_turn("u1", "I feel sad", "en").await;

        let signals = orch.context_snapshot("u1").await.unwrap().window.signals();
        assert_eq!(signals.recent_emotions, vec![EmotionCategory::Sadness]);
        assert_eq!(signals.recent_risks.len(), 2);

        orch.process_turn("u1", "I am so happy today", "en").await;
        let signals = orch.context_snapshot("u1").await.unwrap().window.signals();
        assert_eq!(
            signals.recent_emotions,
            vec![EmotionCategory::Sadness, EmotionCategory::Joy]
        );
    }

    #[tokio::test]
    async fn test_restored_session_follows_config() {
        let config = SolaceConfig {
            context_capacity: 3,
            default_display_name: "Asha".to_string(),
            ..SolaceConfig::default()
        };
        let store = Arc::new(InMemoryStore::default());
        let orch = TurnOrchestrator::new(config, store.clone())
            .unwrap()
            .with_picker(FixedPicker(0));

        for _ in 0..5 {
            orch.process_turn("u1", "hello", "en").await;
        }
        assert_eq!(store.turn_count("u1"), 10);
        assert_eq!(orch.evict_idle_at(Utc::now() + chrono::Duration::days(3)), 1);

        let response = orch.process_turn("u1", "hello", "en").await;
        assert!(response.text.contains("Asha"), "reply was '{}'", response.text);
        assert!(!response.text.contains("friend"));

        let ctx = orch.context_snapshot("u1").await.unwrap();
        assert_eq!(ctx.window.capacity(), 3);
        assert_eq!(ctx.window.len(), 3);
        assert_eq!(ctx.display_name, "Asha");
        // Oldest stored turns were dropped, ids keep counting
        let ids: Vec<u64> = ctx.window.turns().map(|t| t.id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[tokio::test]
    async fn test_store_failure_is_soft() {
        let orch = TurnOrchestrator::new(SolaceConfig::default(), Arc::new(UnavailableStore))
            .unwrap()
            .with_picker(FixedPicker(0));
        let response = orch.process_turn("u1", "hello", "en").await;
        assert!(!response.persisted);
        assert!(!response.text.is_empty());
        // read + two appends
        assert_eq!(orch.persistence_failures(), 3);

        // Session stays live in memory
        let ctx = orch.context_snapshot("u1").await.unwrap();
        assert_eq!(ctx.window.len(), 2);
    }

    #[tokio::test]
    async fn test_evict_idle() {
        let orch = orchestrator();
        orch.process_turn("u1", "hello", "en").await;
        orch.process_turn("u2", "hello", "en").await;
        assert_eq!(orch.active_sessions(), 2);

        assert_eq!(orch.evict_idle(), 0);

        let later = Utc::now() + chrono::Duration::days(2);
        assert_eq!(orch.evict_idle_at(later), 2);
        assert_eq!(orch.active_sessions(), 0);
    }

    #[tokio::test]
    async fn test_session_in_use_not_evicted() {
        let orch = orchestrator();
        orch.process_turn("u1", "hello", "en").await;
        let held = orch.session("u1");
        let later = Utc::now() + chrono::Duration::days(2);
        assert_eq!(orch.evict_idle_at(later), 0);
        drop(held);
        assert_eq!(orch.evict_idle_at(later), 1);
    }
}
