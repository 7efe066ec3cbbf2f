//! Integration tests for Slice 3 - Turn orchestration
//!
//! Tests end-to-end scenarios, locale fallback, context windows,
//! per-user serialization and persistence failure handling

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use solace::config::SolaceConfig;
use solace::core::{ContextStore, FixedPicker, InMemoryStore, TurnOrchestrator, UnavailableStore};
use solace::error::Result;
use solace::types::{EmotionCategory, Locale, ResponseStrategy, RiskLevel, Turn, UserContext};
use pretty_assertions::assert_eq;

const CRISIS_ACTIONS: [&str; 4] = [
    "Contact emergency services (112) immediately",
    "Go to the nearest hospital emergency room",
    "Call a crisis helpline for immediate support",
    "Stay with trusted individuals - don't be alone",
];

fn orchestrator_with(config: SolaceConfig, store: Arc<dyn ContextStore>) -> TurnOrchestrator {
    TurnOrchestrator::new(config, store)
        .unwrap()
        .with_picker(FixedPicker(0))
}

fn orchestrator() -> TurnOrchestrator {
    orchestrator_with(SolaceConfig::default(), Arc::new(InMemoryStore::default()))
}

/// Store that never answers in time
struct StalledStore;

#[async_trait]
impl ContextStore for StalledStore {
    async fn read_context(&self, _user_id: &str) -> Result<Option<UserContext>> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(None)
    }

    async fn append_turn(&self, _user_id: &str, _turn: &Turn) -> Result<()> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(())
    }

    async fn evict(&self, _user_id: &str) -> Result<bool> {
        Ok(false)
    }

    fn name(&self) -> &'static str {
        "stalled"
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_scenario_crisis() {
    let response = orchestrator().process_turn("u1", "I want to kill myself", "en").await;

    assert_eq!(response.risk_level, RiskLevel::Critical);
    assert!(response.needs_intervention);
    assert_eq!(response.strategy, ResponseStrategy::Crisis);
    assert_eq!(response.strategy_id, "crisis_protocol");
    assert_eq!(response.suggested_actions, CRISIS_ACTIONS);
    assert!(response.persisted);
}

#[tokio::test]
async fn test_scenario_joy() {
    let response = orchestrator()
        .process_turn("u1", "I am so happy today, everything is great", "en")
        .await;

    assert_eq!(response.emotion, EmotionCategory::Joy);
    assert_eq!(response.risk_level, RiskLevel::Minimal);
    assert_eq!(response.strategy, ResponseStrategy::Conversational);
    assert!(!response.needs_intervention);
    assert_eq!(response.suggested_actions.len(), 4);
}

#[tokio::test]
async fn test_scenario_hopeless() {
    let response = orchestrator()
        .process_turn("u1", "I feel hopeless and worthless", "en")
        .await;

    assert_eq!(response.emotion, EmotionCategory::Sadness);
    assert_eq!(response.risk_level, RiskLevel::Moderate);
    assert_eq!(response.strategy, ResponseStrategy::Supportive);
    assert_eq!(
        response.suggested_actions[0],
        "Consider speaking with a mental health professional"
    );
    assert!(response.suggested_actions.len() <= 4);
}

#[tokio::test]
async fn test_anger_with_crisis_is_crisis() {
    let response = orchestrator()
        .process_turn("u1", "I'm so angry and furious, I hate this, I want to die", "en")
        .await;

    assert_eq!(response.emotion, EmotionCategory::Anger);
    assert!(response.needs_intervention);
    assert_eq!(response.strategy, ResponseStrategy::Crisis);
}

#[tokio::test]
async fn test_hindi_crisis() {
    let response = orchestrator()
        .process_turn("u1", "मैं आत्महत्या के बारे में सोच रहा हूँ, मैं मरना चाहता हूँ", "hi")
        .await;

    assert_eq!(response.locale, Locale::Hi);
    assert_eq!(response.strategy, ResponseStrategy::Crisis);
    assert_eq!(response.suggested_actions.len(), 4);
    assert!(response.text.starts_with("friend, "));
}

// =============================================================================
// Locale fallback
// =============================================================================

#[tokio::test]
async fn test_unsupported_locale_matches_default_output() {
    let texts = [
        "I am so happy today, everything is great",
        "I feel hopeless and worthless",
        "I want to kill myself",
        "I'm scared about tomorrow",
    ];
    for requested in ["fr", "xx", "EN-us", "", "zh"] {
        for text in texts {
            let fallback = orchestrator().process_turn("u1", text, requested).await;
            let default = orchestrator().process_turn("u1", text, "en").await;

            assert_eq!(fallback.locale, default.locale);
            assert_eq!(fallback.text, default.text);
            assert_eq!(fallback.suggested_actions, default.suggested_actions);
            assert_eq!(fallback.strategy, default.strategy);
            assert_eq!(fallback.emotion, default.emotion);
            assert_eq!(fallback.risk_level, default.risk_level);
        }
    }
}

#[tokio::test]
async fn test_locale_missing_from_catalog_falls_back() {
    let mut config = SolaceConfig::default();
    config.locales.remove("hi");
    let orch = orchestrator_with(config, Arc::new(InMemoryStore::default()));

    let response = orch.process_turn("u1", "hello", "hi").await;
    assert_eq!(response.locale, Locale::En);
}

// =============================================================================
// Context window
// =============================================================================

#[tokio::test]
async fn test_window_capacity_never_exceeded() {
    let config = SolaceConfig {
        context_capacity: 5,
        ..SolaceConfig::default()
    };
    let orch = orchestrator_with(config, Arc::new(InMemoryStore::new(5)));

    for i in 0..12 {
        orch.process_turn("u1", &format!("message {}", i), "en").await;
        let ctx = orch.context_snapshot("u1").await.unwrap();
        assert!(ctx.window.len() <= 5);
    }

    // FIFO: the newest turns survive
    let ctx = orch.context_snapshot("u1").await.unwrap();
    let ids: Vec<u64> = ctx.window.turns().map(|t| t.id).collect();
    assert_eq!(ids, vec![20, 21, 22, 23, 24]);
    assert_eq!(ctx.window.latest().map(|t| t.is_user()), Some(false));
}

#[tokio::test]
async fn test_session_rehydrates_from_store() {
    let store = Arc::new(InMemoryStore::default());

    let first = orchestrator_with(SolaceConfig::default(), store.clone());
    first.process_turn("u1", "hello", "en").await;
    first.process_turn("u1", "still here", "en").await;
    assert_eq!(store.turn_count("u1"), 4);

    // A fresh process sees the stored history
    let second = orchestrator_with(SolaceConfig::default(), store.clone());
    second.process_turn("u1", "back again", "en").await;

    let ctx = second.context_snapshot("u1").await.unwrap();
    assert_eq!(ctx.window.len(), 6);
    let ids: Vec<u64> = ctx.window.turns().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn test_stored_display_name_used_in_reply() {
    let store = Arc::new(InMemoryStore::default());
    store.insert(UserContext::new("u7", "Meera", Locale::En, 10));

    let orch = orchestrator_with(SolaceConfig::default(), store);
    let response = orch.process_turn("u7", "I feel hopeless and worthless", "en").await;

    assert!(response.text.contains("Meera"));
    assert!(!response.text.contains("friend"));
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_user_turns_are_serialized() {
    let orch = Arc::new(orchestrator_with(
        SolaceConfig {
            context_capacity: 100,
            ..SolaceConfig::default()
        },
        Arc::new(InMemoryStore::new(100)),
    ));

    let mut handles = Vec::new();
    for i in 0..25 {
        let orch = orch.clone();
        handles.push(tokio::spawn(async move {
            orch.process_turn("shared", &format!("message {}", i), "en").await
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let ctx = orch.context_snapshot("shared").await.unwrap();
    let turns: Vec<&Turn> = ctx.window.turns().collect();
    assert_eq!(turns.len(), 50);

    // Every inbound turn is immediately followed by its reply
    for pair in turns.chunks(2) {
        assert!(pair[0].is_user());
        assert!(!pair[1].is_user());
        assert_eq!(pair[1].id, pair[0].id + 1);
    }
    for window in turns.windows(2) {
        assert!(window[1].id > window[0].id);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_different_users_in_parallel() {
    let orch = Arc::new(orchestrator());

    let mut handles = Vec::new();
    for i in 0..20 {
        let orch = orch.clone();
        handles.push(tokio::spawn(async move {
            let user = format!("user-{}", i);
            orch.process_turn(&user, "I feel hopeless and worthless", "en").await
        }));
    }
    for handle in handles {
        let response = handle.await.unwrap();
        assert_eq!(response.strategy, ResponseStrategy::Supportive);
    }
    assert_eq!(orch.active_sessions(), 20);
    assert_eq!(orch.turns_processed(), 20);
}

// =============================================================================
// Persistence failures
// =============================================================================

#[tokio::test]
async fn test_unavailable_store_still_answers() {
    let orch = orchestrator_with(SolaceConfig::default(), Arc::new(UnavailableStore));
    let response = orch.process_turn("u1", "I want to kill myself", "en").await;

    assert!(!response.persisted);
    assert_eq!(response.strategy, ResponseStrategy::Crisis);
    assert_eq!(response.suggested_actions, CRISIS_ACTIONS);
    assert_eq!(orch.persistence_failures(), 3);
}

#[tokio::test]
async fn test_stalled_store_is_bounded_by_timeout() {
    let config = SolaceConfig {
        persistence_timeout_ms: 50,
        ..SolaceConfig::default()
    };
    let orch = orchestrator_with(config, Arc::new(StalledStore));

    let start = Instant::now();
    let response = orch.process_turn("u1", "hello", "en").await;

    assert!(start.elapsed() < Duration::from_secs(2));
    assert!(!response.persisted);
    assert_eq!(orch.persistence_failures(), 3);
    assert!(!response.text.is_empty());
}
