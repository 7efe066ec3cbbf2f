//! Persistence collaborator for per-user context
//!
//! The orchestrator reads a user's context once when a session is first
//! seen and appends every turn afterwards. Store failures never fail a turn.

use std::sync::Arc;
use async_trait::async_trait;
use dashmap::DashMap;

use crate::config::SolaceConfig;
use crate::error::{Result, SolaceError};
use crate::types::{Turn, UserContext};
use crate::DEFAULT_CONTEXT_CAPACITY;

/// Durable home of user contexts
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// Stored context for a user, if any
    async fn read_context(&self, user_id: &str) -> Result<Option<UserContext>>;

    /// Append one turn to a user's stored history
    async fn append_turn(&self, user_id: &str, turn: &Turn) -> Result<()>;

    /// Forget a user. Returns whether anything was stored.
    async fn evict(&self, user_id: &str) -> Result<bool>;

    /// Name for logs
    fn name(&self) -> &'static str;
}

/// Process-local store. Keeps at most `capacity` turns per user.
///
/// Histories first seen through `append_turn` carry no display name; the
/// orchestrator fills in its configured default when restoring them.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    contexts: Arc<DashMap<String, UserContext>>,
    capacity: usize,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_CAPACITY)
    }
}

impl InMemoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            contexts: Arc::new(DashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Store sized to the configured context window
    pub fn from_config(config: &SolaceConfig) -> Self {
        Self::new(config.context_capacity)
    }

    /// Seed a context directly (restores, tests)
    pub fn insert(&self, context: UserContext) {
        self.contexts.insert(context.user_id.clone(), context);
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Number of turns stored for a user
    pub fn turn_count(&self, user_id: &str) -> usize {
        self.contexts
            .get(user_id)
            .map(|ctx| ctx.window.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl ContextStore for InMemoryStore {
    async fn read_context(&self, user_id: &str) -> Result<Option<UserContext>> {
        Ok(self.contexts.get(user_id).map(|ctx| ctx.value().clone()))
    }

    async fn append_turn(&self, user_id: &str, turn: &Turn) -> Result<()> {
        let mut entry = self.contexts.entry(user_id.to_string()).or_insert_with(|| {
            UserContext::new(user_id, String::new(), turn.locale, self.capacity)
        });
        entry.append(turn.clone());
        Ok(())
    }

    async fn evict(&self, user_id: &str) -> Result<bool> {
        Ok(self.contexts.remove(user_id).is_some())
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}

/// Store that rejects every call. Exercises the degraded path.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

#[async_trait]
impl ContextStore for UnavailableStore {
    async fn read_context(&self, _user_id: &str) -> Result<Option<UserContext>> {
        Err(SolaceError::Store("store unavailable".into()))
    }

    async fn append_turn(&self, _user_id: &str, _turn: &Turn) -> Result<()> {
        Err(SolaceError::Store("store unavailable".into()))
    }

    async fn evict(&self, _user_id: &str) -> Result<bool> {
        Err(SolaceError::Store("store unavailable".into()))
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EmotionCategory, Locale, RiskLevel};

    fn turn(id: u64) -> Turn {
        Turn::user(id, "hello", Locale::En, EmotionCategory::Neutral, RiskLevel::Minimal, 0.5)
    }

    #[tokio::test]
    async fn test_append_and_read() {
        let store = InMemoryStore::new(3);
        assert!(store.read_context("u1").await.unwrap().is_none());

        store.append_turn("u1", &turn(1)).await.unwrap();
        store.append_turn("u1", &turn(2)).await.unwrap();

        let ctx = store.read_context("u1").await.unwrap().unwrap();
        assert_eq!(ctx.window.len(), 2);
        assert_eq!(ctx.user_id, "u1");
        // No profile is invented for histories
        assert_eq!(ctx.display_name, "");
    }

    #[test]
    fn test_from_config_uses_context_capacity() {
        let config = SolaceConfig {
            context_capacity: 3,
            ..SolaceConfig::default()
        };
        let store = InMemoryStore::from_config(&config);
        assert_eq!(store.capacity, 3);
    }

    #[tokio::test]
    async fn test_capacity_bounded() {
        let store = InMemoryStore::new(2);
        for id in 1..=5 {
            store.append_turn("u1", &turn(id)).await.unwrap();
        }
        assert_eq!(store.turn_count("u1"), 2);
        let ctx = store.read_context("u1").await.unwrap().unwrap();
        let ids: Vec<u64> = ctx.window.turns().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 5]);
    }

    #[tokio::test]
    async fn test_evict() {
        let store = InMemoryStore::default();
        store.append_turn("u1", &turn(1)).await.unwrap();
        assert!(store.evict("u1").await.unwrap());
        assert!(!store.evict("u1").await.unwrap());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_insert_seeds_context() {
        let store = InMemoryStore::default();
        let mut ctx = UserContext::new("u9", "Meera", Locale::Hi, 4);
        ctx.append(turn(7));
        store.insert(ctx);

        let restored = store.read_context("u9").await.unwrap().unwrap();
        assert_eq!(restored.display_name, "Meera");
        assert_eq!(restored.preferred_locale, Locale::Hi);
        assert_eq!(store.len(), 1);
        assert_eq!(store.turn_count("u9"), 1);
    }

    #[tokio::test]
    async fn test_unavailable_store_errors() {
        let store = UnavailableStore;
        assert!(matches!(store.read_context("u1").await, Err(SolaceError::Store(_))));
        assert!(store.append_turn("u1", &turn(1)).await.is_err());
    }
}
