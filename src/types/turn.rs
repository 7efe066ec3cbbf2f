//! Turn model and per-user context window
//!
//! - Turn = one immutable message (user or system) with its classification
//! - Window = last N turns, FIFO eviction at capacity
//! - UserContext = window + per-user rolling state

use std::collections::{HashMap, VecDeque};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::types::{EmotionCategory, Locale, RiskLevel};
use crate::DEFAULT_CONTEXT_CAPACITY;

/// Who wrote a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    System,
}

/// A single message exchange unit. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Monotonic per conversation
    pub id: u64,
    pub author: Author,
    pub text: String,
    pub locale: Locale,
    pub timestamp: DateTime<Utc>,
    pub emotion: Option<EmotionCategory>,
    pub risk: Option<RiskLevel>,
    /// 0.0-1.0
    pub confidence: f64,
}

impl Turn {
    /// Classified user turn
    pub fn user(
        id: u64,
        text: impl Into<String>,
        locale: Locale,
        emotion: EmotionCategory,
        risk: RiskLevel,
        confidence: f64,
    ) -> Self {
        Self {
            id,
            author: Author::User,
            text: text.into(),
            locale,
            timestamp: Utc::now(),
            emotion: Some(emotion),
            risk: Some(risk),
            confidence,
        }
    }

    /// System reply. Carries the risk level of the turn it answers;
    /// emotion is only detected on user turns.
    pub fn system(id: u64, text: impl Into<String>, locale: Locale, risk: RiskLevel) -> Self {
        Self {
            id,
            author: Author::System,
            text: text.into(),
            locale,
            timestamp: Utc::now(),
            emotion: None,
            risk: Some(risk),
            confidence: 0.0,
        }
    }

    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }
}

/// Bounded, append-only turn history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextWindow {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextWindow {
    /// Create window with default capacity (10)
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CONTEXT_CAPACITY)
    }

    /// Create window with custom capacity (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a turn, evicting the oldest once over capacity.
    /// Returns the evicted turn, if any.
    pub fn push(&mut self, turn: Turn) -> Option<Turn> {
        self.turns.push_back(turn);
        if self.turns.len() > self.capacity {
            self.turns.pop_front()
        } else {
            None
        }
    }

    /// Change capacity (minimum 1), dropping the oldest turns that no
    /// longer fit. Returns how many were dropped.
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        self.capacity = capacity.max(1);
        let excess = self.turns.len().saturating_sub(self.capacity);
        self.turns.drain(..excess);
        excess
    }

    /// Get all turns (oldest first)
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn latest(&self) -> Option<&Turn> {
        self.turns.back()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Read-only snapshot for the strategy selector
    pub fn signals(&self) -> ConversationSignals {
        ConversationSignals {
            prior_texts: self.turns.iter().map(|t| t.text.clone()).collect(),
            recent_emotions: self.turns.iter().filter_map(|t| t.emotion).collect(),
            recent_risks: self.turns.iter().filter_map(|t| t.risk).collect(),
        }
    }
}

/// History supplied to the strategy selector. Nulls are discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversationSignals {
    /// Texts of prior turns, oldest first
    pub prior_texts: Vec<String>,
    /// Detected emotions of prior turns, oldest first
    pub recent_emotions: Vec<EmotionCategory>,
    /// Detected risk levels of prior turns, oldest first
    pub recent_risks: Vec<RiskLevel>,
}

impl ConversationSignals {
    /// Most frequent prior emotion; ties go to the most recent
    pub fn dominant_emotion(&self) -> Option<EmotionCategory> {
        let mut counts: HashMap<EmotionCategory, (usize, usize)> = HashMap::new();
        for (i, emotion) in self.recent_emotions.iter().enumerate() {
            let entry = counts.entry(*emotion).or_insert((0, i));
            entry.0 += 1;
            entry.1 = i;
        }
        counts
            .into_iter()
            .max_by_key(|(_, (count, last_seen))| (*count, *last_seen))
            .map(|(emotion, _)| emotion)
    }

    /// Highest prior risk level
    pub fn peak_risk(&self) -> Option<RiskLevel> {
        self.recent_risks.iter().copied().max()
    }

    pub fn is_empty(&self) -> bool {
        self.prior_texts.is_empty()
    }
}

/// Per-user rolling state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    pub user_id: String,
    pub display_name: String,
    pub preferred_locale: Locale,
    pub window: ContextWindow,
    pub last_active: DateTime<Utc>,
    next_turn_id: u64,
}

impl UserContext {
    /// Fresh context for a first-time user
    pub fn new(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        preferred_locale: Locale,
        capacity: usize,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            preferred_locale,
            window: ContextWindow::with_capacity(capacity),
            last_active: Utc::now(),
            next_turn_id: 1,
        }
    }

    /// Reserve the next turn id
    pub fn next_turn_id(&mut self) -> u64 {
        let id = self.next_turn_id;
        self.next_turn_id += 1;
        id
    }

    /// Append a turn and refresh activity. Keeps ids ahead of any
    /// turn restored from the store.
    pub fn append(&mut self, turn: Turn) -> Option<Turn> {
        self.next_turn_id = self.next_turn_id.max(turn.id + 1);
        self.last_active = Utc::now();
        self.window.push(turn)
    }

    /// Minutes since last activity
    pub fn idle_minutes(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.last_active).num_minutes()
    }
}

// =============================================================================
// TESTS
// =============================================================================
