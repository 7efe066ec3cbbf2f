//! Response Generator: templated reply + ranked suggested actions
//!
//! Template choice goes through `TemplatePicker` so tests can pin it.

use std::sync::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::templates::{render, TemplateCatalog};
use crate::types::{EmotionCategory, Locale, ReasonCode, ResponseStrategy, RiskLevel};
use crate::MAX_SUGGESTED_ACTIONS;

/// Source of template indices
pub trait TemplatePicker: Send {
    /// Index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform random picker backed by `StdRng`
#[derive(Debug)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    /// Seeded from OS entropy (production)
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Reproducible sequence
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl TemplatePicker for RandomPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Always returns the same index (wrapped into range)
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl TemplatePicker for FixedPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.0 % len
    }
}

/// What the generator needs to know about the turn
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub strategy: ResponseStrategy,
    pub locale: Locale,
    pub display_name: &'a str,
    pub emotion: EmotionCategory,
    pub risk_level: RiskLevel,
}

/// Rendered reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReply {
    pub text: String,
    pub suggested_actions: Vec<String>,
    /// Set when no template existed and the fixed message was used
    pub fallback: Option<ReasonCode>,
}

/// Picks and renders templates, builds suggestion lists
pub struct ResponseGenerator {
    catalog: TemplateCatalog,
    picker: Mutex<Box<dyn TemplatePicker>>,
}

impl std::fmt::Debug for ResponseGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseGenerator")
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl ResponseGenerator {
    pub fn new(catalog: TemplateCatalog, picker: Box<dyn TemplatePicker>) -> Self {
        Self {
            catalog,
            picker: Mutex::new(picker),
        }
    }

    /// Production generator with an entropy-seeded picker
    pub fn with_random(catalog: TemplateCatalog) -> Self {
        Self::new(catalog, Box::new(RandomPicker::from_entropy()))
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Render text and actions for a turn
    pub fn generate(&self, req: &RenderRequest<'_>) -> RenderedReply {
        let templates = self.catalog.templates(req.locale, req.strategy);

        let (text, fallback) = if templates.is_empty() {
            tracing::error!(
                locale = %req.locale,
                strategy = req.strategy.audit_id(),
                "No template available, using fixed fallback message"
            );
            (
                self.catalog.fallback_message(req.locale).to_string(),
                Some(ReasonCode::F003_TEMPLATE_FALLBACK),
            )
        } else {
            let index = {
                let mut picker = self.picker.lock().unwrap_or_else(|e| e.into_inner());
                picker.pick(templates.len()).min(templates.len() - 1)
            };
            (render(templates[index], req.display_name), None)
        };

        RenderedReply {
            text,
            suggested_actions: self.suggested_actions(req.locale, req.emotion, req.risk_level),
            fallback,
        }
    }

    /// Ranked suggestions, at most 4.
    ///
    /// - intervention: the fixed crisis list replaces everything
    /// - moderate: professional support is prepended
    pub fn suggested_actions(&self, locale: Locale, emotion: EmotionCategory, risk_level: RiskLevel) -> Vec<String> {
        if risk_level.needs_intervention() {
            return self
                .catalog
                .crisis_actions(locale)
                .iter()
                .take(MAX_SUGGESTED_ACTIONS)
                .map(|a| a.to_string())
                .collect();
        }

        let mut actions: Vec<String> = Vec::with_capacity(MAX_SUGGESTED_ACTIONS + 1);
        if risk_level == RiskLevel::Moderate {
            actions.push(self.catalog.professional_support(locale).to_string());
        }
        actions.extend(
            self.catalog
                .emotion_actions(locale, emotion)
                .iter()
                .map(|a| a.to_string()),
        );
        actions.truncate(MAX_SUGGESTED_ACTIONS);
        actions
    }
}

// =============================================================================
// TESTS
// =============================================================================
