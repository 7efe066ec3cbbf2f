//! Runtime configuration
//!
//! Loaded from an optional TOML file; every field has a default. Validation
//! runs once at startup so bad configuration never surfaces at request time.

use std::collections::BTreeMap;
use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SolaceError};
use crate::types::{Locale, LocaleCatalog};
use crate::DEFAULT_CONTEXT_CAPACITY;

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolaceConfig {
    /// Fallback locale code; must have an authored rule set
    pub default_locale: String,
    /// Context window capacity per user
    pub context_capacity: usize,
    /// Longest message text accepted at the HTTP and CLI surfaces
    pub max_input_bytes: usize,
    /// Bound on each persistence collaborator call
    pub persistence_timeout_ms: u64,
    /// Live sessions idle longer than this are dropped from memory
    pub session_idle_minutes: u64,
    /// Name substituted into templates for new users
    pub default_display_name: String,
    /// Supported locale codes and display names
    pub locales: BTreeMap<String, String>,
}

impl Default for SolaceConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            context_capacity: DEFAULT_CONTEXT_CAPACITY,
            max_input_bytes: 64 * 1024,
            persistence_timeout_ms: 500,
            session_idle_minutes: 24 * 60,
            default_display_name: "friend".to_string(),
            locales: default_locales(),
        }
    }
}

fn default_locales() -> BTreeMap<String, String> {
    [
        ("en", "English"),
        ("hi", "हिन्दी"),
        ("ur", "اردو"),
        ("pa", "ਪੰਜਾਬੀ"),
        ("ks", "कॉशुर"),
        ("do", "डोगरी"),
        ("es", "Español"),
        ("fr", "Français"),
        ("de", "Deutsch"),
        ("zh", "中文"),
        ("ja", "日本語"),
        ("ko", "한국어"),
        ("ar", "العربية"),
    ]
    .into_iter()
    .map(|(code, name)| (code.to_string(), name.to_string()))
    .collect()
}

impl SolaceConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reject configurations that would fail at request time
    pub fn validate(&self) -> Result<()> {
        if self.context_capacity == 0 {
            return Err(SolaceError::Config("context_capacity must be at least 1".into()));
        }
        if self.persistence_timeout_ms == 0 {
            return Err(SolaceError::Config("persistence_timeout_ms must be positive".into()));
        }
        if self.max_input_bytes == 0 {
            return Err(SolaceError::Config("max_input_bytes must be positive".into()));
        }
        let default = self.default_locale()?;
        let catalog = self.catalog()?;
        if !catalog.contains(default.code()) {
            return Err(SolaceError::Config(format!(
                "default locale '{}' is not in the locale catalog",
                default
            )));
        }
        Ok(())
    }

    /// Parsed default locale
    pub fn default_locale(&self) -> Result<Locale> {
        Locale::from_code(&self.default_locale).ok_or_else(|| {
            SolaceError::Config(format!(
                "default locale '{}' has no authored rule set",
                self.default_locale
            ))
        })
    }

    /// Build the locale catalog
    pub fn catalog(&self) -> Result<LocaleCatalog> {
        Ok(LocaleCatalog::new(self.locales.clone(), self.default_locale()?))
    }
}

// =============================================================================
// TESTS
// =============================================================================
