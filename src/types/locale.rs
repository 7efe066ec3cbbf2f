//! Locales with authored rule sets, and the configured locale catalog

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Locale with an authored rule set (lexicon, patterns, templates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Hi,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Hi];

    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
        }
    }

    /// Parse a locale code. Case-insensitive, region suffix ignored (`en-US`).
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = normalize_code(code);
        Self::ALL.into_iter().find(|l| l.code() == primary)
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Lowercase primary subtag: "pt_BR" -> "pt", " EN-us " -> "en"
pub fn normalize_code(code: &str) -> String {
    code.trim()
        .split(|c| c == '-' || c == '_')
        .next()
        .unwrap_or("")
        .to_lowercase()
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleEntry {
    pub code: String,
    pub name: String,
    /// True when a rule set is authored for this code
    pub authored: bool,
}

/// Supported locale codes and their display names.
/// Unknown or unauthored codes resolve to the default locale.
#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    names: BTreeMap<String, String>,
    default: Locale,
}

impl LocaleCatalog {
    pub fn new(names: BTreeMap<String, String>, default: Locale) -> Self {
        let names = names
            .into_iter()
            .map(|(code, name)| (normalize_code(&code), name))
            .collect();
        Self { names, default }
    }

    /// Resolve any requested code to an authored locale
    pub fn resolve(&self, code: &str) -> Locale {
        match Locale::from_code(code) {
            Some(locale) if self.names.contains_key(locale.code()) => locale,
            _ => {
                tracing::debug!(requested = %code, fallback = %self.default, "Locale fallback");
                self.default
            }
        }
    }

    pub fn default_locale(&self) -> Locale {
        self.default
    }

    /// Display name for a code, if configured
    pub fn name(&self, code: &str) -> Option<&str> {
        self.names.get(&normalize_code(code)).map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.names.contains_key(&normalize_code(code))
    }

    /// All entries, sorted by code
    pub fn entries(&self) -> Vec<LocaleEntry> {
        self.names
            .iter()
            .map(|(code, name)| LocaleEntry {
                code: code.clone(),
                name: name.clone(),
                authored: Locale::from_code(code).is_some(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
