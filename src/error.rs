//! Error types for the Solace pipeline.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum SolaceError {
    /// Invalid configuration or rule tables. Fatal at startup.
    #[error("config error: {0}")]
    Config(String),

    /// Detector failure. Recovered locally with a fail-safe default.
    #[error("classification error: {0}")]
    Classification(String),

    /// Persistence collaborator reported a failure.
    #[error("store error: {0}")]
    Store(String),

    /// Persistence collaborator did not answer in time.
    #[error("store timed out after {0} ms")]
    StoreTimeout(u64),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, SolaceError>;
