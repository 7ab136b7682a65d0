//! Startup / validation errors. Gameplay itself has no recoverable runtime
//! errors: invalid input is ignored rather than reported.

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("word bank has {available} distinct items but a round needs {needed}")]
    ExhaustedBank { available: usize, needed: usize },
    #[error("duplicate item id {0} in word bank")]
    DuplicateId(u32),
    #[error("duplicate concept '{0}' in word bank")]
    DuplicateConcept(String),
    #[error("total rounds must be at least 1")]
    NoRounds,
    #[error("round duration must be positive and longer than one tick (got {0}s)")]
    BadRoundDuration(f64),
    #[error("tick interval must be non-zero")]
    ZeroTick,
    #[error("malformed JSON: {0}")]
    Json(String),
}

#[cfg(feature = "serde_json")]
impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
