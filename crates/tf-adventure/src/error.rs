//! Error types for the adventure engine.

use thiserror::Error;

use tf_mechanics::MechError;

/// Result type for adventure operations.
pub type AdventureResult<T> = Result<T, AdventureError>;

/// Errors that can occur while running an adventure.
///
/// Victory and defeat are not errors; they are reported as
/// [`Outcome`](crate::session::Outcome) values.
#[derive(Debug, Error)]
pub enum AdventureError {
    /// A mechanics operation failed.
    #[error(transparent)]
    Mechanics(#[from] MechError),

    /// A decision provider answered outside the offered options.
    #[error("choice {choice} is not between 1 and {max}")]
    InvalidChoice {
        /// The answer given (1-based).
        choice: usize,
        /// Number of options offered.
        max: usize,
    },

    /// A scripted decision provider ran out of answers.
    #[error("scripted decisions exhausted")]
    DecisionsExhausted,

    /// The interactive input stream ended.
    #[error("input closed")]
    InputClosed,

    /// Configuration values are out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// I/O failure reading config or writing the journal.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A config file is not valid TOML for [`AdventureConfig`](crate::AdventureConfig).
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The journal could not be serialized.
    #[error("journal serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
