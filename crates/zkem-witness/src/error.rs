//! # Witness Error Types

use thiserror::Error;

use zkem_core::{ConfigError, ValidationError};

/// Errors from proof-input generation.
#[derive(Error, Debug)]
pub enum WitnessError {
    /// A configuration precondition failed (missing external input,
    /// missing framework assignment).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input data violated a declared bound.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The email-parsing primitive rejected the raw email.
    #[error("email parsing failed: {0}")]
    EmailParse(String),

    /// A decomposed-regex fragment is not a valid pattern.
    #[error("invalid pattern for decomposed regex \"{regex}\": {reason}")]
    BadPattern {
        /// The rule name.
        regex: String,
        /// The pattern error.
        reason: String,
    },

    /// The concatenated pattern matched nothing in its location.
    #[error("decomposed regex \"{0}\" matched nothing")]
    NoMatch(String),

    /// A Noir regex has no precompiled graph in blueprint storage.
    #[error("no precompiled regex graph for \"{0}\"; the regex must be compiled ahead of time")]
    MissingRegexGraph(String),

    /// The backend circuit-input primitive failed.
    #[error("circuit input generation failed: {0}")]
    InputGeneration(String),
}
