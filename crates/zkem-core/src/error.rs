//! # Error Hierarchy
//!
//! Structured error types shared across the workspace, built with
//! `thiserror`. Configuration errors fail fast before any I/O;
//! validation errors surface during input generation and are never
//! silently truncated away.

use thiserror::Error;

use crate::framework::ZkFramework;

/// Top-level error type for the zkem SDK.
#[derive(Error, Debug)]
pub enum ZkemError {
    /// A precondition on blueprint or proof configuration failed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input data violated a declared bound or structural invariant.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration errors, detected synchronously before any network or
/// worker activity.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The blueprint declares no client-side proving framework.
    #[error("blueprint has no client side proving setup")]
    NoClientFramework,

    /// The blueprint declares no server-side proving framework.
    #[error("blueprint has no server side proving setup")]
    NoServerFramework,

    /// A remote proof was constructed without an id or pending result.
    #[error("remote proof requires an id or a pending proof response")]
    MissingProofId,

    /// A local proof was constructed without its proof data.
    #[error("local proof requires proof data at construction")]
    MissingProofData,

    /// A declared external input was not supplied at proving time.
    #[error("external input \"{0}\" was declared but not supplied")]
    MissingExternalInput(String),

    /// The requested framework does not support the requested execution
    /// path.
    #[error("{framework} does not support {path} proving")]
    UnsupportedPath {
        /// The framework that was requested.
        framework: ZkFramework,
        /// The execution path that was requested (`"local"` or `"remote"`).
        path: &'static str,
    },

    /// Local Noir proving requires a pre-initialized backend handle.
    #[error("noir proving requires an initialized backend handle in the prover options")]
    MissingNoirBackend,

    /// Local Circom proving requires a groth16 worker engine handle.
    #[error("circom proving requires a groth16 worker engine in the prover options")]
    MissingCircomBackend,
}

/// Validation errors, raised while turning an email and a blueprint into
/// circuit inputs or while decoding public outputs.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A decomposed regex has an empty name.
    #[error("decomposed regex has an empty name")]
    EmptyRegexName,

    /// A decomposed regex has no fragments.
    #[error("decomposed regex \"{regex}\" has no parts")]
    EmptyParts {
        /// The rule name.
        regex: String,
    },

    /// A decomposed regex declares a zero maximum match length.
    #[error("decomposed regex \"{regex}\" declares maxLength 0")]
    ZeroMaxLength {
        /// The rule name.
        regex: String,
    },

    /// A decomposed regex has no private fragment to anchor the match.
    #[error("decomposed regex \"{regex}\" has no private part with a non-empty pattern")]
    MissingAnchorPart {
        /// The rule name.
        regex: String,
    },

    /// The matched substring exceeds the rule's declared maximum length.
    #[error("match for \"{regex}\" is {length} characters, exceeding maxLength {max_length}")]
    MatchTooLong {
        /// The rule name.
        regex: String,
        /// The actual match length.
        length: usize,
        /// The declared bound.
        max_length: u32,
    },

    /// The email section exceeds the blueprint's declared maximum length.
    #[error("email {section} is {length} bytes, exceeding the declared maximum {max_length}")]
    SectionTooLong {
        /// `"header"` or `"body"`.
        section: &'static str,
        /// The actual section length.
        length: usize,
        /// The declared bound.
        max_length: u32,
    },

    /// A supplied external input value exceeds its declared bound.
    #[error("external input \"{name}\" is {length} bytes, exceeding maxLength {max_length}")]
    ExternalInputTooLong {
        /// The input name.
        name: String,
        /// The supplied value length.
        length: usize,
        /// The declared bound.
        max_length: u32,
    },

    /// An unrecognized framework name arrived from the wire.
    #[error("unknown zk framework \"{0}\"")]
    UnknownFramework(String),
}
