//! # Codec Error Types
//!
//! Decoding public outputs is offset arithmetic over untrusted data;
//! every error carries enough context to locate the bad signal.

use thiserror::Error;

/// Errors from decoding a backend's raw public outputs.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The output array is shorter than the layout requires.
    #[error("public outputs truncated: layout requires at least {expected} signals, got {actual}")]
    TruncatedOutputs {
        /// Signals the layout requires.
        expected: usize,
        /// Signals actually present.
        actual: usize,
    },

    /// A signal could not be parsed as a field element.
    #[error("invalid field element \"{value}\": {reason}")]
    InvalidFieldElement {
        /// The offending signal text.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A byte-valued signal does not fit in one byte.
    #[error("signal \"{0}\" does not encode a single byte")]
    ByteOutOfRange(String),

    /// The decoded string length disagrees with the circuit's asserted
    /// length slot.
    #[error(
        "decoded output for \"{regex}\" has length {decoded} but the length slot asserts {asserted}"
    )]
    LengthMismatch {
        /// The decomposed-regex name.
        regex: String,
        /// Length of the decoded string.
        decoded: usize,
        /// Value of the length slot.
        asserted: usize,
    },

    /// Decoded bytes are not valid UTF-8.
    #[error("decoded output for \"{regex}\" is not valid UTF-8: {reason}")]
    InvalidUtf8 {
        /// The decomposed-regex name.
        regex: String,
        /// The UTF-8 error description.
        reason: String,
    },

    /// The outputs value has the wrong JSON shape for the framework.
    #[error("public outputs have the wrong shape for {framework}: expected {expected}")]
    WrongShape {
        /// The framework being decoded.
        framework: &'static str,
        /// The shape the decoder expected.
        expected: &'static str,
    },

    /// A required field is missing from SP1 structured outputs.
    #[error("sp1 public outputs are missing the \"{0}\" field")]
    MissingField(&'static str),

    /// The pubkey-hash signal does not fit a 32-byte commitment.
    #[error("pubkey hash signal is {0} bytes, expected at most 32")]
    PubkeyHashTooWide(usize),
}
