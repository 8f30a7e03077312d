//! # zkem-witness -- Proof-Input Generation
//!
//! Turns a raw email plus a blueprint into the structured input a
//! proving backend consumes. The email-parsing primitive and the
//! circuit-input builder are injected handles: both wrap compiled
//! circuit tooling whose internals this SDK treats as opaque, and both
//! follow an init-once lifecycle: construct the handle at process
//! start, pass it everywhere, and never tear it down.
//!
//! Validation happens here, before any proving work: every declared
//! external input must be supplied, header and body must fit the
//! blueprint's declared bounds, and every Noir regex must have a
//! precompiled graph.

pub mod email;
pub mod error;
pub mod inputs;
pub mod mock;
pub mod noir;

pub use email::{EmailParser, ParsedEmail};
pub use error::WitnessError;
pub use inputs::{
    add_max_length_to_external_inputs, generate_proof_inputs, CircuitInputBuilder,
    CircuitInputParams, ExternalInputWithMax,
};
pub use mock::{MockCircuitInputBuilder, MockEmailParser};
pub use noir::{build_noir_inputs, generate_noir_proof_inputs, NoirRegexInput};
pub use regex_test::test_decomposed_regex;
