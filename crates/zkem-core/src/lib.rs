#![deny(missing_docs)]

//! # zkem-core -- Foundational Types for the zkem SDK
//!
//! This crate defines the types that every other crate in the workspace
//! depends on. It has no internal crate dependencies, only `serde`,
//! `serde_json`, `thiserror`, and `uuid` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **[`ZkFramework`] is a closed sum type.** One definition, three
//!    variants (Circom, SP1, Noir), exhaustive `match` everywhere. Adding
//!    a proving backend is a compile-time-checked extension, not a
//!    string-keyed conditional.
//!
//! 2. **[`ProofStatus`] transitions are one-way.** `InProgress → Done` and
//!    `InProgress → Failed` are the only legal transitions; both targets
//!    are terminal.
//!
//! 3. **Decomposed regexes validate at the boundary.** A
//!    [`DecomposedRegex`] without a private anchor part is rejected before
//!    any proving work starts.
//!
//! 4. **Structured errors with `thiserror`.** No `Box<dyn Error>`, no
//!    `.unwrap()` outside tests.

pub mod blueprint;
pub mod error;
pub mod framework;
pub mod regex;
pub mod status;

// Re-export primary types at crate root for ergonomic imports.
pub use blueprint::{BlueprintProps, ExternalInput, ExternalInputValue};
pub use error::{ConfigError, ValidationError, ZkemError};
pub use framework::ZkFramework;
pub use regex::{DecomposedRegex, RegexLocation, RegexPart};
pub use status::ProofStatus;
