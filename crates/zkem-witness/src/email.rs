//! # Email Parsing Seam
//!
//! Splitting a raw `.eml` into the canonicalized header and cleaned body
//! the circuits consume is DKIM-sensitive work (relaxed/simple
//! canonicalization, soft-linebreak removal) owned by the compiled
//! parsing primitive. This module defines the handle the rest of the
//! pipeline depends on.

use crate::error::WitnessError;

/// A raw email parsed into the sections the circuits consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEmail {
    /// The DKIM-canonicalized header.
    pub canonicalized_header: String,
    /// The cleaned body (decoded transfer encoding, optional
    /// soft-linebreak removal already applied).
    pub cleaned_body: String,
    /// The sender domain taken from the DKIM signature, if present.
    pub sender_domain: Option<String>,
}

/// Handle to the email-parsing primitive.
///
/// Initialize once at process start and pass the handle into every
/// operation that needs it; implementations are never torn down for the
/// life of the process.
pub trait EmailParser: Send + Sync {
    /// Parse a raw email into its canonicalized sections.
    ///
    /// # Errors
    ///
    /// [`WitnessError::EmailParse`] if the email is structurally invalid
    /// or its DKIM signature cannot be located.
    fn parse_email(&self, eml: &str) -> Result<ParsedEmail, WitnessError>;
}
