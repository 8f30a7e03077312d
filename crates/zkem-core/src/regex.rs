//! # Decomposed Regex Model
//!
//! A decomposed regex is one named extraction rule over an email: an
//! ordered sequence of regex fragments whose concatenation must match a
//! contiguous substring of the chosen location (header or body). Only the
//! fragments marked public reveal their matched text in the proof.
//!
//! ## Validation
//!
//! At least one part must be private (`is_public = false`) with a
//! non-empty pattern; that part anchors the match location. A rule with
//! no anchor would let the prover place the match anywhere, so it is
//! rejected at validation time, before any proving work starts.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Where a decomposed regex matches within the email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegexLocation {
    /// The canonicalized email header.
    Header,
    /// The cleaned email body.
    Body,
}

impl std::fmt::Display for RegexLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Header => f.write_str("header"),
            Self::Body => f.write_str("body"),
        }
    }
}

/// One fragment of a decomposed regex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegexPart {
    /// Whether the text matched by this fragment is revealed in the proof.
    pub is_public: bool,
    /// The regex pattern for this fragment.
    pub regex_def: String,
    /// Optional per-part maximum match length. The first part carrying a
    /// positive value bounds the whole rule's match during Noir input
    /// generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

/// A named extraction rule: an ordered sequence of public/private regex
/// fragments over one location of the email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecomposedRegex {
    /// Rule name, unique within its blueprint. Keys the decoded output map.
    pub name: String,
    /// Whether the rule matches the header or the body.
    pub location: RegexLocation,
    /// Maximum length of the full matched substring, in characters.
    pub max_length: u32,
    /// Whether the revealed value is a hash commitment rather than the
    /// matched text itself.
    #[serde(default)]
    pub is_hashed: bool,
    /// The ordered fragments. Concatenated in order they form the full
    /// pattern.
    pub parts: Vec<RegexPart>,
}

impl DecomposedRegex {
    /// Validate the structural invariants of this rule.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyRegexName`] if `name` is empty.
    /// - [`ValidationError::EmptyParts`] if there are no fragments.
    /// - [`ValidationError::ZeroMaxLength`] if `max_length` is zero.
    /// - [`ValidationError::MissingAnchorPart`] if no private fragment
    ///   with a non-empty pattern exists.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyRegexName);
        }
        if self.parts.is_empty() {
            return Err(ValidationError::EmptyParts {
                regex: self.name.clone(),
            });
        }
        if self.max_length == 0 {
            return Err(ValidationError::ZeroMaxLength {
                regex: self.name.clone(),
            });
        }
        let has_anchor = self
            .parts
            .iter()
            .any(|p| !p.is_public && !p.regex_def.is_empty());
        if !has_anchor {
            return Err(ValidationError::MissingAnchorPart {
                regex: self.name.clone(),
            });
        }
        Ok(())
    }

    /// The full pattern: all fragments concatenated in order.
    pub fn full_pattern(&self) -> String {
        self.parts.iter().map(|p| p.regex_def.as_str()).collect()
    }

    /// The fragments revealed by the proof, in part order.
    pub fn public_parts(&self) -> impl Iterator<Item = &RegexPart> {
        self.parts.iter().filter(|p| p.is_public)
    }

    /// The match-length bound used for Noir input generation: the
    /// `max_length` of the first fragment that declares a positive one.
    pub fn first_part_max_length(&self) -> Option<u32> {
        self.parts
            .iter()
            .find_map(|p| p.max_length.filter(|&len| len > 0))
    }
}
