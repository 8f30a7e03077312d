//! # Noir Input Construction
//!
//! Noir circuits match decomposed regexes with precompiled DFA graphs
//! rather than compiling patterns at proving time. Each regex pairs its
//! graph (fetched from blueprint-associated storage) with the haystack
//! it matches over and the applicable length bounds. A regex without a
//! precompiled graph cannot be proven; that is a hard failure here,
//! not something to paper over at proving time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use zkem_core::{BlueprintProps, ExternalInputValue, RegexLocation};

use crate::email::{EmailParser, ParsedEmail};
use crate::error::WitnessError;
use crate::inputs::{add_max_length_to_external_inputs, ExternalInputWithMax};

/// One decomposed regex prepared for the Noir witness generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoirRegexInput {
    /// The decomposed-regex name.
    pub name: String,
    /// The precompiled DFA graph, kept opaque.
    pub regex_graph: serde_json::Value,
    /// The text the graph runs over (header or body per the rule).
    pub haystack: String,
    /// Maximum haystack length the circuit accepts, if the blueprint
    /// declares one for this location.
    pub max_haystack_length: Option<u32>,
    /// Maximum match length: the bound of the first part that declares
    /// one. Parts without an explicit bound inherit none at this stage.
    pub max_match_length: Option<u32>,
}

/// Pair every decomposed regex with its precompiled graph and haystack.
///
/// # Errors
///
/// [`WitnessError::MissingRegexGraph`] if any regex has no graph in
/// `graphs`.
pub fn build_noir_inputs(
    email: &ParsedEmail,
    blueprint: &BlueprintProps,
    graphs: &BTreeMap<String, serde_json::Value>,
) -> Result<Vec<NoirRegexInput>, WitnessError> {
    blueprint
        .decomposed_regexes
        .iter()
        .map(|regex| {
            let graph = graphs
                .get(&regex.name)
                .ok_or_else(|| WitnessError::MissingRegexGraph(regex.name.clone()))?;
            let (haystack, max_haystack_length) = match regex.location {
                RegexLocation::Header => (
                    email.canonicalized_header.clone(),
                    blueprint.email_header_max_length,
                ),
                RegexLocation::Body => {
                    (email.cleaned_body.clone(), blueprint.email_body_max_length)
                }
            };
            Ok(NoirRegexInput {
                name: regex.name.clone(),
                regex_graph: graph.clone(),
                haystack,
                max_haystack_length,
                max_match_length: regex.first_part_max_length(),
            })
        })
        .collect()
}

/// Full Noir input generation: validate external inputs, parse the
/// email, enforce section bounds, and pair every regex with its graph.
///
/// Returns the per-regex inputs and the joined external inputs, both in
/// declaration order.
pub fn generate_noir_proof_inputs(
    parser: &dyn EmailParser,
    eml: &str,
    blueprint: &BlueprintProps,
    supplied: &[ExternalInputValue],
    graphs: &BTreeMap<String, serde_json::Value>,
) -> Result<(Vec<NoirRegexInput>, Vec<ExternalInputWithMax>), WitnessError> {
    let external_inputs =
        add_max_length_to_external_inputs(blueprint.external_inputs(), supplied)?;
    let email = parser.parse_email(eml)?;
    crate::inputs::enforce_section_bounds(&email, blueprint)?;
    let regex_inputs = build_noir_inputs(&email, blueprint, graphs)?;
    Ok((regex_inputs, external_inputs))
}
