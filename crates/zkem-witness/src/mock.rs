//! # Mock Parsing and Input Primitives
//!
//! Deterministic stand-ins for the compiled email-parsing and
//! circuit-input primitives. The mock parser performs a plain
//! header/body split with no DKIM canonicalization; the mock builder
//! emits a transparent JSON object. Development and testing only.

use crate::email::{EmailParser, ParsedEmail};
use crate::error::WitnessError;
use crate::inputs::{CircuitInputBuilder, CircuitInputParams};

/// Mock [`EmailParser`]: splits at the first blank line, no
/// canonicalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockEmailParser;

impl EmailParser for MockEmailParser {
    fn parse_email(&self, eml: &str) -> Result<ParsedEmail, WitnessError> {
        let (header, body) = eml
            .split_once("\r\n\r\n")
            .or_else(|| eml.split_once("\n\n"))
            .ok_or_else(|| WitnessError::EmailParse("no header/body separator".into()))?;
        if header.is_empty() {
            return Err(WitnessError::EmailParse("empty header".into()));
        }
        let sender_domain = header
            .lines()
            .find_map(|line| line.strip_prefix("From:").or(line.strip_prefix("from:")))
            .and_then(|from| from.rsplit_once('@'))
            .map(|(_, domain)| domain.trim_end_matches('>').trim().to_string());
        Ok(ParsedEmail {
            canonicalized_header: header.to_string(),
            cleaned_body: body.to_string(),
            sender_domain,
        })
    }
}

/// Mock [`CircuitInputBuilder`]: a transparent JSON object carrying the
/// sections and external inputs verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockCircuitInputBuilder;

impl CircuitInputBuilder for MockCircuitInputBuilder {
    fn build(
        &self,
        email: &ParsedEmail,
        params: &CircuitInputParams<'_>,
    ) -> Result<serde_json::Value, WitnessError> {
        let external_inputs: serde_json::Map<String, serde_json::Value> = params
            .external_inputs
            .iter()
            .map(|input| (input.name.clone(), input.value.clone().into()))
            .collect();
        Ok(serde_json::json!({
            "emailHeader": email.canonicalized_header,
            "emailBody": email.cleaned_body,
            "externalInputs": external_inputs,
            "ignoreBodyHashCheck": params.blueprint.ignore_body_hash_check,
        }))
    }
}
