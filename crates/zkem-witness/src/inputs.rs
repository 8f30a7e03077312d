//! # Circuit Input Construction
//!
//! The join of declared external inputs with supplied values, the
//! length checks on email sections, and the delegation to the backend's
//! circuit-input primitive. Everything here fails before any proving
//! work starts; a missing external input or an oversized body never
//! reaches a prover.

use serde::{Deserialize, Serialize};

use zkem_core::{BlueprintProps, ConfigError, ExternalInput, ExternalInputValue, ValidationError};

use crate::email::{EmailParser, ParsedEmail};
use crate::error::WitnessError;

/// An external input joined with its declared maximum length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalInputWithMax {
    /// The input name.
    pub name: String,
    /// The supplied value.
    pub value: String,
    /// The declared bound from the blueprint.
    pub max_length: u32,
}

/// Join declared external inputs with supplied values, in declaration
/// order.
///
/// # Errors
///
/// [`ConfigError::MissingExternalInput`] if a declared input has no
/// supplied value; [`ValidationError::ExternalInputTooLong`] if a value
/// exceeds its declared bound.
pub fn add_max_length_to_external_inputs(
    declared: &[ExternalInput],
    supplied: &[ExternalInputValue],
) -> Result<Vec<ExternalInputWithMax>, WitnessError> {
    let mut joined = Vec::with_capacity(declared.len());
    for input in declared {
        let value = supplied
            .iter()
            .find(|v| v.name == input.name)
            .ok_or_else(|| ConfigError::MissingExternalInput(input.name.clone()))?;
        if value.value.len() > input.max_length as usize {
            return Err(ValidationError::ExternalInputTooLong {
                name: input.name.clone(),
                length: value.value.len(),
                max_length: input.max_length,
            }
            .into());
        }
        joined.push(ExternalInputWithMax {
            name: input.name.clone(),
            value: value.value.clone(),
            max_length: input.max_length,
        });
    }
    Ok(joined)
}

/// The blueprint-derived parameters handed to the circuit-input
/// primitive alongside the parsed email.
#[derive(Debug)]
pub struct CircuitInputParams<'a> {
    /// The blueprint being proven against.
    pub blueprint: &'a BlueprintProps,
    /// External inputs, joined and validated.
    pub external_inputs: &'a [ExternalInputWithMax],
}

/// Handle to the backend circuit-input primitive.
///
/// Produces the ordered key-value input object the circuit's witness
/// generator consumes. The ordering contract is the primitive's; this
/// SDK stores the result verbatim for audit and hands it to the prover
/// untouched.
pub trait CircuitInputBuilder: Send + Sync {
    /// Build the circuit input object.
    ///
    /// # Errors
    ///
    /// [`WitnessError::InputGeneration`] if the primitive rejects the
    /// email or parameters.
    fn build(
        &self,
        email: &ParsedEmail,
        params: &CircuitInputParams<'_>,
    ) -> Result<serde_json::Value, WitnessError>;
}

/// Generate the circuit input for a Circom- or SP1-style backend.
///
/// Validates external inputs, parses the email, enforces the
/// blueprint's header/body bounds, then delegates to the injected
/// builder.
pub fn generate_proof_inputs(
    parser: &dyn EmailParser,
    builder: &dyn CircuitInputBuilder,
    eml: &str,
    blueprint: &BlueprintProps,
    supplied: &[ExternalInputValue],
) -> Result<serde_json::Value, WitnessError> {
    let external_inputs =
        add_max_length_to_external_inputs(blueprint.external_inputs(), supplied)?;
    let email = parser.parse_email(eml)?;
    enforce_section_bounds(&email, blueprint)?;

    let params = CircuitInputParams {
        blueprint,
        external_inputs: &external_inputs,
    };
    builder.build(&email, &params)
}

/// Enforce the blueprint's declared header/body length bounds.
pub(crate) fn enforce_section_bounds(
    email: &ParsedEmail,
    blueprint: &BlueprintProps,
) -> Result<(), WitnessError> {
    if let Some(max) = blueprint.email_header_max_length {
        if email.canonicalized_header.len() > max as usize {
            return Err(ValidationError::SectionTooLong {
                section: "header",
                length: email.canonicalized_header.len(),
                max_length: max,
            }
            .into());
        }
    }
    if let Some(max) = blueprint.email_body_max_length {
        if email.cleaned_body.len() > max as usize {
            return Err(ValidationError::SectionTooLong {
                section: "body",
                length: email.cleaned_body.len(),
                max_length: max,
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockCircuitInputBuilder, MockEmailParser};
    use uuid::Uuid;

    fn declared(name: &str, max: u32) -> ExternalInput {
        ExternalInput {
            name: name.into(),
            max_length: max,
        }
    }

    fn supplied(name: &str, value: &str) -> ExternalInputValue {
        ExternalInputValue {
            name: name.into(),
            value: value.into(),
        }
    }

    fn blueprint() -> BlueprintProps {
        BlueprintProps {
            id: Uuid::nil(),
            slug: None,
            decomposed_regexes: vec![],
            external_inputs: Some(vec![declared("code", 64)]),
            client_zk_framework: None,
            server_zk_framework: None,
            email_header_max_length: Some(1024),
            email_body_max_length: Some(2048),
            ignore_body_hash_check: false,
            remove_soft_linebreaks: false,
            sha_precompute_selector: None,
            sender_domain: None,
        }
    }

    #[test]
    fn join_preserves_declaration_order() {
        let declared = vec![declared("a", 8), declared("b", 8)];
        let supplied = vec![supplied("b", "two"), supplied("a", "one")];
        let joined = add_max_length_to_external_inputs(&declared, &supplied).unwrap();
        assert_eq!(joined[0].name, "a");
        assert_eq!(joined[0].value, "one");
        assert_eq!(joined[1].name, "b");
        assert_eq!(joined[1].max_length, 8);
    }

    #[test]
    fn missing_external_input_fails_before_parsing() {
        let err = add_max_length_to_external_inputs(&[declared("code", 64)], &[]).unwrap_err();
        match err {
            WitnessError::Config(ConfigError::MissingExternalInput(name)) => {
                assert_eq!(name, "code")
            }
            other => panic!("expected MissingExternalInput, got {other:?}"),
        }
    }

    #[test]
    fn oversized_external_input_is_rejected() {
        let err =
            add_max_length_to_external_inputs(&[declared("code", 4)], &[supplied("code", "12345")])
                .unwrap_err();
        assert!(matches!(
            err,
            WitnessError::Validation(ValidationError::ExternalInputTooLong { .. })
        ));
    }

    #[test]
    fn generate_inputs_happy_path() {
        let eml = "From: a@acme.com\r\nSubject: hi\r\n\r\nbody text";
        let inputs = generate_proof_inputs(
            &MockEmailParser::default(),
            &MockCircuitInputBuilder,
            eml,
            &blueprint(),
            &[supplied("code", "1234")],
        )
        .unwrap();
        assert!(inputs.get("emailHeader").is_some());
        assert_eq!(inputs["externalInputs"]["code"], "1234");
    }

    #[test]
    fn generate_inputs_rejects_oversized_body() {
        let mut bp = blueprint();
        bp.email_body_max_length = Some(4);
        let eml = "From: a@acme.com\r\n\r\nthis body is longer than four bytes";
        let err = generate_proof_inputs(
            &MockEmailParser::default(),
            &MockCircuitInputBuilder,
            eml,
            &bp,
            &[supplied("code", "1234")],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            WitnessError::Validation(ValidationError::SectionTooLong {
                section: "body",
                ..
            })
        ));
    }

    #[test]
    fn generate_inputs_fails_on_missing_external_input_before_parsing() {
        // The parser would reject this malformed email, but the missing
        // input is detected first.
        let err = generate_proof_inputs(
            &MockEmailParser::default(),
            &MockCircuitInputBuilder,
            "not an email",
            &blueprint(),
            &[],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            WitnessError::Config(ConfigError::MissingExternalInput(_))
        ));
    }
}
