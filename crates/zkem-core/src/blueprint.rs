//! # Blueprint Configuration
//!
//! Read-only view of a registry blueprint: which regexes to extract,
//! which external inputs the prover must supply, and which proving
//! backend serves each execution path. The full blueprint resource
//! (versioning, compilation status, CRUD) lives server-side; this crate
//! models only the slice the proving pipeline reads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ConfigError;
use crate::framework::ZkFramework;
use crate::regex::DecomposedRegex;

/// A named, length-bounded, user-supplied string baked into the proof as
/// a public commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalInput {
    /// Input name, unique within the blueprint.
    pub name: String,
    /// Maximum length of the supplied value, in bytes.
    pub max_length: u32,
}

/// A value supplied by the caller for a declared external input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalInputValue {
    /// The declared input this value satisfies.
    pub name: String,
    /// The supplied value.
    pub value: String,
}

/// The blueprint properties the proving pipeline consumes.
///
/// Wire shape matches the registry API (camelCase). Optional fields use
/// `#[serde(default)]` for resilience against registry schema evolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintProps {
    /// Blueprint identifier assigned by the registry.
    pub id: Uuid,
    /// Human-readable slug (`org/name`).
    #[serde(default)]
    pub slug: Option<String>,
    /// The extraction rules, in declaration order.
    #[serde(default)]
    pub decomposed_regexes: Vec<DecomposedRegex>,
    /// External inputs the prover must supply, if any.
    #[serde(default)]
    pub external_inputs: Option<Vec<ExternalInput>>,
    /// Backend used for client-side (local) proving, if compiled.
    #[serde(default)]
    pub client_zk_framework: Option<ZkFramework>,
    /// Backend used for server-side (remote) proving, if compiled.
    #[serde(default)]
    pub server_zk_framework: Option<ZkFramework>,
    /// Maximum canonicalized header length the circuit accepts.
    #[serde(default)]
    pub email_header_max_length: Option<u32>,
    /// Maximum cleaned body length the circuit accepts.
    #[serde(default)]
    pub email_body_max_length: Option<u32>,
    /// Whether the circuit skips the body-hash check.
    #[serde(default)]
    pub ignore_body_hash_check: bool,
    /// Whether soft line breaks are removed from the body before matching.
    #[serde(default)]
    pub remove_soft_linebreaks: bool,
    /// Selector string for SHA precompute, if configured.
    #[serde(default)]
    pub sha_precompute_selector: Option<String>,
    /// The sender domain this blueprint verifies against.
    #[serde(default)]
    pub sender_domain: Option<String>,
}

impl BlueprintProps {
    /// The framework for local proving.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoClientFramework`] if the blueprint was not
    /// compiled for client-side proving.
    pub fn client_framework(&self) -> Result<ZkFramework, ConfigError> {
        self.client_zk_framework
            .ok_or(ConfigError::NoClientFramework)
    }

    /// The framework for remote proving.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoServerFramework`] if the blueprint was not
    /// compiled for server-side proving.
    pub fn server_framework(&self) -> Result<ZkFramework, ConfigError> {
        self.server_zk_framework
            .ok_or(ConfigError::NoServerFramework)
    }

    /// The declared external inputs, empty slice if none.
    pub fn external_inputs(&self) -> &[ExternalInput] {
        self.external_inputs.as_deref().unwrap_or(&[])
    }

    /// Look up a decomposed regex by name.
    pub fn regex_by_name(&self, name: &str) -> Option<&DecomposedRegex> {
        self.decomposed_regexes.iter().find(|r| r.name == name)
    }

    /// Validate every decomposed regex in the blueprint.
    pub fn validate(&self) -> Result<(), crate::error::ValidationError> {
        for rule in &self.decomposed_regexes {
            rule.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::{RegexLocation, RegexPart};

    fn props() -> BlueprintProps {
        BlueprintProps {
            id: Uuid::nil(),
            slug: Some("acme/airline-ticket".into()),
            decomposed_regexes: vec![DecomposedRegex {
                name: "booking_code".into(),
                location: RegexLocation::Body,
                max_length: 10,
                is_hashed: false,
                parts: vec![
                    RegexPart {
                        is_public: false,
                        regex_def: "code: ".into(),
                        max_length: None,
                    },
                    RegexPart {
                        is_public: true,
                        regex_def: "[A-Z0-9]+".into(),
                        max_length: Some(10),
                    },
                ],
            }],
            external_inputs: None,
            client_zk_framework: Some(ZkFramework::Circom),
            server_zk_framework: None,
            email_header_max_length: Some(1024),
            email_body_max_length: Some(4096),
            ignore_body_hash_check: false,
            remove_soft_linebreaks: true,
            sha_precompute_selector: None,
            sender_domain: Some("acme.com".into()),
        }
    }

    #[test]
    fn client_framework_present() {
        assert_eq!(props().client_framework().unwrap(), ZkFramework::Circom);
    }

    #[test]
    fn missing_server_framework_is_config_error() {
        let err = props().server_framework().unwrap_err();
        assert!(matches!(err, ConfigError::NoServerFramework));
    }

    #[test]
    fn external_inputs_defaults_to_empty() {
        assert!(props().external_inputs().is_empty());
    }

    #[test]
    fn regex_lookup_by_name() {
        let bp = props();
        assert!(bp.regex_by_name("booking_code").is_some());
        assert!(bp.regex_by_name("missing").is_none());
    }

    #[test]
    fn deserializes_with_minimal_fields() {
        let bp: BlueprintProps = serde_json::from_value(serde_json::json!({
            "id": "550e8400-e29b-41d4-a716-446655440000"
        }))
        .unwrap();
        assert!(bp.decomposed_regexes.is_empty());
        assert!(bp.client_zk_framework.is_none());
        assert!(!bp.ignore_body_hash_check);
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let json = serde_json::to_value(props()).unwrap();
        assert!(json.get("clientZkFramework").is_some());
        assert!(json.get("emailHeaderMaxLength").is_some());
        assert_eq!(json["clientZkFramework"], "circom");
    }
}
