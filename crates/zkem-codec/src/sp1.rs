//! # SP1 Structured Outputs
//!
//! SP1 zkVM execution commits a structured output object rather than a
//! flat signal array. Field values arrive already named, so no per-regex
//! offset arithmetic is needed. The two commitments this SDK reads are
//! the SHA-256 public-key hash and the SHA-256 sender-domain hash, both
//! as raw byte arrays.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// The structured public outputs committed by an SP1 proof.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sp1PublicOutputs {
    /// The named output fields.
    pub outputs: Sp1OutputFields,
}

/// The named fields inside SP1 public outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sp1OutputFields {
    /// SHA-256 digest of the DER-encoded DKIM public key.
    pub public_key_hash: Vec<u8>,
    /// SHA-256 digest of the sender domain string.
    #[serde(default)]
    pub from_domain_hash: Vec<u8>,
    /// External inputs echoed back by the execution, by name.
    #[serde(default)]
    pub external_inputs: BTreeMap<String, String>,
}

impl Sp1PublicOutputs {
    /// Parse the structured outputs from their JSON form.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, CodecError> {
        if value.get("outputs").is_none() {
            return Err(CodecError::MissingField("outputs"));
        }
        serde_json::from_value(value.clone()).map_err(|_| CodecError::WrongShape {
            framework: "sp1",
            expected: "an object with named byte-array output fields",
        })
    }

    /// The pubkey-hash commitment as 32 bytes.
    pub fn pubkey_hash(&self) -> Result<[u8; 32], CodecError> {
        let bytes = &self.outputs.public_key_hash;
        if bytes.len() != 32 {
            return Err(CodecError::PubkeyHashTooWide(bytes.len()));
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> serde_json::Value {
        serde_json::json!({
            "outputs": {
                "public_key_hash": vec![7u8; 32],
                "from_domain_hash": vec![9u8; 32],
                "external_inputs": { "code": "1234" }
            }
        })
    }

    #[test]
    fn parses_structured_outputs() {
        let outputs = Sp1PublicOutputs::from_value(&sample()).unwrap();
        assert_eq!(outputs.pubkey_hash().unwrap(), [7u8; 32]);
        assert_eq!(outputs.outputs.external_inputs["code"], "1234");
    }

    #[test]
    fn missing_outputs_field_is_named() {
        let err = Sp1PublicOutputs::from_value(&serde_json::json!({})).unwrap_err();
        assert!(matches!(err, CodecError::MissingField("outputs")));
    }

    #[test]
    fn short_pubkey_hash_is_rejected() {
        let value = serde_json::json!({
            "outputs": { "public_key_hash": [1, 2, 3] }
        });
        let outputs = Sp1PublicOutputs::from_value(&value).unwrap();
        assert!(outputs.pubkey_hash().is_err());
    }

    #[test]
    fn optional_fields_default() {
        let value = serde_json::json!({
            "outputs": { "public_key_hash": vec![0u8; 32] }
        });
        let outputs = Sp1PublicOutputs::from_value(&value).unwrap();
        assert!(outputs.outputs.from_domain_hash.is_empty());
        assert!(outputs.outputs.external_inputs.is_empty());
    }
}
