//! # zkem-codec -- Public-Signal Codec
//!
//! Each proving backend exposes proof outputs in its own raw shape:
//! Circom as decimal-string field elements with 31-byte packing, Noir as
//! hex-string field elements with per-byte slots and asserted lengths,
//! SP1 as a structured object with named fields. This crate reconciles
//! the three into one decoded form: a map from decomposed-regex name to
//! the ordered list of revealed part strings, plus the pubkey-hash
//! commitment every verification path starts from.
//!
//! Dispatch over [`ZkFramework`] is exhaustive. An unrecognized
//! framework cannot reach a decoder: the enum is closed at the type
//! level, so there is no silent fallback arm to hide a mismatch.

pub mod circom;
pub mod error;
pub mod field;
pub mod noir;
pub mod sp1;

use std::collections::BTreeMap;

use zkem_core::{BlueprintProps, ZkFramework};

pub use error::CodecError;
pub use sp1::Sp1PublicOutputs;

/// Decode raw public outputs into `regex name → revealed part strings`.
///
/// Circom and Noir outputs must be JSON arrays of strings; SP1 outputs
/// carry named fields already, so the per-regex map is empty and callers
/// read the SP1 record's own fields instead.
pub fn decode_public_outputs(
    framework: ZkFramework,
    outputs: &serde_json::Value,
    blueprint: &BlueprintProps,
) -> Result<BTreeMap<String, Vec<String>>, CodecError> {
    match framework {
        ZkFramework::Circom => {
            let signals = as_string_array(outputs, "circom")?;
            circom::decode_public_data(
                &signals,
                &blueprint.decomposed_regexes,
                blueprint.external_inputs().len(),
            )
        }
        ZkFramework::Noir => {
            let elements = as_string_array(outputs, "noir")?;
            noir::decode_public_data(
                &elements,
                &blueprint.decomposed_regexes,
                blueprint.external_inputs(),
            )
        }
        ZkFramework::Sp1 => {
            // Validate the shape even though no per-regex decode happens.
            Sp1PublicOutputs::from_value(outputs)?;
            Ok(BTreeMap::new())
        }
    }
}

/// Extract the pubkey-hash commitment as 32 big-endian bytes.
pub fn extract_pubkey_hash(
    framework: ZkFramework,
    outputs: &serde_json::Value,
) -> Result<[u8; 32], CodecError> {
    match framework {
        ZkFramework::Circom => {
            let signals = as_string_array(outputs, "circom")?;
            circom::pubkey_hash(&signals)
        }
        ZkFramework::Noir => {
            let elements = as_string_array(outputs, "noir")?;
            noir::pubkey_hash(&elements)
        }
        ZkFramework::Sp1 => Sp1PublicOutputs::from_value(outputs)?.pubkey_hash(),
    }
}

fn as_string_array(
    outputs: &serde_json::Value,
    framework: &'static str,
) -> Result<Vec<String>, CodecError> {
    let array = outputs.as_array().ok_or(CodecError::WrongShape {
        framework,
        expected: "a flat array of field-element strings",
    })?;
    array
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or(CodecError::WrongShape {
                    framework,
                    expected: "a flat array of field-element strings",
                })
        })
        .collect()
}
