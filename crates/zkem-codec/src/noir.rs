//! # Noir Public-Output Layout
//!
//! Noir proofs expose a flat array of hex-string field elements with a
//! fixed offset table:
//!
//! | index | content |
//! |-------|---------|
//! | 0 | pubkey-hash commitment |
//! | 1–2 | header hash, split in two halves |
//! | 3 | prover address |
//! | next | `ceil(max_length / 31)` elements per external input |
//! | rest | per-regex revealed data |
//!
//! In the per-regex region, a hashed regex consumes one element
//! (commitment, kept verbatim). A non-hashed regex consumes, for each
//! public part, `bound` elements each encoding one UTF-8 byte, followed
//! by one length element the circuit asserts equals the decoded length.
//! Private parts consume nothing.
//!
//! This offset table is a convention shared with the circuit layout, not
//! derived from a schema. If the circuit layout changes, the constants
//! below must change in lock-step.

use std::collections::BTreeMap;

use zkem_core::{DecomposedRegex, ExternalInput};

use crate::error::CodecError;
use crate::field::{field_count_for, hex_to_be_32, hex_to_byte, hex_to_u64};

/// Index of the pubkey-hash commitment.
const PUBKEY_HASH_INDEX: usize = 0;
/// Number of elements occupied by the split header hash.
const HEADER_HASH_WIDTH: usize = 2;
/// Index of the prover address element.
const PROVER_ADDRESS_INDEX: usize = PUBKEY_HASH_INDEX + 1 + HEADER_HASH_WIDTH;
/// First element after the fixed prefix.
const FIXED_PREFIX: usize = PROVER_ADDRESS_INDEX + 1;

/// Extract the pubkey-hash commitment as 32 big-endian bytes.
pub fn pubkey_hash(outputs: &[String]) -> Result<[u8; 32], CodecError> {
    let element = outputs.first().ok_or(CodecError::TruncatedOutputs {
        expected: PUBKEY_HASH_INDEX + 1,
        actual: outputs.len(),
    })?;
    hex_to_be_32(element)
}

/// Decode the per-regex region into `name → revealed part strings`.
pub fn decode_public_data(
    outputs: &[String],
    regexes: &[DecomposedRegex],
    external_inputs: &[ExternalInput],
) -> Result<BTreeMap<String, Vec<String>>, CodecError> {
    let mut cursor = FIXED_PREFIX;
    // External-input values are packed field elements; they are consumed
    // here to position the cursor but not decoded at this layer.
    for input in external_inputs {
        cursor += field_count_for(input.max_length);
    }

    let mut out = BTreeMap::new();
    for regex in regexes {
        let mut revealed = Vec::new();
        if regex.is_hashed {
            let slot = take(outputs, cursor, 1)?;
            revealed.push(slot[0].clone());
            cursor += 1;
        } else {
            for part in regex.public_parts() {
                let bound = part.max_length.unwrap_or(regex.max_length) as usize;
                // `bound` byte elements plus the trailing length element.
                let run = take(outputs, cursor, bound + 1)?;
                cursor += bound + 1;

                let mut bytes = Vec::with_capacity(bound);
                for element in &run[..bound] {
                    bytes.push(hex_to_byte(element)?);
                }
                while bytes.last() == Some(&0) {
                    bytes.pop();
                }
                let text = String::from_utf8(bytes).map_err(|e| CodecError::InvalidUtf8 {
                    regex: regex.name.clone(),
                    reason: e.to_string(),
                })?;

                let asserted = hex_to_u64(&run[bound])? as usize;
                if text.len() != asserted {
                    return Err(CodecError::LengthMismatch {
                        regex: regex.name.clone(),
                        decoded: text.len(),
                        asserted,
                    });
                }
                revealed.push(text);
            }
        }
        out.insert(regex.name.clone(), revealed);
    }

    Ok(out)
}

fn take(outputs: &[String], cursor: usize, width: usize) -> Result<&[String], CodecError> {
    outputs
        .get(cursor..cursor + width)
        .ok_or(CodecError::TruncatedOutputs {
            expected: cursor + width,
            actual: outputs.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkem_core::{RegexLocation, RegexPart};

    fn regex(name: &str, max_length: u32, is_hashed: bool) -> DecomposedRegex {
        DecomposedRegex {
            name: name.into(),
            location: RegexLocation::Body,
            max_length,
            is_hashed,
            parts: vec![
                RegexPart {
                    is_public: false,
                    regex_def: "anchor".into(),
                    max_length: None,
                },
                RegexPart {
                    is_public: true,
                    regex_def: ".+".into(),
                    max_length: None,
                },
            ],
        }
    }

    /// Prefix: pubkey hash, header hash halves, prover address.
    fn outputs(tail: &[&str]) -> Vec<String> {
        let mut all = vec![
            "0x2a".to_string(),
            "0x01".to_string(),
            "0x02".to_string(),
            "0xdead".to_string(),
        ];
        all.extend(tail.iter().map(|s| s.to_string()));
        all
    }

    #[test]
    fn pubkey_hash_is_element_zero() {
        let hash = pubkey_hash(&outputs(&[])).unwrap();
        assert_eq!(hash[31], 0x2a);
        assert!(hash[..31].iter().all(|&b| b == 0));
    }

    #[test]
    fn decodes_hello_with_matching_length_slot() {
        let tail = ["0x68", "0x65", "0x6c", "0x6c", "0x6f", "0x05"];
        let data = decode_public_data(&outputs(&tail), &[regex("greeting", 5, false)], &[])
            .unwrap();
        assert_eq!(data["greeting"], vec!["hello".to_string()]);
    }

    #[test]
    fn length_slot_mismatch_is_a_hard_error() {
        let tail = ["0x68", "0x65", "0x6c", "0x6c", "0x6f", "0x04"];
        let err = decode_public_data(&outputs(&tail), &[regex("greeting", 5, false)], &[])
            .unwrap_err();
        match err {
            CodecError::LengthMismatch {
                regex,
                decoded,
                asserted,
            } => {
                assert_eq!(regex, "greeting");
                assert_eq!(decoded, 5);
                assert_eq!(asserted, 4);
            }
            other => panic!("expected LengthMismatch, got {other:?}"),
        }
    }

    #[test]
    fn zero_padding_is_stripped_before_length_check() {
        // "hi" in a 5-byte bound: three zero slots pad, length slot is 2.
        let tail = ["0x68", "0x69", "0x00", "0x00", "0x00", "0x02"];
        let data =
            decode_public_data(&outputs(&tail), &[regex("short", 5, false)], &[]).unwrap();
        assert_eq!(data["short"], vec!["hi".to_string()]);
    }

    #[test]
    fn external_inputs_shift_the_regex_region() {
        // One external input with max_length 40 consumes ceil(40/31) = 2
        // elements before the regex data starts.
        let ext = vec![ExternalInput {
            name: "code".into(),
            max_length: 40,
        }];
        let tail = ["0xaa", "0xbb", "0x68", "0x69", "0x02"];
        let data =
            decode_public_data(&outputs(&tail), &[regex("short", 2, false)], &ext).unwrap();
        assert_eq!(data["short"], vec!["hi".to_string()]);
    }

    #[test]
    fn hashed_regex_consumes_one_verbatim_element() {
        let tail = ["0x1234abcd"];
        let data =
            decode_public_data(&outputs(&tail), &[regex("secret", 64, true)], &[]).unwrap();
        assert_eq!(data["secret"], vec!["0x1234abcd".to_string()]);
    }

    #[test]
    fn part_bound_overrides_regex_bound() {
        let mut rule = regex("bounded", 10, false);
        rule.parts[1].max_length = Some(2);
        // Two byte slots and the length slot, not ten.
        let tail = ["0x68", "0x69", "0x02"];
        let data = decode_public_data(&outputs(&tail), &[rule], &[]).unwrap();
        assert_eq!(data["bounded"], vec!["hi".to_string()]);
    }

    #[test]
    fn truncated_outputs_are_an_error() {
        let tail = ["0x68", "0x65"];
        let err = decode_public_data(&outputs(&tail), &[regex("greeting", 5, false)], &[])
            .unwrap_err();
        assert!(matches!(err, CodecError::TruncatedOutputs { .. }));
    }

    #[test]
    fn byte_slot_wider_than_a_byte_is_rejected() {
        let tail = ["0x168", "0x65", "0x02"];
        let rule = {
            let mut r = regex("short", 2, false);
            r.parts[1].max_length = Some(2);
            r
        };
        assert!(decode_public_data(&outputs(&tail), &[rule], &[]).is_err());
    }
}
