//! # Circom Public-Signal Layout
//!
//! Circom proofs expose a flat array of decimal-string field elements:
//!
//! | index | content |
//! |-------|---------|
//! | 0 | pubkey-hash commitment |
//! | 1–2 | header hash, split in two halves |
//! | 3 .. 3+E | one value per external input, in declaration order |
//! | rest | per-regex revealed data, packed 31 bytes per field |
//!
//! The per-regex region is consumed in blueprint declaration order: a
//! hashed regex contributes exactly one field element (the commitment,
//! kept verbatim); a non-hashed regex contributes one packed run per
//! public part, sized by that part's match bound. Private parts consume
//! no signals.

use std::collections::BTreeMap;

use zkem_core::DecomposedRegex;

use crate::error::CodecError;
use crate::field::{decimal_to_be_32, field_count_for, unpack_fields_to_bytes};

/// Index of the pubkey-hash commitment.
const PUBKEY_HASH_INDEX: usize = 0;
/// Number of signals occupied by the split header hash.
const HEADER_HASH_WIDTH: usize = 2;
/// First signal after the fixed prefix (pubkey hash + header hash).
const FIXED_PREFIX: usize = 1 + HEADER_HASH_WIDTH;

/// Extract the pubkey-hash commitment as 32 big-endian bytes.
pub fn pubkey_hash(signals: &[String]) -> Result<[u8; 32], CodecError> {
    let signal = signals.first().ok_or(CodecError::TruncatedOutputs {
        expected: PUBKEY_HASH_INDEX + 1,
        actual: signals.len(),
    })?;
    decimal_to_be_32(signal)
}

/// Decode the per-regex region into `name → revealed part strings`.
///
/// `external_input_count` positions the cursor past the external-input
/// values; signal order within each packed run is preserved exactly as
/// the circuit emitted it.
pub fn decode_public_data(
    signals: &[String],
    regexes: &[DecomposedRegex],
    external_input_count: usize,
) -> Result<BTreeMap<String, Vec<String>>, CodecError> {
    let mut cursor = FIXED_PREFIX + external_input_count;
    let mut out = BTreeMap::new();

    for regex in regexes {
        let mut revealed = Vec::new();
        if regex.is_hashed {
            let slot = take(signals, cursor, 1)?;
            revealed.push(slot[0].clone());
            cursor += 1;
        } else {
            for part in regex.public_parts() {
                let bound = part.max_length.unwrap_or(regex.max_length);
                let width = field_count_for(bound);
                let run = take(signals, cursor, width)?;
                cursor += width;

                let bytes = unpack_fields_to_bytes(run)?;
                let text =
                    String::from_utf8(bytes).map_err(|e| CodecError::InvalidUtf8 {
                        regex: regex.name.clone(),
                        reason: e.to_string(),
                    })?;
                revealed.push(text);
            }
        }
        out.insert(regex.name.clone(), revealed);
    }

    Ok(out)
}

fn take(signals: &[String], cursor: usize, width: usize) -> Result<&[String], CodecError> {
    signals
        .get(cursor..cursor + width)
        .ok_or(CodecError::TruncatedOutputs {
            expected: cursor + width,
            actual: signals.len(),
        })
}
