// SPDX-FileCopyrightText: 2026 Dexlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical-form message signing for the exchange's private API.
//!
//! The exchange verifies requests by recomputing the same digest on its
//! side, so the flattening below must match its verifier exactly:
//! object keys in lexicographic order, array elements in their given
//! order, scalars as bare strings concatenated with no separator, the
//! secret appended last, SHA-256 over the whole, lowercase hex out.
//!
//! Interoperability notes, fixed by the server's verifier:
//! - `null` serializes as the literal `null`.
//! - Booleans serialize as `true` / `false`.
//! - Integers serialize without a fractional part; non-integer floats use
//!   serde_json's shortest round-trip form. Fields where textual drift
//!   matters (rates, volumes) should be pre-formatted as strings by the
//!   caller -- the typed order models do this.

use dexlink_core::DexlinkError;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Sign a JSON payload with the user's API secret.
///
/// Pure and deterministic: identical input always yields the identical
/// lowercase-hex digest. The payload must already contain the anti-replay
/// request id -- the signature covers it like any other field.
pub fn sign(payload: &Value, secret: &str) -> String {
    let mut canonical = String::new();
    collect_values(payload, &mut canonical);
    canonical.push_str(secret);

    let digest = Sha256::digest(canonical.as_bytes());
    hex::encode(digest)
}

/// Sign any serializable body.
///
/// Serialization failure (non-string map keys, non-finite floats) is a
/// programming error at the call site and fails loudly -- a silently
/// wrong signature would surface as an undiagnosable authentication
/// failure against the exchange.
pub fn sign_body<T: Serialize>(body: &T, secret: &str) -> Result<String, DexlinkError> {
    let value = serde_json::to_value(body)
        .map_err(|e| DexlinkError::Signing(format!("payload is not canonicalizable: {e}")))?;
    Ok(sign(&value, secret))
}

/// Flatten a payload into its canonical scalar concatenation.
///
/// Objects contribute their values in lexicographic key order, arrays in
/// element order, scalars their bare string form.
fn collect_values(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(s),
        Value::Array(items) => {
            for item in items {
                collect_values(item, out);
            }
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            for key in keys {
                collect_values(&map[key], out);
            }
        }
    }
}
