// SPDX-FileCopyrightText: 2026 Dexlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Marker-tagged string encryption keyed by the wallet identity.
//!
//! This is the surface the rest of the module uses: strings in, strings
//! out, suitable for round-tripping through the host's untyped settings
//! storage. Ciphertext is `ENC:` followed by base64(nonce || ciphertext),
//! where the ciphertext carries the GCM authentication tag.
//!
//! Classification is purely structural: a value is ciphertext iff it
//! carries the marker with a non-empty payload. No content heuristics --
//! a base64-shaped plaintext must never be misclassified as encrypted.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use dexlink_core::DexlinkError;
use tracing::{debug, warn};

use crate::crypto;

/// Fixed literal prefix marking a value as vault ciphertext.
pub const MARKER: &str = "ENC:";

/// Key material substituted when no wallet session is active.
///
/// Encryption under this fallback protects against nothing but casual
/// inspection -- the value is public. [`resolve_genesis`] logs a warning
/// whenever it is used so degraded operation is visible.
const FALLBACK_KEY_MATERIAL: &str = "default-key";

/// Resolve the current wallet identity into key-derivation input.
///
/// Absent (or empty) identity degrades to [`FALLBACK_KEY_MATERIAL`] with a
/// warning; callers should treat anything encrypted in this mode as
/// effectively unprotected.
pub fn resolve_genesis(genesis: Option<&str>) -> &str {
    match genesis {
        Some(g) if !g.is_empty() => g,
        _ => {
            warn!("no wallet identity available -- falling back to the fixed key, credentials are NOT protected");
            FALLBACK_KEY_MATERIAL
        }
    }
}

/// Check whether a value is vault ciphertext.
///
/// Pure structural marker check; never attempts decryption.
pub fn is_encrypted(value: &str) -> bool {
    value
        .strip_prefix(MARKER)
        .is_some_and(|payload| !payload.is_empty())
}

/// Encrypt a credential value under the given wallet identity.
///
/// Empty input has nothing to protect and is returned unchanged. Input
/// already carrying the marker is returned unchanged -- double encryption
/// is a caller bug, not a crash.
pub fn encrypt(plaintext: &str, genesis: &str) -> Result<String, DexlinkError> {
    if plaintext.is_empty() {
        return Ok(plaintext.to_string());
    }
    if is_encrypted(plaintext) {
        debug!("value already carries the ciphertext marker -- leaving unchanged");
        return Ok(plaintext.to_string());
    }

    let key = crypto::derive_key(genesis);
    let (ciphertext, nonce) = crypto::seal(&key, plaintext.as_bytes())?;

    let mut blob = Vec::with_capacity(nonce.len() + ciphertext.len());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);

    Ok(format!("{MARKER}{}", BASE64.encode(blob)))
}

/// Decrypt a stored credential value under the given wallet identity.
///
/// Unmarked input is treated as already-plaintext and returned unchanged,
/// which lets settings written before encryption existed migrate safely.
/// Any failure on marked input -- malformed base64, truncated payload,
/// wrong key, tampered data, non-UTF-8 plaintext -- yields `None` rather
/// than an error, so the caller can treat the stored value as unusable
/// and re-prompt without crashing the persistence pipeline.
pub fn decrypt(value: &str, genesis: &str) -> Option<String> {
    let Some(payload) = value.strip_prefix(MARKER) else {
        return Some(value.to_string());
    };

    let blob = match BASE64.decode(payload) {
        Ok(blob) => blob,
        Err(e) => {
            warn!(error = %e, "ciphertext payload is not valid base64");
            return None;
        }
    };

    // 12-byte nonce followed by at least the 16-byte GCM tag.
    if blob.len() < 12 + 16 {
        warn!(len = blob.len(), "ciphertext payload too short");
        return None;
    }
    let (nonce_bytes, ciphertext) = blob.split_at(12);
    let nonce: [u8; 12] = nonce_bytes.try_into().ok()?;

    let key = crypto::derive_key(genesis);
    match crypto::open(&key, &nonce, ciphertext) {
        Ok(plaintext) => match String::from_utf8(plaintext) {
            Ok(s) => Some(s),
            Err(_) => {
                warn!("decrypted value is not valid UTF-8");
                None
            }
        },
        Err(_) => {
            debug!("decryption failed -- wrong identity key or corrupted data");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let ciphertext = encrypt("abc123", "user-genesis-xyz").unwrap();

        assert!(ciphertext.starts_with(MARKER));
        assert_ne!(ciphertext, "abc123");
        assert_eq!(decrypt(&ciphertext, "user-genesis-xyz").unwrap(), "abc123");
    }

    #[test]
    fn decrypt_with_wrong_identity_returns_none() {
        let ciphertext = encrypt("secret-value", "genesis-one").unwrap();
        assert_eq!(decrypt(&ciphertext, "genesis-two"), None);
    }

    #[test]
    fn encrypt_is_idempotent_on_marked_input() {
        let once = encrypt("my-api-key", "g").unwrap();
        let twice = encrypt(&once, "g").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn encrypt_empty_input_is_unchanged() {
        assert_eq!(encrypt("", "g").unwrap(), "");
    }

    #[test]
    fn decrypt_plaintext_passthrough() {
        // Unmarked values predate encryption; they come back unchanged.
        assert_eq!(decrypt("legacy-plaintext-key", "g").unwrap(), "legacy-plaintext-key");
    }

    #[test]
    fn classification() {
        let ciphertext = encrypt("value", "g").unwrap();
        assert!(is_encrypted(&ciphertext));
        assert!(!is_encrypted("value"));
        // Base64-shaped plaintext must not be misclassified.
        assert!(!is_encrypted("aGVsbG8gd29ybGQ="));
        // A bare marker with no payload is not well-formed ciphertext.
        assert!(!is_encrypted("ENC:"));
    }

    #[test]
    fn decrypt_garbage_payload_returns_none() {
        assert_eq!(decrypt("ENC:!!!not-base64!!!", "g"), None);
        assert_eq!(decrypt("ENC:AAAA", "g"), None);
    }

    #[test]
    fn decrypt_tampered_ciphertext_returns_none() {
        let ciphertext = encrypt("tamper-target", "g").unwrap();
        // Corrupt one character of the base64 payload.
        let mut chars: Vec<char> = ciphertext.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == 'A' { 'B' } else { 'A' };
        let tampered: String = chars.into_iter().collect();

        assert_eq!(decrypt(&tampered, "g"), None);
    }

    #[test]
    fn resolve_genesis_prefers_identity() {
        assert_eq!(resolve_genesis(Some("genesis-abc")), "genesis-abc");
    }

    #[test]
    #[tracing_test::traced_test]
    fn resolve_genesis_falls_back_when_absent() {
        assert_eq!(resolve_genesis(None), "default-key");
        assert_eq!(resolve_genesis(Some("")), "default-key");
        // Degraded mode must be loud, not silent.
        assert!(logs_contain("falling back to the fixed key"));
    }

    proptest! {
        #[test]
        fn roundtrip_holds_for_arbitrary_plaintext(
            plaintext in ".{1,200}",
            genesis in "[a-f0-9]{8,64}",
        ) {
            let ciphertext = encrypt(&plaintext, &genesis).unwrap();
            // Plaintext that happens to start with the marker is a no-op by
            // contract, so only unmarked inputs round-trip through seal.
            if !is_encrypted(&plaintext) {
                prop_assert!(is_encrypted(&ciphertext));
                prop_assert_eq!(decrypt(&ciphertext, &genesis).unwrap(), plaintext);
            } else {
                prop_assert_eq!(&ciphertext, &plaintext);
            }
        }

        #[test]
        fn unmarked_values_always_pass_through(value in "[^E].{0,100}", genesis in ".{1,32}") {
            prop_assume!(!value.starts_with(MARKER));
            prop_assert_eq!(decrypt(&value, &genesis).unwrap(), value);
        }
    }
}
