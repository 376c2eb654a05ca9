// SPDX-FileCopyrightText: 2026 Dexlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level AES-256-GCM seal/open operations and identity key derivation.
//!
//! Every call to [`seal`] generates a fresh random 96-bit nonce via the
//! system CSPRNG. Nonce reuse would be catastrophic for GCM security.

use dexlink_core::DexlinkError;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Derive the 32-byte encryption key for a wallet identity.
///
/// SHA-256 over the genesis bytes: the same identity always yields the
/// same key, and distinct identities yield independent keys. The returned
/// key is wrapped in [`Zeroizing`] for automatic memory zeroing on drop.
pub fn derive_key(genesis: &str) -> Zeroizing<[u8; 32]> {
    let digest = Sha256::digest(genesis.as_bytes());
    Zeroizing::new(digest.into())
}

/// Encrypt plaintext with AES-256-GCM using a random 96-bit nonce.
///
/// Returns `(ciphertext_with_tag, nonce_bytes)`. The caller must store both
/// the ciphertext and the nonce to be able to decrypt later.
pub fn seal(key: &[u8; 32], plaintext: &[u8]) -> Result<(Vec<u8>, [u8; 12]), DexlinkError> {
    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| DexlinkError::Vault("failed to create AES-256-GCM key".to_string()))?;
    let less_safe = LessSafeKey::new(unbound);

    let rng = SystemRandom::new();
    let mut nonce_bytes = [0u8; 12];
    rng.fill(&mut nonce_bytes)
        .map_err(|_| DexlinkError::Vault("failed to generate random nonce".to_string()))?;

    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    // Seal in place: plaintext buffer is extended with the authentication tag.
    let mut in_out = plaintext.to_vec();
    less_safe
        .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| DexlinkError::Vault("AES-256-GCM encryption failed".to_string()))?;

    Ok((in_out, nonce_bytes))
}

/// Decrypt ciphertext with AES-256-GCM.
///
/// `ciphertext` must include the 16-byte authentication tag appended by
/// [`seal`]. Returns the decrypted plaintext, or an error if the key is
/// wrong or the data is tampered.
pub fn open(
    key: &[u8; 32],
    nonce_bytes: &[u8; 12],
    ciphertext: &[u8],
) -> Result<Vec<u8>, DexlinkError> {
    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| DexlinkError::Vault("failed to create AES-256-GCM key".to_string()))?;
    let less_safe = LessSafeKey::new(unbound);

    let nonce = Nonce::assume_unique_for_key(*nonce_bytes);

    let mut in_out = ciphertext.to_vec();
    let plaintext = less_safe
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| {
            DexlinkError::Vault(
                "AES-256-GCM decryption failed -- wrong key or corrupted data".to_string(),
            )
        })?;

    Ok(plaintext.to_vec())
}
