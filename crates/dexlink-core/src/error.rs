// SPDX-FileCopyrightText: 2026 Dexlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Dexlink exchange-integration module.

use thiserror::Error;

/// The primary error type used across all Dexlink crates.
///
/// Note that an ordinary decryption failure is NOT an error: the vault
/// signals it with a sentinel `None` so the persistence pipeline never
/// crashes on rotated keys or corrupted blobs. Only structural problems
/// (key setup, RNG, serialization) surface here.
#[derive(Debug, Error)]
pub enum DexlinkError {
    /// Credential vault errors (key setup, nonce generation, encoding).
    #[error("vault error: {0}")]
    Vault(String),

    /// Request-signing errors (payload not serializable to JSON).
    ///
    /// A payload that cannot be canonicalized is a programming error at
    /// the call site; failing loudly here beats a silently wrong signature
    /// that the exchange rejects without explanation.
    #[error("signing error: {0}")]
    Signing(String),

    /// Exchange API errors (server-reported failure, malformed envelope).
    #[error("api error: {message}")]
    Api {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Transport errors reported by the host's network proxy.
    #[error("transport error: {0}")]
    Transport(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
