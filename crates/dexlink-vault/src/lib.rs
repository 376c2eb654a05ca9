// SPDX-FileCopyrightText: 2026 Dexlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Encrypted credential vault for the Dexlink exchange-integration module.
//!
//! Protects the user's exchange API credentials at rest. The encryption key
//! is derived from the host wallet's per-user identity (the "genesis"), so
//! a settings blob lifted from one user's profile is useless under another
//! identity. Ciphertext is tagged with a fixed `ENC:` prefix, making it
//! structurally distinguishable from plaintext everywhere downstream:
//! encryption is idempotent, and values written before encryption existed
//! pass through decryption unchanged.
//!
//! Decryption failures are deliberately non-fatal -- they yield `None` so
//! the host's persistence pipeline can fall back to re-prompting for
//! credentials instead of crashing on a rotated key or corrupted blob.

pub mod cipher;
pub mod crypto;
pub mod settings;

pub use cipher::{decrypt, encrypt, is_encrypted, resolve_genesis, MARKER};
pub use settings::{open_settings, seal_settings, ExchangeSettings, SecretField, SecretFieldName};
