// SPDX-FileCopyrightText: 2026 Dexlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The persisted settings blob and the sensitive-field sweep.
//!
//! The host wallet stores [`ExchangeSettings`] in its own storage; this
//! module is invoked immediately before write ([`seal_settings`]) and
//! immediately after read ([`open_settings`]). Only the fields named in
//! [`SecretFieldName`] are touched -- everything else round-trips as-is.

use dexlink_core::DexlinkError;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::warn;

use crate::cipher;

/// The recognized sensitive credential fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SecretFieldName {
    /// The exchange API public key token.
    PublicKey,
    /// The exchange API private key token (the signing secret).
    PrivateKey,
}

impl SecretFieldName {
    /// Every field the seal/open sweep covers.
    pub const ALL: [SecretFieldName; 2] = [SecretFieldName::PublicKey, SecretFieldName::PrivateKey];
}

/// A named credential value, plaintext or ciphertext.
///
/// Whether the value is encrypted is never stored -- it is derived from
/// the structural marker on the value itself.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretField {
    pub name: SecretFieldName,
    pub value: String,
}

impl SecretField {
    pub fn new(name: SecretFieldName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    /// Whether the current value carries the ciphertext marker.
    pub fn is_encrypted(&self) -> bool {
        cipher::is_encrypted(&self.value)
    }

    /// Encrypt the value in place under the given identity. No-op for
    /// empty or already-encrypted values.
    pub fn seal(&mut self, genesis: &str) -> Result<(), DexlinkError> {
        self.value = cipher::encrypt(&self.value, genesis)?;
        Ok(())
    }

    /// Recover the plaintext, wrapped so it never lands in logs.
    ///
    /// `None` means the stored ciphertext could not be decrypted under
    /// this identity; the caller must treat the credential as unusable
    /// and re-prompt the user.
    pub fn reveal(&self, genesis: &str) -> Option<SecretString> {
        cipher::decrypt(&self.value, genesis).map(SecretString::from)
    }
}

impl std::fmt::Debug for SecretField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretField")
            .field("name", &self.name)
            .field("value", &mask_value(&self.value))
            .finish()
    }
}

/// The settings blob the host persists for this module.
///
/// `public_key` and `private_key` hold ciphertext at rest and plaintext
/// after [`open_settings`]; the remaining fields are not sensitive and
/// are never transformed.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ExchangeSettings {
    /// Exchange API public key token (sensitive).
    #[serde(default)]
    pub public_key: String,
    /// Exchange API private key token (sensitive).
    #[serde(default)]
    pub private_key: String,
    /// Last observed public IPv6 of this machine, used to detect address
    /// changes that invalidate the exchange's API-key IP binding.
    #[serde(default)]
    pub ipv6: Option<String>,
    /// Last selected trading pair.
    #[serde(default)]
    pub selected_pair: Option<String>,
}

impl ExchangeSettings {
    fn field_mut(&mut self, name: SecretFieldName) -> &mut String {
        match name {
            SecretFieldName::PublicKey => &mut self.public_key,
            SecretFieldName::PrivateKey => &mut self.private_key,
        }
    }

    /// Borrow a sensitive field by name.
    pub fn field(&self, name: SecretFieldName) -> &str {
        match name {
            SecretFieldName::PublicKey => &self.public_key,
            SecretFieldName::PrivateKey => &self.private_key,
        }
    }
}

impl std::fmt::Debug for ExchangeSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeSettings")
            .field("public_key", &mask_value(&self.public_key))
            .field("private_key", &mask_value(&self.private_key))
            .field("ipv6", &self.ipv6)
            .field("selected_pair", &self.selected_pair)
            .finish()
    }
}

/// Encrypt every non-empty sensitive field in place before persisting.
///
/// Idempotent: fields already carrying the marker are left unchanged.
pub fn seal_settings(settings: &mut ExchangeSettings, genesis: &str) -> Result<(), DexlinkError> {
    for name in SecretFieldName::ALL {
        let value = settings.field_mut(name);
        if !value.is_empty() {
            *value = cipher::encrypt(value, genesis)?;
        }
    }
    Ok(())
}

/// Decrypt every marked sensitive field in place after restoring.
///
/// A field that fails to decrypt keeps its ciphertext and is logged; the
/// host must treat that credential as unusable and re-prompt rather than
/// hand garbage to the signer.
pub fn open_settings(settings: &mut ExchangeSettings, genesis: &str) {
    for name in SecretFieldName::ALL {
        let value = settings.field_mut(name);
        if cipher::is_encrypted(value) {
            match cipher::decrypt(value, genesis) {
                Some(plaintext) => *value = plaintext,
                None => {
                    warn!(field = %name, "stored credential could not be decrypted -- leaving ciphertext in place");
                }
            }
        }
    }
}

/// Mask a credential for display: first few characters then an ellipsis.
///
/// Short values are fully masked.
pub fn mask_value(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    if value.chars().count() <= 8 {
        return "****".to_string();
    }
    let prefix: String = value.chars().take(8).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn settings() -> ExchangeSettings {
        ExchangeSettings {
            public_key: "pub-token-123".to_string(),
            private_key: "priv-token-456".to_string(),
            ipv6: Some("2001:db8::1".to_string()),
            selected_pair: Some("BTCUSDT".to_string()),
        }
    }

    #[test]
    fn seal_encrypts_only_sensitive_fields() {
        let mut s = settings();
        seal_settings(&mut s, "genesis-1").unwrap();

        assert!(cipher::is_encrypted(&s.public_key));
        assert!(cipher::is_encrypted(&s.private_key));
        assert_eq!(s.ipv6.as_deref(), Some("2001:db8::1"));
        assert_eq!(s.selected_pair.as_deref(), Some("BTCUSDT"));
    }

    #[test]
    fn seal_then_open_roundtrips() {
        let mut s = settings();
        seal_settings(&mut s, "genesis-1").unwrap();
        open_settings(&mut s, "genesis-1");

        assert_eq!(s.public_key, "pub-token-123");
        assert_eq!(s.private_key, "priv-token-456");
    }

    #[test]
    fn seal_is_idempotent() {
        let mut s = settings();
        seal_settings(&mut s, "genesis-1").unwrap();
        let sealed_once = s.clone();
        seal_settings(&mut s, "genesis-1").unwrap();

        assert_eq!(s.public_key, sealed_once.public_key);
        assert_eq!(s.private_key, sealed_once.private_key);
    }

    #[test]
    fn seal_skips_empty_fields() {
        let mut s = ExchangeSettings::default();
        seal_settings(&mut s, "genesis-1").unwrap();

        assert_eq!(s.public_key, "");
        assert_eq!(s.private_key, "");
    }

    #[test]
    fn open_under_wrong_identity_keeps_ciphertext() {
        let mut s = settings();
        seal_settings(&mut s, "genesis-1").unwrap();
        let sealed = s.clone();

        open_settings(&mut s, "genesis-2");

        // Undecryptable fields keep their ciphertext for later re-prompt.
        assert_eq!(s.public_key, sealed.public_key);
        assert_eq!(s.private_key, sealed.private_key);
        assert!(cipher::is_encrypted(&s.public_key));
    }

    #[test]
    fn open_passes_legacy_plaintext_through() {
        let mut s = settings();
        open_settings(&mut s, "genesis-1");

        assert_eq!(s.public_key, "pub-token-123");
        assert_eq!(s.private_key, "priv-token-456");
    }

    #[test]
    fn settings_serde_roundtrip() {
        let mut s = settings();
        seal_settings(&mut s, "genesis-1").unwrap();

        let json = serde_json::to_string(&s).unwrap();
        let mut restored: ExchangeSettings = serde_json::from_str(&json).unwrap();
        open_settings(&mut restored, "genesis-1");

        assert_eq!(restored.public_key, "pub-token-123");
        assert_eq!(restored.private_key, "priv-token-456");
    }

    #[test]
    fn secret_field_lifecycle() {
        let mut field = SecretField::new(SecretFieldName::PrivateKey, "priv-token-456");
        assert!(!field.is_encrypted());

        field.seal("genesis-1").unwrap();
        assert!(field.is_encrypted());

        use secrecy::ExposeSecret;
        let revealed = field.reveal("genesis-1").unwrap();
        assert_eq!(revealed.expose_secret(), "priv-token-456");

        assert!(field.reveal("genesis-2").is_none());
    }

    #[test]
    fn field_name_display_roundtrip() {
        for name in SecretFieldName::ALL {
            let s = name.to_string();
            assert_eq!(SecretFieldName::from_str(&s).unwrap(), name);
        }
        assert_eq!(SecretFieldName::PublicKey.to_string(), "public_key");
    }

    #[test]
    fn debug_output_masks_credentials() {
        let s = settings();
        let debug = format!("{s:?}");
        assert!(!debug.contains("pub-token-123"));
        assert!(!debug.contains("priv-token-456"));
    }

    #[test]
    fn mask_value_shapes() {
        assert_eq!(mask_value(""), "");
        assert_eq!(mask_value("short"), "****");
        assert_eq!(mask_value("pub-token-123"), "pub-toke...");
    }
}
