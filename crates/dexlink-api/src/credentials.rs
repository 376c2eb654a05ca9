// SPDX-FileCopyrightText: 2026 Dexlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exchange API credentials.
//!
//! The public key travels in the `X-API-Key` header; the private key never
//! leaves the process -- it is only fed into the request signer.

use dexlink_vault::{cipher, ExchangeSettings, SecretFieldName};
use secrecy::SecretString;

/// A decrypted credential pair for the exchange's private API.
///
/// Debug output intentionally omits both tokens.
#[derive(Clone)]
pub struct ApiCredentials {
    api_key: String,
    api_secret: SecretString,
}

impl ApiCredentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Recover credentials from a restored settings blob.
    ///
    /// Handles both marked ciphertext and legacy plaintext values. Returns
    /// `None` when either field is missing or fails to decrypt under this
    /// identity -- the caller should re-prompt for credentials.
    pub fn from_settings(settings: &ExchangeSettings, genesis: &str) -> Option<Self> {
        let public = settings.field(SecretFieldName::PublicKey);
        let private = settings.field(SecretFieldName::PrivateKey);
        if public.is_empty() || private.is_empty() {
            return None;
        }

        let api_key = cipher::decrypt(public, genesis)?;
        let api_secret = cipher::decrypt(private, genesis)?;
        Some(Self::new(api_key, api_secret))
    }

    /// The public key token, sent as `X-API-Key`.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The signing secret.
    pub fn api_secret(&self) -> &SecretString {
        &self.api_secret
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"[redacted]")
            .field("api_secret", &"[redacted]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dexlink_vault::seal_settings;
    use secrecy::ExposeSecret;

    #[test]
    fn debug_redacts_both_tokens() {
        let creds = ApiCredentials::new("pub-123", "priv-456");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("pub-123"));
        assert!(!debug.contains("priv-456"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn from_settings_decrypts_sealed_credentials() {
        let mut settings = ExchangeSettings {
            public_key: "pub-123".to_string(),
            private_key: "priv-456".to_string(),
            ..Default::default()
        };
        seal_settings(&mut settings, "genesis-1").unwrap();

        let creds = ApiCredentials::from_settings(&settings, "genesis-1").unwrap();
        assert_eq!(creds.api_key(), "pub-123");
        assert_eq!(creds.api_secret().expose_secret(), "priv-456");
    }

    #[test]
    fn from_settings_accepts_legacy_plaintext() {
        let settings = ExchangeSettings {
            public_key: "pub-123".to_string(),
            private_key: "priv-456".to_string(),
            ..Default::default()
        };

        let creds = ApiCredentials::from_settings(&settings, "genesis-1").unwrap();
        assert_eq!(creds.api_key(), "pub-123");
    }

    #[test]
    fn from_settings_fails_under_wrong_identity() {
        let mut settings = ExchangeSettings {
            public_key: "pub-123".to_string(),
            private_key: "priv-456".to_string(),
            ..Default::default()
        };
        seal_settings(&mut settings, "genesis-1").unwrap();

        assert!(ApiCredentials::from_settings(&settings, "genesis-2").is_none());
    }

    #[test]
    fn from_settings_requires_both_fields() {
        let settings = ExchangeSettings {
            public_key: "pub-123".to_string(),
            ..Default::default()
        };
        assert!(ApiCredentials::from_settings(&settings, "g").is_none());
    }
}
