// SPDX-FileCopyrightText: 2026 Dexlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authenticated request construction over the host transport.
//!
//! Private requests are POSTs whose JSON body carries a fresh `request_id`
//! and whose headers carry `X-API-Key` and the canonical `X-Auth-Sign`
//! digest. The body string handed to the transport is the exact string
//! the signature was computed over.

use dexlink_auth::{signer, RequestIdSource};
use dexlink_core::{ApiRequest, ApiResponse, DexlinkError, Transport};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::credentials::ApiCredentials;

/// The exchange's production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.dex-trade.com";

/// Exchange API client: request construction only, I/O via the transport.
pub struct ExchangeClient<T: Transport> {
    base_url: String,
    pub(crate) transport: T,
    request_ids: RequestIdSource,
}

impl<T: Transport> ExchangeClient<T> {
    /// Client against the production API.
    pub fn new(transport: T) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, transport)
    }

    /// Client against an alternate base URL (sandbox, test double).
    pub fn with_base_url(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            request_ids: RequestIdSource::new(),
        }
    }

    /// Make an authenticated call to a private endpoint.
    ///
    /// The payload must serialize to a JSON object; a fresh `request_id`
    /// is merged in before signing so the signature covers it.
    pub async fn private_post<P, R>(
        &self,
        endpoint: &str,
        payload: &P,
        credentials: &ApiCredentials,
    ) -> Result<R, DexlinkError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let value = serde_json::to_value(payload)
            .map_err(|e| DexlinkError::Signing(format!("payload is not canonicalizable: {e}")))?;
        let Value::Object(mut body) = value else {
            return Err(DexlinkError::Signing(
                "private request payload must be a JSON object".to_string(),
            ));
        };

        body.insert(
            "request_id".to_string(),
            Value::String(self.request_ids.next()),
        );
        let body = Value::Object(body);

        let signature = signer::sign(&body, credentials.api_secret().expose_secret());
        let body_json = serde_json::to_string(&body)
            .map_err(|e| DexlinkError::Internal(format!("body serialization failed: {e}")))?;

        let request = ApiRequest::post(format!("{}{endpoint}", self.base_url), body_json)
            .header("Content-Type", "application/json")
            .header("X-API-Key", credentials.api_key())
            .header("X-Auth-Sign", signature);

        debug!(endpoint, "dispatching private request");
        let raw = self.transport.dispatch(request).await?;
        unwrap_envelope(&raw)
    }

    /// Make an unauthenticated call to a public endpoint.
    pub async fn public_get<R>(&self, endpoint: &str) -> Result<R, DexlinkError>
    where
        R: DeserializeOwned,
    {
        let request = ApiRequest::get(format!("{}{endpoint}", self.base_url))
            .header("Content-Type", "application/json");

        debug!(endpoint, "dispatching public request");
        let raw = self.transport.dispatch(request).await?;
        unwrap_envelope(&raw)
    }
}

/// Parse the `{success, message, data}` envelope and surface failures.
fn unwrap_envelope<R: DeserializeOwned>(raw: &str) -> Result<R, DexlinkError> {
    let envelope: ApiResponse<R> = serde_json::from_str(raw).map_err(|e| DexlinkError::Api {
        message: "malformed response envelope".to_string(),
        source: Some(Box::new(e)),
    })?;

    if !envelope.success {
        return Err(DexlinkError::Api {
            message: envelope
                .message
                .unwrap_or_else(|| "exchange reported failure".to_string()),
            source: None,
        });
    }

    envelope.data.ok_or_else(|| DexlinkError::Api {
        message: "successful response carried no data".to_string(),
        source: None,
    })
}
