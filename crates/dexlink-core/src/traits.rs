// SPDX-FileCopyrightText: 2026 Dexlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport trait for the host wallet's network proxy.
//!
//! The host dispatches requests on the module's behalf (proxying,
//! redundancy, and TLS are its concern). Everything on this side of the
//! seam is pure computation, which is what keeps the vault and signer
//! trivially testable.

use async_trait::async_trait;

use crate::error::DexlinkError;
use crate::types::ApiRequest;

/// Adapter for the host's network dispatch function.
///
/// Implementations must send the request exactly as assembled -- headers
/// and body verbatim -- and return the raw response body. Retry policy,
/// timeouts, and connection management all belong to the implementor.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Dispatch a request and return the raw response body.
    async fn dispatch(&self, request: ApiRequest) -> Result<String, DexlinkError>;
}
