// SPDX-FileCopyrightText: 2026 Dexlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request authentication for the Dexlink exchange-integration module.
//!
//! Every private exchange call carries an `X-Auth-Sign` header: a SHA-256
//! digest over a canonical flattening of the request body plus the user's
//! API secret. The canonical form is key-order independent, so client and
//! server recompute the same digest no matter how either side's JSON maps
//! iterate. The body also carries a fresh anti-replay request id, covered
//! by the signature as an ordinary field.

pub mod request_id;
pub mod signer;

pub use request_id::RequestIdSource;
pub use signer::{sign, sign_body};
