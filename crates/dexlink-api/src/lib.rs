// SPDX-FileCopyrightText: 2026 Dexlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exchange API client for the Dexlink module.
//!
//! Builds fully authenticated requests -- anti-replay id merged into the
//! body, canonical signature in `X-Auth-Sign`, key in `X-API-Key` -- and
//! hands them to the host's [`Transport`](dexlink_core::Transport) for
//! dispatch. No I/O happens in this crate.

pub mod client;
pub mod credentials;
pub mod endpoints;

pub use client::{ExchangeClient, DEFAULT_BASE_URL};
pub use credentials::ApiCredentials;
pub use endpoints::{BalanceEntry, BalanceSheet, NewOrder, OrderBook, OrderBookLevel, OrderKind, OrderSide};
