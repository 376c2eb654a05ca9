// SPDX-FileCopyrightText: 2026 Dexlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed wrappers for the exchange endpoints the module uses.
//!
//! The exchange serializes amounts inconsistently (sometimes JSON numbers,
//! sometimes decimal strings), so the response models decode both forms.
//! Outbound order amounts are pre-formatted as 8-decimal strings; the
//! signature then covers a stable textual form, immune to float-formatting
//! drift between client and server.

use std::collections::HashMap;

use dexlink_core::{DexlinkError, Transport};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::client::ExchangeClient;
use crate::credentials::ApiCredentials;

/// Order side: buy or sell. Serializes as the exchange's numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn code(self) -> u8 {
        match self {
            OrderSide::Buy => 0,
            OrderSide::Sell => 1,
        }
    }
}

impl Serialize for OrderSide {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Order kind. Only limit orders are supported. Serializes as the
/// exchange's numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    Limit,
}

impl OrderKind {
    pub fn code(self) -> u8 {
        match self {
            OrderKind::Limit => 0,
        }
    }
}

impl Serialize for OrderKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// A new order submission.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub type_trade: OrderKind,
    #[serde(rename = "type")]
    pub side: OrderSide,
    /// Price, fixed 8-decimal string.
    pub rate: String,
    /// Amount in base currency, fixed 8-decimal string.
    pub volume: String,
    pub pair: String,
}

impl NewOrder {
    /// A limit order with amounts formatted to the exchange's 8-decimal
    /// convention.
    pub fn limit(side: OrderSide, pair: impl Into<String>, rate: f64, volume: f64) -> Self {
        Self {
            type_trade: OrderKind::Limit,
            side,
            rate: format!("{rate:.8}"),
            volume: format!("{volume:.8}"),
            pair: pair.into(),
        }
    }
}

/// Account balances response.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceSheet {
    #[serde(default)]
    pub list: Vec<BalanceEntry>,
}

impl BalanceSheet {
    /// Available balance per currency code, the form the UI consumes.
    pub fn available_by_iso(&self) -> HashMap<String, f64> {
        self.list
            .iter()
            .filter_map(|entry| entry.iso().map(|iso| (iso.to_string(), entry.available())))
            .collect()
    }
}

/// One currency's balance entry.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceEntry {
    pub currency: CurrencyInfo,
    #[serde(default, deserialize_with = "flexible_opt_f64")]
    pub balance_available: Option<f64>,
    #[serde(default)]
    pub balances: Option<BalanceDetail>,
}

impl BalanceEntry {
    /// Currency code, preferring the ISO form.
    pub fn iso(&self) -> Option<&str> {
        self.currency
            .iso3
            .as_deref()
            .or(self.currency.name.as_deref())
    }

    /// Available amount, whichever shape the server used.
    pub fn available(&self) -> f64 {
        self.balances
            .as_ref()
            .and_then(|detail| detail.available)
            .or(self.balance_available)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyInfo {
    #[serde(default)]
    pub iso3: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BalanceDetail {
    #[serde(default, deserialize_with = "flexible_opt_f64")]
    pub available: Option<f64>,
}

/// Order book for one trading pair.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderBook {
    #[serde(default)]
    pub buy: Vec<OrderBookLevel>,
    #[serde(default)]
    pub sell: Vec<OrderBookLevel>,
}

/// One price level of the order book.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBookLevel {
    #[serde(deserialize_with = "flexible_f64")]
    pub rate: f64,
    #[serde(deserialize_with = "flexible_f64")]
    pub volume: f64,
    #[serde(default)]
    pub count: Option<u64>,
}

/// Decode a JSON number or a decimal string into f64.
fn flexible_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Str(String),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn flexible_opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Str(String),
        None,
    }
    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(Some(n)),
        Raw::Str(s) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
        Raw::None => Ok(None),
    }
}

impl<T: Transport> ExchangeClient<T> {
    /// Account balances for every currency.
    pub async fn account_balances(
        &self,
        credentials: &ApiCredentials,
    ) -> Result<BalanceSheet, DexlinkError> {
        self.private_post("/v1/private/balances", &serde_json::json!({}), credentials)
            .await
    }

    /// Recent order history.
    pub async fn order_history(
        &self,
        limit: u32,
        credentials: &ApiCredentials,
    ) -> Result<Value, DexlinkError> {
        self.private_post(
            "/v1/private/history",
            &serde_json::json!({"limit": limit}),
            credentials,
        )
        .await
    }

    /// Submit a new order.
    pub async fn create_order(
        &self,
        order: &NewOrder,
        credentials: &ApiCredentials,
    ) -> Result<Value, DexlinkError> {
        self.private_post("/v1/private/create-order", order, credentials)
            .await
    }

    /// Order book for a trading pair.
    pub async fn order_book(&self, pair: &str) -> Result<OrderBook, DexlinkError> {
        self.public_get(&format!("/v1/public/book?pair={pair}")).await
    }

    /// Ticker for a trading pair.
    pub async fn ticker(&self, pair: &str) -> Result<Value, DexlinkError> {
        self.public_get(&format!("/v1/public/ticker?pair={pair}")).await
    }

    /// All listed trading pairs.
    pub async fn symbols(&self) -> Result<Value, DexlinkError> {
        self.public_get("/v1/public/symbols").await
    }
}
