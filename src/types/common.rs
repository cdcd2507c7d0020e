//! Common value shapes shared by Coinbase v2 resources.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount of money in a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount, sent by the API as a string.
    pub amount: Decimal,
    /// Currency code (e.g. "BTC", "USD").
    pub currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// A reference to another resource, as embedded in buys and sells.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceRef {
    pub id: String,
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub resource_path: Option<String>,
}

/// Pagination block of list responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub ending_before: Option<String>,
    #[serde(default)]
    pub starting_after: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub previous_uri: Option<String>,
    #[serde(default)]
    pub next_uri: Option<String>,
}

impl Pagination {
    /// Whether the server reported another page.
    pub fn has_next(&self) -> bool {
        self.next_uri.as_deref().is_some_and(|uri| !uri.is_empty())
    }
}

/// A non-fatal notice attached to a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Warning {
    pub id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Envelope of every successful v2 response: `{"data": ..., "pagination": ..., "warnings": [...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub warnings: Vec<Warning>,
}
