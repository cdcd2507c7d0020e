//! Buy and sell requests and their results.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::CoinbaseError;
use crate::types::{Money, ResourceRef};

/// Request body for `POST accounts/{account}/buys` and `.../sells`.
///
/// Exactly one of `amount` (in crypto) or `total` (in fiat, fees included)
/// must be set.
///
/// # Example
///
/// ```rust
/// use coinbase_api_client::types::TradeRequest;
/// use rust_decimal::Decimal;
///
/// let request = TradeRequest::with_amount(Decimal::new(10, 0), "BTC")
///     .payment_method("83562370-3e5c-51db-87da-752af5ab9559")
///     .commit(false);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeRequest {
    /// Amount of crypto to buy or sell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Total fiat amount, fees included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
    /// Currency of `amount` or `total`.
    pub currency: String,
    /// Payment method id; the primary method is used when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Accept that the crypto amount may change if the price moves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agree_btc_amount_varies: Option<bool>,
    /// When false the trade is created uncommitted and must be committed separately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<bool>,
    /// Only return a price quote, do not create the trade.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<bool>,
}

impl TradeRequest {
    /// Trade an amount of crypto.
    pub fn with_amount(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            total: None,
            currency: currency.into(),
            payment_method: None,
            agree_btc_amount_varies: None,
            commit: None,
            quote: None,
        }
    }

    /// Trade for a total fiat amount, fees included.
    pub fn with_total(total: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount: None,
            total: Some(total),
            ..Self::with_amount(Decimal::ZERO, currency)
        }
    }

    pub fn payment_method(mut self, id: impl Into<String>) -> Self {
        self.payment_method = Some(id.into());
        self
    }

    pub fn agree_btc_amount_varies(mut self, agree: bool) -> Self {
        self.agree_btc_amount_varies = Some(agree);
        self
    }

    pub fn commit(mut self, commit: bool) -> Self {
        self.commit = Some(commit);
        self
    }

    pub fn quote(mut self, quote: bool) -> Self {
        self.quote = Some(quote);
        self
    }

    /// Reject requests the API would refuse outright.
    pub fn validate(&self) -> Result<(), CoinbaseError> {
        let value = match (self.amount, self.total) {
            (Some(v), None) | (None, Some(v)) => v,
            _ => {
                return Err(CoinbaseError::InvalidRequest(
                    "exactly one of amount or total must be set".to_string(),
                ));
            }
        };
        if value <= Decimal::ZERO {
            return Err(CoinbaseError::InvalidRequest(format!(
                "trade value must be positive, got {value}"
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(CoinbaseError::InvalidRequest(
                "currency must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Status of a buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    /// Created but not committed
    Created,
    /// Committed and settled
    Completed,
    /// Cancelled
    Canceled,
    /// Any status this client does not know about
    #[serde(other)]
    Unknown,
}

/// Result of a buy or sell.
#[derive(Debug, Clone, Deserialize)]
pub struct Trade {
    pub id: String,
    pub status: TradeStatus,
    #[serde(default)]
    pub payment_method: Option<ResourceRef>,
    /// Transaction created once the trade is committed.
    #[serde(default)]
    pub transaction: Option<ResourceRef>,
    /// Crypto amount.
    pub amount: Money,
    /// Fiat total, fees included.
    pub total: Money,
    /// Fiat amount before fees.
    pub subtotal: Money,
    #[serde(default)]
    pub fee: Option<Money>,
    #[serde(default)]
    pub unit_price: Option<Money>,
    #[serde(default)]
    pub committed: bool,
    #[serde(default)]
    pub instant: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
    /// When the funds arrive.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub payout_at: Option<OffsetDateTime>,
    /// "buy" or "sell".
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub resource_path: String,
}

/// Confirmation of a buy.
pub type Buy = Trade;

/// Confirmation of a sell.
pub type Sell = Trade;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_amount_request() {
        let request = TradeRequest::with_amount(Decimal::new(10, 0), "BTC");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"amount":"10","currency":"BTC"}"#);
    }

    #[test]
    fn test_serialize_total_request_with_options() {
        let request = TradeRequest::with_total(Decimal::new(2500, 2), "USD")
            .payment_method("pm-1")
            .agree_btc_amount_varies(true)
            .commit(false)
            .quote(true);
        let json: serde_json::Value = serde_json::to_value(&request).unwrap();
        assert_eq!(json["total"], "25.00");
        assert_eq!(json["currency"], "USD");
        assert_eq!(json["payment_method"], "pm-1");
        assert_eq!(json["agree_btc_amount_varies"], true);
        assert_eq!(json["commit"], false);
        assert_eq!(json["quote"], true);
        assert!(json.get("amount").is_none());
    }

    #[test]
    fn test_validate_trade_request() {
        assert!(TradeRequest::with_amount(Decimal::ONE, "BTC").validate().is_ok());
        assert!(TradeRequest::with_amount(Decimal::ZERO, "BTC").validate().is_err());
        assert!(TradeRequest::with_amount(Decimal::ONE, " ").validate().is_err());

        let mut both = TradeRequest::with_amount(Decimal::ONE, "BTC");
        both.total = Some(Decimal::ONE);
        assert!(both.validate().is_err());
    }

    #[test]
    fn test_deserialize_buy() {
        let json = r#"{
            "id": "67e0eaec-07d7-54c4-a72c-2e92826897df",
            "status": "completed",
            "payment_method": {
                "id": "83562370-3e5c-51db-87da-752af5ab9559",
                "resource": "payment_method",
                "resource_path": "/v2/payment-methods/83562370-3e5c-51db-87da-752af5ab9559"
            },
            "transaction": {
                "id": "441b9494-b3f0-5b98-b9b0-4d82c21c252a",
                "resource": "transaction",
                "resource_path": "/v2/accounts/2bbf394c/transactions/441b9494"
            },
            "amount": { "amount": "10.00000000", "currency": "BTC" },
            "total": { "amount": "102.01", "currency": "USD" },
            "subtotal": { "amount": "101.00", "currency": "USD" },
            "created_at": "2015-01-31T20:49:02Z",
            "updated_at": "2015-02-11T16:54:02-08:00",
            "resource": "buy",
            "resource_path": "/v2/accounts/2bbf394c/buys/67e0eaec",
            "committed": true,
            "instant": false,
            "fee": { "amount": "1.01", "currency": "USD" },
            "payout_at": "2015-02-18T16:54:00-08:00"
        }"#;
        let buy: Buy = serde_json::from_str(json).unwrap();
        assert_eq!(buy.status, TradeStatus::Completed);
        assert_eq!(buy.amount.amount, Decimal::new(10, 0));
        assert_eq!(buy.fee.unwrap().amount, Decimal::new(101, 2));
        assert!(buy.committed);
        assert!(buy.transaction.is_some());
        assert!(buy.payout_at.is_some());
    }

    #[test]
    fn test_deserialize_uncommitted_sell() {
        let json = r#"{
            "id": "sell-1",
            "status": "created",
            "amount": { "amount": "1.0", "currency": "BTC" },
            "total": { "amount": "9.90", "currency": "USD" },
            "subtotal": { "amount": "10.00", "currency": "USD" },
            "resource": "sell"
        }"#;
        let sell: Sell = serde_json::from_str(json).unwrap();
        assert_eq!(sell.status, TradeStatus::Created);
        assert!(!sell.committed);
        assert!(sell.transaction.is_none());
    }
}
