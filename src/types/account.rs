//! Account resources.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::Money;
use crate::types::serde_helpers::currency_code;

/// Kind of account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Regular crypto wallet
    Wallet,
    /// Fiat currency account
    Fiat,
    /// Vault with delayed withdrawals
    Vault,
    /// Multi-signature account
    Multisig,
    /// Any type this client does not know about
    #[serde(other)]
    Unknown,
}

/// A Coinbase account (one wallet per currency, plus any user-created ones).
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// Account id (UUID).
    pub id: String,
    /// User-visible account name.
    pub name: String,
    /// Whether this is the primary account for its currency.
    #[serde(default)]
    pub primary: bool,
    /// Account type.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Currency code of the account.
    #[serde(deserialize_with = "currency_code::deserialize")]
    pub currency: String,
    /// Balance in the account's currency.
    pub balance: Money,
    /// Balance converted to the user's native currency.
    #[serde(default)]
    pub native_balance: Option<Money>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
    /// Resource kind, always "account".
    #[serde(default)]
    pub resource: String,
    /// API path of this resource.
    #[serde(default)]
    pub resource_path: String,
}

/// Request for creating a new wallet account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateAccountRequest {
    /// Name of the new account; must be unique for the user.
    pub name: String,
}

impl CreateAccountRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    const ACCOUNT_JSON: &str = r#"{
        "id": "58542935-67b5-56e1-a3f9-42686e07fa40",
        "name": "My Vault",
        "primary": false,
        "type": "vault",
        "currency": "BTC",
        "balance": { "amount": "4.00000000", "currency": "BTC" },
        "native_balance": { "amount": "1856.28", "currency": "USD" },
        "created_at": "2015-01-31T20:49:02Z",
        "updated_at": "2015-01-31T20:49:02Z",
        "resource": "account",
        "resource_path": "/v2/accounts/58542935-67b5-56e1-a3f9-42686e07fa40"
    }"#;

    #[test]
    fn test_deserialize_account() {
        let account: Account = serde_json::from_str(ACCOUNT_JSON).unwrap();
        assert_eq!(account.name, "My Vault");
        assert_eq!(account.account_type, AccountType::Vault);
        assert_eq!(account.currency, "BTC");
        assert_eq!(account.balance.amount, Decimal::new(4, 0));
        assert_eq!(
            account.created_at,
            Some(time::macros::datetime!(2015-01-31 20:49:02 UTC))
        );
        assert!(account.native_balance.is_some());
    }

    #[test]
    fn test_unknown_account_type() {
        let json = r#"{
            "id": "x", "name": "Staking", "type": "staking",
            "currency": {"code": "ETH", "name": "Ethereum"},
            "balance": { "amount": "0", "currency": "ETH" }
        }"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_type, AccountType::Unknown);
        assert_eq!(account.currency, "ETH");
        assert!(account.created_at.is_none());
        assert!(!account.primary);
    }

    #[test]
    fn test_serialize_create_account_request() {
        let request = CreateAccountRequest::new("New hot wallet");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"name":"New hot wallet"}"#);
    }
}
