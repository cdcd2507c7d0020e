//! Payment method resources.

use serde::Deserialize;
use time::OffsetDateTime;

/// A payment method linked to the user (bank account, card, fiat account, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    /// Method type, e.g. "ach_bank_account", "fiat_account", "credit_card".
    #[serde(rename = "type")]
    pub method_type: String,
    pub name: String,
    pub currency: String,
    #[serde(default)]
    pub primary_buy: bool,
    #[serde(default)]
    pub primary_sell: bool,
    #[serde(default)]
    pub allow_buy: bool,
    #[serde(default)]
    pub allow_sell: bool,
    #[serde(default)]
    pub allow_deposit: bool,
    #[serde(default)]
    pub allow_withdraw: bool,
    #[serde(default)]
    pub instant_buy: bool,
    #[serde(default)]
    pub instant_sell: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub resource_path: String,
}
