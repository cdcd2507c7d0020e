//! REST endpoint constants and request descriptors.

use reqwest::Method;

use crate::error::CoinbaseError;
use crate::types::{CreateAccountRequest, TradeRequest};

/// Base URL for the Coinbase v2 production API.
pub const COINBASE_BASE_URL: &str = "https://api.coinbase.com/v2";

/// Base URL for the Coinbase v2 sandbox API.
pub const COINBASE_SANDBOX_URL: &str = "https://api.sandbox.coinbase.com/v2";

/// `CB-VERSION` sent when none is configured.
pub const DEFAULT_API_VERSION: &str = "2017-11-26";

/// Content type of every request body and response.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Path templates, relative to the base URL.
pub mod paths {
    /// List or create accounts.
    pub const ACCOUNTS: &str = "accounts";

    /// List payment methods.
    pub const PAYMENT_METHODS: &str = "payment-methods";

    /// Buys of an account: `accounts/{account}/buys`.
    pub const BUYS: &str = "buys";

    /// Sells of an account: `accounts/{account}/sells`.
    pub const SELLS: &str = "sells";
}

/// One endpoint call: method, path with parameters substituted, and body.
///
/// The body is serialized once here; the same string is signed and sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    method: Method,
    path: String,
    body: Option<String>,
}

impl PreparedRequest {
    fn get(path: String) -> Self {
        Self {
            method: Method::GET,
            path,
            body: None,
        }
    }

    fn post<P: serde::Serialize>(path: String, payload: &P) -> Result<Self, CoinbaseError> {
        Ok(Self {
            method: Method::POST,
            path,
            body: Some(serde_json::to_string(payload)?),
        })
    }

    /// `GET accounts`
    pub fn list_accounts() -> Self {
        Self::get(paths::ACCOUNTS.to_string())
    }

    /// `GET accounts/{currency}`; accepts a currency code or an account id.
    pub fn get_account(currency: &str) -> Result<Self, CoinbaseError> {
        let currency = path_segment(currency, "currency")?;
        Ok(Self::get(format!("{}/{}", paths::ACCOUNTS, currency)))
    }

    /// `POST accounts`
    pub fn create_account(payload: &CreateAccountRequest) -> Result<Self, CoinbaseError> {
        if payload.name.trim().is_empty() {
            return Err(CoinbaseError::InvalidRequest(
                "account name must not be empty".to_string(),
            ));
        }
        Self::post(paths::ACCOUNTS.to_string(), payload)
    }

    /// `GET payment-methods`
    pub fn list_payment_methods() -> Self {
        Self::get(paths::PAYMENT_METHODS.to_string())
    }

    /// `POST accounts/{account}/buys`
    pub fn buy(account_id: &str, payload: &TradeRequest) -> Result<Self, CoinbaseError> {
        Self::trade(account_id, paths::BUYS, payload)
    }

    /// `POST accounts/{account}/sells`
    pub fn sell(account_id: &str, payload: &TradeRequest) -> Result<Self, CoinbaseError> {
        Self::trade(account_id, paths::SELLS, payload)
    }

    fn trade(account_id: &str, kind: &str, payload: &TradeRequest) -> Result<Self, CoinbaseError> {
        let account_id = path_segment(account_id, "account")?;
        payload.validate()?;
        Self::post(
            format!("{}/{}/{}", paths::ACCOUNTS, account_id, kind),
            payload,
        )
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the base URL, without a leading slash.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// The body as it enters the signature: empty when there is none.
    pub fn signing_body(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    /// Whether the request may be repeated without side effects.
    pub fn is_idempotent(&self) -> bool {
        self.method == Method::GET
    }
}

/// Check a path parameter. Identifiers are used verbatim, so anything that
/// would need escaping is refused.
fn path_segment<'a>(value: &'a str, name: &str) -> Result<&'a str, CoinbaseError> {
    if value.is_empty() {
        return Err(CoinbaseError::InvalidRequest(format!(
            "{name} must not be empty"
        )));
    }
    let unreserved = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~');
    if !value.chars().all(unreserved) || value == "." || value == ".." {
        return Err(CoinbaseError::InvalidRequest(format!(
            "{name} contains characters not allowed in a path segment: {value:?}"
        )));
    }
    Ok(value)
}
