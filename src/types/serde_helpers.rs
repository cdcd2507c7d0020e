//! Custom serde helpers for fields whose shape changed between API versions.

use serde::{Deserialize, Deserializer};

/// Deserialize a currency that is either a bare code or an object with a `code`.
///
/// Older API versions send `"currency": "BTC"`, newer ones send
/// `"currency": {"code": "BTC", "name": "Bitcoin", ...}`.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use coinbase_api_client::types::serde_helpers::currency_code;
///
/// #[derive(Deserialize)]
/// struct Row {
///     #[serde(deserialize_with = "currency_code::deserialize")]
///     currency: String,
/// }
///
/// let a: Row = serde_json::from_str(r#"{"currency": "BTC"}"#).unwrap();
/// let b: Row = serde_json::from_str(r#"{"currency": {"code": "BTC", "name": "Bitcoin"}}"#).unwrap();
/// assert_eq!(a.currency, b.currency);
/// ```
pub mod currency_code {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CurrencyField {
        Code(String),
        Object { code: String },
    }

    /// Deserialize either shape into the currency code.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match CurrencyField::deserialize(deserializer)? {
            CurrencyField::Code(code) => code,
            CurrencyField::Object { code } => code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(deserialize_with = "currency_code::deserialize")]
        currency: String,
    }

    #[test]
    fn test_currency_code_both_shapes() {
        let row: Row = serde_json::from_str(r#"{"currency": "ETH"}"#).unwrap();
        assert_eq!(row.currency, "ETH");

        let row: Row =
            serde_json::from_str(r#"{"currency": {"code": "ETH", "exponent": 8}}"#).unwrap();
        assert_eq!(row.currency, "ETH");
    }

    #[test]
    fn test_currency_code_rejects_other_shapes() {
        assert!(serde_json::from_str::<Row>(r#"{"currency": 42}"#).is_err());
    }
}
