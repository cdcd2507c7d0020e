//! HMAC-SHA256 signature generation for Coinbase API authentication.
//!
//! Every API key request carries four headers. The signature is computed as:
//! ```text
//! hex(HMAC-SHA256(secret, timestamp + METHOD + requestPath + body))
//! ```
//!
//! `timestamp` is the same value sent in `CB-ACCESS-TIMESTAMP`, `METHOD` is
//! upper case, and `body` is the empty string for requests without one.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::error::CoinbaseError;

type HmacSha256 = Hmac<Sha256>;

/// API version header.
pub const CB_VERSION: &str = "CB-VERSION";
/// API key header.
pub const CB_ACCESS_KEY: &str = "CB-ACCESS-KEY";
/// Signature header.
pub const CB_ACCESS_SIGN: &str = "CB-ACCESS-SIGN";
/// Timestamp header.
pub const CB_ACCESS_TIMESTAMP: &str = "CB-ACCESS-TIMESTAMP";

/// Sign a request for the Coinbase v2 API.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `timestamp` - Seconds since the UNIX epoch, as sent in `CB-ACCESS-TIMESTAMP`
/// * `method` - HTTP method, upper-cased before signing
/// * `request_path` - Absolute request path (e.g., "/v2/accounts")
/// * `body` - The exact request body, or "" for GET requests
///
/// # Returns
///
/// Lowercase hex-encoded HMAC-SHA256 signature.
///
/// # Example
///
/// ```rust
/// use coinbase_api_client::auth::{Credentials, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "api_secret");
/// let signature = sign_request(&credentials, 1700000000, "GET", "/v2/accounts", "")?;
/// assert_eq!(signature.len(), 64);
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    credentials: &Credentials,
    timestamp: u64,
    method: &str,
    request_path: &str,
    body: &str,
) -> Result<String, CoinbaseError> {
    let mut mac = HmacSha256::new_from_slice(credentials.expose_secret().as_bytes())
        .map_err(|e| CoinbaseError::Auth(format!("Invalid HMAC key: {e}")))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(method.to_ascii_uppercase().as_bytes());
    mac.update(request_path.as_bytes());
    mac.update(body.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// The four signing headers attached to an authenticated request.
///
/// The dispatcher only forwards these values. Use [`SignedHeaders::sign`] to
/// compute them from credentials, or [`SignedHeaders::new`] when the
/// signature was produced elsewhere.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// `CB-VERSION`
    pub api_version: String,
    /// `CB-ACCESS-KEY`
    pub api_key: String,
    /// `CB-ACCESS-SIGN`
    pub signature: String,
    /// `CB-ACCESS-TIMESTAMP`
    pub timestamp: u64,
}

impl SignedHeaders {
    /// Wrap a precomputed signature.
    pub fn new(
        api_version: impl Into<String>,
        api_key: impl Into<String>,
        signature: impl Into<String>,
        timestamp: u64,
    ) -> Self {
        Self {
            api_version: api_version.into(),
            api_key: api_key.into(),
            signature: signature.into(),
            timestamp,
        }
    }

    /// Sign a request and collect its headers.
    ///
    /// The stored timestamp is the one that went into the signature.
    pub fn sign(
        credentials: &Credentials,
        api_version: impl Into<String>,
        timestamp: u64,
        method: &str,
        request_path: &str,
        body: &str,
    ) -> Result<Self, CoinbaseError> {
        let signature = sign_request(credentials, timestamp, method, request_path, body)?;
        Ok(Self::new(
            api_version,
            credentials.api_key.clone(),
            signature,
            timestamp,
        ))
    }

    /// Check that every header has a value.
    pub fn validate(&self) -> Result<(), CoinbaseError> {
        let missing = [
            (CB_VERSION, self.api_version.trim().is_empty()),
            (CB_ACCESS_KEY, self.api_key.trim().is_empty()),
            (CB_ACCESS_SIGN, self.signature.trim().is_empty()),
            (CB_ACCESS_TIMESTAMP, self.timestamp == 0),
        ]
        .into_iter()
        .find(|(_, empty)| *empty);

        match missing {
            Some((name, _)) => Err(CoinbaseError::Auth(format!("{name} header is empty"))),
            None => Ok(()),
        }
    }

    /// Header name/value pairs in the order they are sent.
    pub fn pairs(&self) -> [(&'static str, String); 4] {
        [
            (CB_VERSION, self.api_version.clone()),
            (CB_ACCESS_KEY, self.api_key.clone()),
            (CB_ACCESS_SIGN, self.signature.clone()),
            (CB_ACCESS_TIMESTAMP, self.timestamp.to_string()),
        ]
    }
}

impl std::fmt::Debug for SignedHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedHeaders")
            .field("api_version", &self.api_version)
            .field("api_key", &self.api_key)
            .field("signature", &"[REDACTED]")
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_known_vector() {
        let credentials = Credentials::new("key", "test_secret");
        let signature =
            sign_request(&credentials, 1700000000, "GET", "/v2/accounts", "").unwrap();
        assert_eq!(
            signature,
            "385f272c1a50cb77af1921fdf020f22515d0944638ed009f3f05d61363e0dc17"
        );
    }

    #[test]
    fn test_signature_with_body() {
        let credentials = Credentials::new("key", "test_secret");
        let signature = sign_request(
            &credentials,
            1700000000,
            "POST",
            "/accounts/123/buys",
            r#"{"amount":"10","currency":"BTC"}"#,
        )
        .unwrap();
        assert_eq!(
            signature,
            "e58079e38dc7f8f893e9d33454716b1736221e52f9cf9d0999dcb6c9553e15b2"
        );
    }

    #[test]
    fn test_signature_uppercases_method() {
        let credentials = Credentials::new("key", "test_secret");
        let lower = sign_request(&credentials, 1700000000, "get", "/v2/accounts", "").unwrap();
        let upper = sign_request(&credentials, 1700000000, "GET", "/v2/accounts", "").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_signature_consistency() {
        let credentials = Credentials::new("key", "my_secret");
        let sig1 = sign_request(&credentials, 12345, "GET", "/v2/payment-methods", "").unwrap();
        let sig2 = sign_request(&credentials, 12345, "GET", "/v2/payment-methods", "").unwrap();
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_signature_changes_with_inputs() {
        let credentials = Credentials::new("key", "my_secret");
        let base = sign_request(&credentials, 12345, "GET", "/v2/accounts", "").unwrap();

        let other_ts = sign_request(&credentials, 12346, "GET", "/v2/accounts", "").unwrap();
        let other_method = sign_request(&credentials, 12345, "POST", "/v2/accounts", "").unwrap();
        let other_path = sign_request(&credentials, 12345, "GET", "/v2/accounts/BTC", "").unwrap();
        let other_body = sign_request(&credentials, 12345, "GET", "/v2/accounts", "{}").unwrap();

        assert_ne!(base, other_ts);
        assert_ne!(base, other_method);
        assert_ne!(base, other_path);
        assert_ne!(base, other_body);
    }

    #[test]
    fn test_signed_headers_share_timestamp() {
        let credentials = Credentials::new("my_key", "my_secret");
        let headers =
            SignedHeaders::sign(&credentials, "2017-11-26", 1700000000, "GET", "/v2/accounts", "")
                .unwrap();

        assert_eq!(headers.timestamp, 1700000000);
        assert_eq!(headers.api_key, "my_key");
        assert_eq!(
            headers.signature,
            sign_request(&credentials, 1700000000, "GET", "/v2/accounts", "").unwrap()
        );
        assert!(headers.validate().is_ok());
    }

    #[test]
    fn test_signed_headers_validate_rejects_empty() {
        let headers = SignedHeaders::new("2017-11-26", "key", "", 1700000000);
        match headers.validate() {
            Err(CoinbaseError::Auth(msg)) => assert!(msg.contains(CB_ACCESS_SIGN)),
            other => panic!("unexpected result: {other:?}"),
        }

        let headers = SignedHeaders::new("2017-11-26", "key", "abc", 0);
        assert!(headers.validate().is_err());
    }

    #[test]
    fn test_signed_headers_debug_redacted() {
        let headers = SignedHeaders::new("2017-11-26", "key", "deadbeef", 1);
        let debug_str = format!("{:?}", headers);
        assert!(!debug_str.contains("deadbeef"));
        assert!(debug_str.contains("[REDACTED]"));
    }
}
