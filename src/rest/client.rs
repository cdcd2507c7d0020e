//! Coinbase v2 REST API client implementation.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use url::Url;

use crate::auth::SignedHeaders;
use crate::error::{ApiError, CoinbaseError};
use crate::rest::endpoints::{
    COINBASE_BASE_URL, COINBASE_SANDBOX_URL, JSON_CONTENT_TYPE, PreparedRequest,
};
use crate::types::{Account, Buy, CreateAccountRequest, DataResponse, PaymentMethod, Sell, TradeRequest};

/// The Coinbase v2 REST dispatcher.
///
/// Every call takes the four signing headers precomputed by the caller and
/// forwards them unchanged. The client holds no credentials, so it can be
/// shared freely between tasks.
///
/// # Example
///
/// ```rust,no_run
/// use coinbase_api_client::auth::{Credentials, SignedHeaders};
/// use coinbase_api_client::rest::{CoinbaseRestClient, DEFAULT_API_VERSION, PreparedRequest};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = CoinbaseRestClient::new();
///     let credentials = Credentials::new("api_key", "api_secret");
///
///     let request = PreparedRequest::get_account("BTC")?;
///     let headers = SignedHeaders::sign(
///         &credentials,
///         DEFAULT_API_VERSION,
///         1700000000,
///         request.method().as_str(),
///         &client.request_path(&request)?,
///         request.signing_body(),
///     )?;
///
///     let account = client.get_account(&headers, "BTC").await?;
///     println!("{}: {}", account.name, account.balance);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CoinbaseRestClient {
    http_client: ClientWithMiddleware,
    idempotent_client: ClientWithMiddleware,
    base_url: String,
}

impl CoinbaseRestClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> CoinbaseRestClientBuilder {
        CoinbaseRestClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, request: &PreparedRequest) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), request.path())
    }

    /// The absolute path a request is sent to, which is what gets signed.
    ///
    /// Against the production base URL, `accounts` becomes `/v2/accounts`.
    pub fn request_path(&self, request: &PreparedRequest) -> Result<String, CoinbaseError> {
        let url = Url::parse(&self.url_for(request))?;
        Ok(url.path().to_string())
    }

    /// Send a prepared request with its signing headers.
    ///
    /// GET requests go through the retrying client when retries are
    /// enabled; POST requests are always sent exactly once.
    pub async fn dispatch<T>(
        &self,
        request: &PreparedRequest,
        headers: &SignedHeaders,
    ) -> Result<DataResponse<T>, CoinbaseError>
    where
        T: serde::de::DeserializeOwned,
    {
        headers.validate()?;

        let client = if request.is_idempotent() {
            &self.idempotent_client
        } else {
            &self.http_client
        };

        let url = self.url_for(request);
        let mut builder = client
            .request(request.method().clone(), &url)
            .header(ACCEPT, JSON_CONTENT_TYPE);
        for (name, value) in headers.pairs() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body() {
            builder = builder
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(body.to_string());
        }

        tracing::debug!(method = %request.method(), path = request.path(), "sending Coinbase request");
        let response = builder.send().await?;
        self.parse_response(response).await
    }

    /// Parse a response from the Coinbase v2 API.
    ///
    /// - Success: `{ "data": ..., "pagination": ..., "warnings": [...] }`
    /// - Error: `{ "errors": [{ "id": "...", "message": "..." }] }` with a non-2xx status
    async fn parse_response<T>(
        &self,
        response: reqwest::Response,
    ) -> Result<DataResponse<T>, CoinbaseError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let error = ApiError::from_body(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), code = %error.code, "Coinbase API error");
            return Err(CoinbaseError::Api(error));
        }

        let parsed = serde_json::from_str::<DataResponse<T>>(&body).map_err(|e| {
            CoinbaseError::InvalidResponse(format!("Failed to parse response: {}. Body: {}", e, body))
        })?;
        for warning in &parsed.warnings {
            tracing::warn!(id = %warning.id, "Coinbase API warning: {}", warning.message);
        }
        Ok(parsed)
    }

    // Accounts.

    /// List the user's accounts.
    pub async fn get_accounts(&self, headers: &SignedHeaders) -> Result<Vec<Account>, CoinbaseError> {
        let response = self.dispatch(&PreparedRequest::list_accounts(), headers).await?;
        Ok(response.data)
    }

    /// Get one account by currency code or account id.
    ///
    /// An unknown identifier yields an API error with `is_not_found()`.
    pub async fn get_account(
        &self,
        headers: &SignedHeaders,
        currency: &str,
    ) -> Result<Account, CoinbaseError> {
        let response = self
            .dispatch(&PreparedRequest::get_account(currency)?, headers)
            .await?;
        Ok(response.data)
    }

    /// Create a new wallet account.
    pub async fn create_account(
        &self,
        headers: &SignedHeaders,
        payload: &CreateAccountRequest,
    ) -> Result<Account, CoinbaseError> {
        let response = self
            .dispatch(&PreparedRequest::create_account(payload)?, headers)
            .await?;
        Ok(response.data)
    }

    // Payment methods.

    /// List the user's payment methods.
    pub async fn get_payment_methods(
        &self,
        headers: &SignedHeaders,
    ) -> Result<Vec<PaymentMethod>, CoinbaseError> {
        let response = self
            .dispatch(&PreparedRequest::list_payment_methods(), headers)
            .await?;
        Ok(response.data)
    }

    // Trading.

    /// Buy crypto into an account. Never retried.
    pub async fn buy(
        &self,
        headers: &SignedHeaders,
        account_id: &str,
        payload: &TradeRequest,
    ) -> Result<Buy, CoinbaseError> {
        let response = self
            .dispatch(&PreparedRequest::buy(account_id, payload)?, headers)
            .await?;
        Ok(response.data)
    }

    /// Sell crypto from an account. Never retried.
    pub async fn sell(
        &self,
        headers: &SignedHeaders,
        account_id: &str,
        payload: &TradeRequest,
    ) -> Result<Sell, CoinbaseError> {
        let response = self
            .dispatch(&PreparedRequest::sell(account_id, payload)?, headers)
            .await?;
        Ok(response.data)
    }
}

impl Default for CoinbaseRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CoinbaseRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinbaseRestClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Builder for [`CoinbaseRestClient`].
pub struct CoinbaseRestClientBuilder {
    base_url: String,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    max_retries: u32,
}

impl CoinbaseRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: COINBASE_BASE_URL.to_string(),
            user_agent: None,
            timeout: None,
            max_retries: 0,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Use the sandbox environment.
    pub fn use_sandbox(mut self) -> Self {
        self.base_url = COINBASE_SANDBOX_URL.to_string();
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a timeout for each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries for transient failures of GET requests.
    ///
    /// Defaults to 0. Buy, sell and account creation are never retried.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the client.
    pub fn build(self) -> CoinbaseRestClient {
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("coinbase-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("coinbase-api-client"));
        headers.insert(USER_AGENT, header_value);

        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let http_client = ClientBuilder::new(reqwest_client.clone())
            .with(TracingMiddleware::default())
            .build();

        let idempotent_client = if self.max_retries > 0 {
            let retry_policy =
                ExponentialBackoff::builder().build_with_max_retries(self.max_retries);
            ClientBuilder::new(reqwest_client)
                .with(TracingMiddleware::default())
                .with(RetryTransientMiddleware::new_with_policy(retry_policy))
                .build()
        } else {
            http_client.clone()
        };

        CoinbaseRestClient {
            http_client,
            idempotent_client,
            base_url: self.base_url,
        }
    }
}

impl Default for CoinbaseRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_path_includes_base_path() {
        let client = CoinbaseRestClient::new();
        let request = PreparedRequest::get_account("BTC").unwrap();
        assert_eq!(client.request_path(&request).unwrap(), "/v2/accounts/BTC");
    }

    #[test]
    fn test_request_path_with_trailing_slash_base() {
        let client = CoinbaseRestClient::builder()
            .base_url("http://127.0.0.1:8080/")
            .build();
        let request = PreparedRequest::list_payment_methods();
        assert_eq!(client.request_path(&request).unwrap(), "/payment-methods");
    }

    #[test]
    fn test_invalid_base_url() {
        let client = CoinbaseRestClient::builder().base_url("not a url").build();
        let err = client
            .request_path(&PreparedRequest::list_accounts())
            .unwrap_err();
        assert!(matches!(err, CoinbaseError::Url(_)));
    }

    #[test]
    fn test_debug_output() {
        let client = CoinbaseRestClient::builder().use_sandbox().build();
        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("api.sandbox.coinbase.com"));
    }
}
