//! Client that signs each request before handing it to the dispatcher.

use std::sync::Arc;

use crate::auth::{CredentialsProvider, SignedHeaders, SystemTimestamp, TimestampProvider};
use crate::error::CoinbaseError;
use crate::rest::client::CoinbaseRestClient;
use crate::rest::endpoints::{DEFAULT_API_VERSION, PreparedRequest};
use crate::rest::traits::CoinbaseClient;
use crate::types::{Account, Buy, CreateAccountRequest, PaymentMethod, Sell, TradeRequest};

/// A Coinbase client that holds credentials and signs every call.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use coinbase_api_client::auth::StaticCredentials;
/// use coinbase_api_client::rest::AuthenticatedClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "api_secret"));
///     let client = AuthenticatedClient::builder(credentials).build();
///
///     for method in client.get_payment_methods().await? {
///         println!("{} ({})", method.name, method.method_type);
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct AuthenticatedClient {
    rest: CoinbaseRestClient,
    credentials: Arc<dyn CredentialsProvider>,
    timestamps: Arc<dyn TimestampProvider>,
    api_version: String,
}

impl AuthenticatedClient {
    /// Create a client with default settings for the given credentials.
    pub fn new(credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self::builder(credentials).build()
    }

    /// Create a new client builder.
    pub fn builder(credentials: Arc<dyn CredentialsProvider>) -> AuthenticatedClientBuilder {
        AuthenticatedClientBuilder::new(credentials)
    }

    /// The underlying dispatcher.
    pub fn rest_client(&self) -> &CoinbaseRestClient {
        &self.rest
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Compute the signing headers for a request.
    ///
    /// A single timestamp is taken and used for both the signature and the
    /// `CB-ACCESS-TIMESTAMP` header.
    pub fn sign(&self, request: &PreparedRequest) -> Result<SignedHeaders, CoinbaseError> {
        let request_path = self.rest.request_path(request)?;
        let timestamp = self.timestamps.timestamp();
        SignedHeaders::sign(
            self.credentials.get_credentials(),
            self.api_version.as_str(),
            timestamp,
            request.method().as_str(),
            &request_path,
            request.signing_body(),
        )
    }

    async fn execute<T>(&self, request: PreparedRequest) -> Result<T, CoinbaseError>
    where
        T: serde::de::DeserializeOwned,
    {
        let headers = self.sign(&request)?;
        let response = self.rest.dispatch(&request, &headers).await?;
        Ok(response.data)
    }

    /// List the user's accounts.
    pub async fn get_accounts(&self) -> Result<Vec<Account>, CoinbaseError> {
        self.execute(PreparedRequest::list_accounts()).await
    }

    /// Get one account by currency code or account id.
    pub async fn get_account(&self, currency: &str) -> Result<Account, CoinbaseError> {
        self.execute(PreparedRequest::get_account(currency)?).await
    }

    /// Create a new wallet account.
    pub async fn create_account(
        &self,
        payload: &CreateAccountRequest,
    ) -> Result<Account, CoinbaseError> {
        self.execute(PreparedRequest::create_account(payload)?).await
    }

    /// List the user's payment methods.
    pub async fn get_payment_methods(&self) -> Result<Vec<PaymentMethod>, CoinbaseError> {
        self.execute(PreparedRequest::list_payment_methods()).await
    }

    /// Buy crypto into an account.
    pub async fn buy(&self, account_id: &str, payload: &TradeRequest) -> Result<Buy, CoinbaseError> {
        self.execute(PreparedRequest::buy(account_id, payload)?).await
    }

    /// Sell crypto from an account.
    pub async fn sell(
        &self,
        account_id: &str,
        payload: &TradeRequest,
    ) -> Result<Sell, CoinbaseError> {
        self.execute(PreparedRequest::sell(account_id, payload)?).await
    }
}

impl CoinbaseClient for AuthenticatedClient {
    async fn get_accounts(&self) -> Result<Vec<Account>, CoinbaseError> {
        AuthenticatedClient::get_accounts(self).await
    }

    async fn get_account(&self, currency: &str) -> Result<Account, CoinbaseError> {
        AuthenticatedClient::get_account(self, currency).await
    }

    async fn create_account(&self, payload: &CreateAccountRequest) -> Result<Account, CoinbaseError> {
        AuthenticatedClient::create_account(self, payload).await
    }

    async fn get_payment_methods(&self) -> Result<Vec<PaymentMethod>, CoinbaseError> {
        AuthenticatedClient::get_payment_methods(self).await
    }

    async fn buy(&self, account_id: &str, payload: &TradeRequest) -> Result<Buy, CoinbaseError> {
        AuthenticatedClient::buy(self, account_id, payload).await
    }

    async fn sell(&self, account_id: &str, payload: &TradeRequest) -> Result<Sell, CoinbaseError> {
        AuthenticatedClient::sell(self, account_id, payload).await
    }
}

impl std::fmt::Debug for AuthenticatedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedClient")
            .field("base_url", &self.rest.base_url())
            .field("api_key", &self.credentials.get_credentials().api_key)
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Builder for [`AuthenticatedClient`].
pub struct AuthenticatedClientBuilder {
    credentials: Arc<dyn CredentialsProvider>,
    rest: Option<CoinbaseRestClient>,
    timestamps: Option<Arc<dyn TimestampProvider>>,
    api_version: String,
}

impl AuthenticatedClientBuilder {
    pub fn new(credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self {
            credentials,
            rest: None,
            timestamps: None,
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Use a preconfigured dispatcher (base URL, retries, timeout).
    pub fn rest_client(mut self, rest: CoinbaseRestClient) -> Self {
        self.rest = Some(rest);
        self
    }

    /// Shorthand for a default dispatcher pointed at another base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.rest = Some(CoinbaseRestClient::builder().base_url(url).build());
        self
    }

    /// Set a custom timestamp provider.
    pub fn timestamp_provider(mut self, provider: Arc<dyn TimestampProvider>) -> Self {
        self.timestamps = Some(provider);
        self
    }

    /// Set the `CB-VERSION` header value.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Build the client.
    pub fn build(self) -> AuthenticatedClient {
        AuthenticatedClient {
            rest: self.rest.unwrap_or_default(),
            credentials: self.credentials,
            timestamps: self
                .timestamps
                .unwrap_or_else(|| Arc::new(SystemTimestamp::new())),
            api_version: self.api_version,
        }
    }
}
