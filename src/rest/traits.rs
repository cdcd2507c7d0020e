//! Trait definition for the Coinbase REST API client.
//!
//! The `CoinbaseClient` trait abstracts the six signed operations so callers
//! can swap in mocks or wrap the client (e.g. with their own retry policy for
//! idempotent calls).

use std::future::Future;

use crate::error::CoinbaseError;
use crate::types::{Account, Buy, CreateAccountRequest, PaymentMethod, Sell, TradeRequest};

/// Trait defining the signed Coinbase v2 operations.
///
/// All methods are async and return `Result<T, CoinbaseError>`.
pub trait CoinbaseClient: Send + Sync {
    /// List the user's accounts.
    fn get_accounts(&self) -> impl Future<Output = Result<Vec<Account>, CoinbaseError>> + Send;

    /// Get one account by currency code or account id.
    fn get_account(
        &self,
        currency: &str,
    ) -> impl Future<Output = Result<Account, CoinbaseError>> + Send;

    /// Create a new wallet account.
    fn create_account(
        &self,
        payload: &CreateAccountRequest,
    ) -> impl Future<Output = Result<Account, CoinbaseError>> + Send;

    /// List the user's payment methods.
    fn get_payment_methods(
        &self,
    ) -> impl Future<Output = Result<Vec<PaymentMethod>, CoinbaseError>> + Send;

    /// Buy crypto into an account.
    fn buy(
        &self,
        account_id: &str,
        payload: &TradeRequest,
    ) -> impl Future<Output = Result<Buy, CoinbaseError>> + Send;

    /// Sell crypto from an account.
    fn sell(
        &self,
        account_id: &str,
        payload: &TradeRequest,
    ) -> impl Future<Output = Result<Sell, CoinbaseError>> + Send;
}
