//! # Coinbase Client
//!
//! An async Rust client library for the signed Coinbase v2 REST API.
//!
//! ## Features
//!
//! - Accounts, payment methods, buys and sells
//! - HMAC-SHA256 request signing with the `CB-ACCESS-*` headers
//! - A dispatcher that never holds the API secret
//! - Strong typing for all request/response types
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use coinbase_api_client::auth::EnvCredentials;
//! use coinbase_api_client::rest::AuthenticatedClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = EnvCredentials::try_from_env().ok_or("set COINBASE_API_KEY")?;
//!     let client = AuthenticatedClient::new(Arc::new(credentials));
//!     let account = client.get_account("BTC").await?;
//!     println!("{}: {}", account.name, account.balance);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, CoinbaseError};
pub use types::{Account, Money, PaymentMethod, Trade, TradeRequest};

/// Result type alias using CoinbaseError
pub type Result<T> = std::result::Result<T, CoinbaseError>;
