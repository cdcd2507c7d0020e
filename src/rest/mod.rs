//! Coinbase v2 REST API client.
//!
//! Two layers:
//! - [`CoinbaseRestClient`] dispatches requests carrying [`SignedHeaders`]
//!   computed by the caller. It never sees the API secret.
//! - [`AuthenticatedClient`] owns the credentials, signs each request and
//!   hands it to the dispatcher.
//!
//! [`SignedHeaders`]: crate::auth::SignedHeaders
//!
//! ```rust,ignore
//! use coinbase_api_client::rest::{CoinbaseClient, AuthenticatedClient};
//!
//! async fn print_accounts<C: CoinbaseClient>(client: &C) -> coinbase_api_client::Result<()> {
//!     for account in client.get_accounts().await? {
//!         println!("{}: {}", account.name, account.balance);
//!     }
//!     Ok(())
//! }
//! ```

mod authenticated;
mod client;
mod endpoints;
mod traits;

pub use authenticated::{AuthenticatedClient, AuthenticatedClientBuilder};
pub use client::{CoinbaseRestClient, CoinbaseRestClientBuilder};
pub use endpoints::*;
pub use traits::CoinbaseClient;
