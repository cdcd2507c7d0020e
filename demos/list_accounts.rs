//! Example: List accounts and payment methods.
//!
//! Run with: cargo run --example list_accounts

use std::sync::Arc;
use std::time::Duration;

use coinbase_api_client::auth::EnvCredentials;
use coinbase_api_client::rest::{AuthenticatedClient, CoinbaseRestClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let credentials = match EnvCredentials::try_from_env() {
        Some(creds) => Arc::new(creds),
        None => {
            println!("Set COINBASE_API_KEY and COINBASE_API_SECRET to run this example.");
            return Ok(());
        }
    };

    let rest = CoinbaseRestClient::builder()
        .user_agent("coinbase-api-client-examples/list_accounts")
        .timeout(Duration::from_secs(10))
        .max_retries(2)
        .build();
    let client = AuthenticatedClient::builder(credentials)
        .rest_client(rest)
        .build();

    println!("=== Accounts ===");
    for account in client.get_accounts().await? {
        println!("{:<40} {:<10} {}", account.name, account.currency, account.balance);
    }

    println!("\n=== Payment Methods ===");
    for method in client.get_payment_methods().await? {
        println!(
            "{:<40} {:<20} buy={} sell={}",
            method.name, method.method_type, method.allow_buy, method.allow_sell
        );
    }

    Ok(())
}
