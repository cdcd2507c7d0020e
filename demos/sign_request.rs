//! Example: Computing the signing headers by hand.
//!
//! Run with: cargo run --example sign_request

use rust_decimal::Decimal;

use coinbase_api_client::auth::{
    Credentials, SignedHeaders, SystemTimestamp, TimestampProvider, sign_request,
};
use coinbase_api_client::rest::{CoinbaseRestClient, DEFAULT_API_VERSION, PreparedRequest};
use coinbase_api_client::types::TradeRequest;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let credentials = Credentials::new("api_key", "api_secret");
    let client = CoinbaseRestClient::new();

    // A quote-only buy: nothing is bought.
    let payload = TradeRequest::with_amount(Decimal::new(1, 2), "BTC").quote(true);
    let request = PreparedRequest::buy("2bbf394c-193b-5b2a-9155-3b4732659ede", &payload)?;
    let request_path = client.request_path(&request)?;
    let timestamp = SystemTimestamp::new().timestamp();

    let signature = sign_request(
        &credentials,
        timestamp,
        request.method().as_str(),
        &request_path,
        request.signing_body(),
    )?;
    println!("{} {}", request.method(), request_path);
    println!("Body: {}", request.signing_body());
    println!("Signature: {}", signature);

    let headers = SignedHeaders::sign(
        &credentials,
        DEFAULT_API_VERSION,
        timestamp,
        request.method().as_str(),
        &request_path,
        request.signing_body(),
    )?;
    for (name, value) in headers.pairs() {
        println!("{name}: {value}");
    }

    Ok(())
}
