//! Example: Working with CoinbaseError and ApiError.
//!
//! Run with: cargo run --example error_handling

use coinbase_api_client::CoinbaseError;
use coinbase_api_client::error::{ApiError, error_codes};

fn main() {
    let body = r#"{"errors":[{"id":"validation_error","message":"Insufficient funds"}]}"#;
    let api_error = ApiError::from_body(422, body);
    println!("API error: {}", api_error);
    println!("Is validation error: {}", api_error.is_validation_error());

    let err = CoinbaseError::Api(api_error);
    match &err {
        CoinbaseError::Api(inner) if inner.code == error_codes::VALIDATION_ERROR => {
            println!("Matched known validation error");
        }
        _ => println!("Unexpected error type"),
    }
    println!("Transport error: {}", err.is_transport());

    let garbled = ApiError::from_body(502, "<html>Bad Gateway</html>");
    println!("Garbled body still decoded as: {}", garbled.code);
}
