//! Authentication module for the Coinbase v2 API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Timestamp generation for the `CB-ACCESS-TIMESTAMP` header
//! - HMAC-SHA256 signature generation and the signed header set

mod credentials;
mod signature;
mod timestamp;

pub use credentials::{Credentials, CredentialsProvider, EnvCredentials, StaticCredentials};
pub use signature::{
    CB_ACCESS_KEY, CB_ACCESS_SIGN, CB_ACCESS_TIMESTAMP, CB_VERSION, SignedHeaders, sign_request,
};
pub use timestamp::{SystemTimestamp, TimestampProvider};
