//! Request and response types for the Coinbase v2 API.

pub mod account;
pub mod common;
pub mod payment_method;
pub mod serde_helpers;
pub mod trade;

pub use account::{Account, AccountType, CreateAccountRequest};
pub use common::{DataResponse, Money, Pagination, ResourceRef, Warning};
pub use payment_method::PaymentMethod;
pub use trade::{Buy, Sell, Trade, TradeRequest, TradeStatus};
