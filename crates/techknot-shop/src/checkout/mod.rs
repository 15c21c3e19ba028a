//! Checkout module.
//!
//! Turns a cart ledger into a payment request and drives a payment gateway
//! with a timeout and retry policy.

mod flow;
mod gateway;
mod http;
mod request;
mod simulated;

pub use flow::{Checkout, CheckoutPolicy};
pub use gateway::{PaymentError, PaymentGateway, PaymentReceipt};
pub use http::HttpGateway;
pub use request::CheckoutRequest;
pub use simulated::SimulatedGateway;
