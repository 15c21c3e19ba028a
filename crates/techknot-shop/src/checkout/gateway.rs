//! Payment gateway contract.

use crate::checkout::CheckoutRequest;
use crate::ids::{IdempotencyKey, OrderId};
use crate::money::Money;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Proof that a charge went through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub order_id: OrderId,
    pub amount: Money,
    pub idempotency_key: IdempotencyKey,
}

/// Why a charge did not go through.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// The processor refused the payment.
    #[error("Payment declined: {0}")]
    Declined(String),

    /// The request was rejected as invalid.
    #[error("Invalid payment request: {0}")]
    Validation(String),

    /// The gateway could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// No answer within the checkout timeout.
    #[error("Payment gateway timed out")]
    Timeout,

    /// The gateway answered with an unexpected HTTP status.
    #[error("Gateway error {status}: {message}")]
    Gateway { status: u16, message: String },

    /// The gateway's answer could not be understood.
    #[error("Malformed gateway response: {0}")]
    Malformed(String),
}

impl PaymentError {
    /// Whether the same request may succeed if sent again.
    pub fn is_transient(&self) -> bool {
        match self {
            PaymentError::Network(_) | PaymentError::Timeout => true,
            PaymentError::Gateway { status, .. } => *status >= 500 || *status == 429,
            PaymentError::Declined(_) | PaymentError::Validation(_) | PaymentError::Malformed(_) => {
                false
            }
        }
    }
}

/// An external payment processor.
///
/// Implementations must treat `request.idempotency_key` as the identity of
/// the charge: a repeated request with the same key charges at most once.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charge the request's total.
    async fn charge(&self, request: &CheckoutRequest) -> Result<PaymentReceipt, PaymentError>;

    /// Short name for logs.
    fn name(&self) -> &str;
}
