//! Shop error types.

use thiserror::Error;

use crate::checkout::PaymentError;
use crate::ids::ProductId;

/// Errors that can occur in shop operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(ProductId),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// The payment gateway did not accept the charge.
    #[error("Checkout failed: {0}")]
    Checkout(#[from] PaymentError),
}

impl CommerceError {
    /// Whether retrying the same action later could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            CommerceError::Checkout(e) => e.is_transient(),
            _ => false,
        }
    }
}
