//! Checkout runner: one charge, bounded attempts, ledger cleared on success.

use crate::cart::{CartLedger, PricingConfig};
use crate::checkout::{CheckoutRequest, PaymentError, PaymentGateway, PaymentReceipt};
use crate::error::CommerceError;
use crate::notify::{Notification, Notifier};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Timeout and retry settings for talking to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPolicy {
    /// Per-attempt timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Attempts including the first; 0 is treated as 1.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Pause between attempts in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    250
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl CheckoutPolicy {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Charges carts through a payment gateway.
#[derive(Clone)]
pub struct Checkout {
    gateway: Arc<dyn PaymentGateway>,
    policy: CheckoutPolicy,
}

impl Checkout {
    pub fn new(gateway: Arc<dyn PaymentGateway>, policy: CheckoutPolicy) -> Self {
        Self { gateway, policy }
    }

    pub fn gateway_name(&self) -> &str {
        self.gateway.name()
    }

    /// Charge the ledger's total.
    ///
    /// On success the ledger is cleared and the receipt returned. On any
    /// failure the ledger is left exactly as it was. An empty ledger is
    /// rejected before the gateway is contacted.
    pub async fn run<N: Notifier>(
        &self,
        ledger: &mut CartLedger,
        pricing: &PricingConfig,
        notifier: &N,
    ) -> Result<PaymentReceipt, CommerceError> {
        let request = CheckoutRequest::from_ledger(ledger, pricing)?;

        notifier.notify(Notification::info(
            "Checkout initiated",
            "Redirecting to payment gateway...",
        ));
        info!(
            gateway = self.gateway.name(),
            idempotency_key = %request.idempotency_key,
            amount = %request.amount(),
            "checkout started"
        );

        match self.charge(&request).await {
            Ok(receipt) => {
                ledger.clear();
                info!(order_id = %receipt.order_id, "checkout succeeded");
                notifier.notify(Notification::success(
                    "Payment successful!",
                    "Your order has been placed successfully.",
                ));
                Ok(receipt)
            }
            Err(e) => {
                error!(
                    idempotency_key = %request.idempotency_key,
                    error = %e,
                    "checkout failed"
                );
                notifier.notify(Notification::error("Payment failed", e.to_string()));
                Err(CommerceError::Checkout(e))
            }
        }
    }

    /// Send the request until it succeeds, fails permanently, or attempts run out.
    async fn charge(&self, request: &CheckoutRequest) -> Result<PaymentReceipt, PaymentError> {
        let attempts = self.policy.attempts();
        let mut attempt = 1;
        loop {
            let outcome = tokio::time::timeout(self.policy.timeout(), self.gateway.charge(request))
                .await
                .unwrap_or(Err(PaymentError::Timeout));

            match outcome {
                Ok(receipt) => return Ok(receipt),
                Err(e) if e.is_transient() && attempt < attempts => {
                    warn!(attempt, max_attempts = attempts, error = %e, "charge attempt failed, retrying");
                    tokio::time::sleep(self.policy.retry_delay()).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl std::fmt::Debug for Checkout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkout")
            .field("gateway", &self.gateway.name())
            .field("policy", &self.policy)
            .finish()
    }
}
