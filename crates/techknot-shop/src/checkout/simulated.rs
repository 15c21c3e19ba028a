//! In-process gateway that approves or declines at random after a delay.

use crate::checkout::{CheckoutRequest, PaymentError, PaymentGateway, PaymentReceipt};
use crate::ids::OrderId;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::debug;

/// Gateway for demos and local runs; never contacts a processor.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    latency: Duration,
    success_rate: f64,
}

impl SimulatedGateway {
    /// `success_rate` is clamped to 0.0..=1.0.
    pub fn new(latency: Duration, success_rate: f64) -> Self {
        let success_rate = if success_rate.is_nan() {
            0.0
        } else {
            success_rate.clamp(0.0, 1.0)
        };
        Self {
            latency,
            success_rate,
        }
    }

    /// Approves every charge.
    pub fn approving(latency: Duration) -> Self {
        Self::new(latency, 1.0)
    }

    /// Declines every charge.
    pub fn declining(latency: Duration) -> Self {
        Self::new(latency, 0.0)
    }

    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::approving(Duration::from_secs(2))
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, request: &CheckoutRequest) -> Result<PaymentReceipt, PaymentError> {
        tokio::time::sleep(self.latency).await;

        let approved = rand::thread_rng().gen_bool(self.success_rate);
        debug!(
            idempotency_key = %request.idempotency_key,
            approved,
            "simulated charge"
        );
        if !approved {
            return Err(PaymentError::Declined("simulated payment failure".to_string()));
        }

        Ok(PaymentReceipt {
            order_id: OrderId::generate(),
            amount: request.amount(),
            idempotency_key: request.idempotency_key.clone(),
        })
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartLedger, PricingConfig};
    use crate::catalog::Catalog;
    use crate::ids::ProductId;

    fn request() -> CheckoutRequest {
        let catalog = Catalog::iot_components();
        let mut ledger = CartLedger::new();
        ledger.add_item(catalog.get(ProductId::new(1)).unwrap());
        CheckoutRequest::from_ledger(&ledger, &PricingConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_approving_gateway() {
        let request = request();
        let receipt = SimulatedGateway::approving(Duration::ZERO)
            .charge(&request)
            .await
            .unwrap();
        assert_eq!(receipt.amount, request.amount());
        assert_eq!(receipt.idempotency_key, request.idempotency_key);
        assert!(receipt.order_id.as_str().starts_with("ord_"));
    }

    #[tokio::test]
    async fn test_declining_gateway() {
        let result = SimulatedGateway::declining(Duration::ZERO).charge(&request()).await;
        assert!(matches!(result, Err(PaymentError::Declined(_))));
    }

    #[test]
    fn test_success_rate_clamped() {
        assert_eq!(SimulatedGateway::new(Duration::ZERO, 3.0).success_rate(), 1.0);
        assert_eq!(SimulatedGateway::new(Duration::ZERO, -1.0).success_rate(), 0.0);
        assert_eq!(SimulatedGateway::new(Duration::ZERO, f64::NAN).success_rate(), 0.0);
    }
}
