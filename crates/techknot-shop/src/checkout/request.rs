//! Payment request sent to the gateway.

use crate::cart::{CartLedger, CartPricing, PricingConfig};
use crate::error::CommerceError;
use crate::ids::IdempotencyKey;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Snapshot of a cart, priced, ready to be charged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Reused on every retry of one checkout so the gateway charges once.
    pub idempotency_key: IdempotencyKey,
    pub currency: Currency,
    /// Totals plus one priced entry per cart line.
    pub pricing: CartPricing,
}

impl CheckoutRequest {
    /// Price the ledger and take a snapshot of it under a fresh key.
    pub fn from_ledger(ledger: &CartLedger, config: &PricingConfig) -> Result<Self, CommerceError> {
        if ledger.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        Ok(Self {
            idempotency_key: IdempotencyKey::generate(),
            currency: config.currency,
            pricing: ledger.compute_totals(config)?,
        })
    }

    /// Amount to charge.
    pub fn amount(&self) -> Money {
        self.pricing.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::ids::ProductId;

    #[test]
    fn test_empty_ledger_rejected() {
        let result = CheckoutRequest::from_ledger(&CartLedger::new(), &PricingConfig::default());
        assert!(matches!(result, Err(CommerceError::EmptyCart)));
    }

    #[test]
    fn test_snapshot_serializes() {
        let catalog = Catalog::iot_components();
        let mut ledger = CartLedger::new();
        ledger.add_item(catalog.get(ProductId::new(4)).unwrap());

        let request = CheckoutRequest::from_ledger(&ledger, &PricingConfig::default()).unwrap();
        // 89.00 + 16.00 tax + 100.00 shipping
        assert_eq!(request.amount().minor_units, 20_500);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["currency"], "INR");
        assert_eq!(json["pricing"]["lines"][0]["product_id"], 4);
        assert_eq!(json["pricing"]["lines"][0]["quantity"], 1);
        assert!(json.get("lines").is_none());
        assert!(json["idempotency_key"].as_str().unwrap().starts_with("idem_"));
    }
}
