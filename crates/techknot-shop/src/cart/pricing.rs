//! Cart pricing calculations.

use crate::cart::LineItem;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Tax and shipping settings applied to every cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Currency all cart prices must be in.
    #[serde(default)]
    pub currency: Currency,
    /// Tax rate in basis points (1800 = 18%).
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,
    /// Flat shipping fee in minor units, charged only on a non-empty cart.
    #[serde(default = "default_shipping_fee")]
    pub shipping_fee: i64,
}

fn default_tax_rate_bps() -> u32 {
    1800
}

fn default_shipping_fee() -> i64 {
    10_000
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            tax_rate_bps: default_tax_rate_bps(),
            shipping_fee: default_shipping_fee(),
        }
    }
}

impl PricingConfig {
    pub fn shipping_fee(&self) -> Money {
        Money::new(self.shipping_fee, self.currency)
    }

    /// Tax rate as a percentage, for display.
    pub fn tax_rate_percent(&self) -> f64 {
        f64::from(self.tax_rate_bps) / 100.0
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartPricing {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Tax on the subtotal, rounded to whole rupees.
    pub tax: Money,
    /// Shipping cost; zero for an empty cart.
    pub shipping: Money,
    /// subtotal + tax + shipping.
    pub total: Money,
    /// Sum of quantities.
    pub item_count: u64,
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Price a sequence of line items.
    pub fn compute(items: &[LineItem], config: &PricingConfig) -> Result<Self, CommerceError> {
        let currency = config.currency;
        let lines = items
            .iter()
            .map(|item| {
                if item.unit_price.currency != currency {
                    return Err(CommerceError::CurrencyMismatch {
                        expected: currency.code().to_string(),
                        got: item.unit_price.currency.code().to_string(),
                    });
                }
                Ok(LineItemPricing {
                    product_id: item.product_id,
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    line_total: item.line_total().ok_or(CommerceError::Overflow)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let subtotal = Money::try_sum(lines.iter().map(|l| &l.line_total), currency)
            .ok_or(CommerceError::Overflow)?;
        let tax = subtotal
            .try_apply_rate_bps(config.tax_rate_bps)
            .and_then(|tax| tax.try_round_to_major())
            .ok_or(CommerceError::Overflow)?;
        let shipping = if lines.is_empty() {
            Money::zero(currency)
        } else {
            config.shipping_fee()
        };
        let total = Money::try_sum([subtotal, tax, shipping].iter(), currency)
            .ok_or(CommerceError::Overflow)?;
        let item_count = lines.iter().map(|l| u64::from(l.quantity)).sum();

        Ok(Self {
            subtotal,
            tax,
            shipping,
            total,
            item_count,
            lines,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItemPricing {
    pub product_id: ProductId,
    pub unit_price: Money,
    pub quantity: u32,
    /// unit_price * quantity.
    pub line_total: Money,
}
