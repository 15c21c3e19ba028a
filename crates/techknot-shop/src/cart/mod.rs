//! Shopping cart module.
//!
//! Contains the cart ledger, its line items, and pricing.

mod ledger;
mod pricing;

pub use ledger::{CartLedger, LineItem, MAX_QUANTITY_PER_ITEM};
pub use pricing::{CartPricing, LineItemPricing, PricingConfig};
