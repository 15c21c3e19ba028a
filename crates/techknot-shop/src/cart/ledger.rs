//! Cart ledger and line item types.

use crate::cart::{CartPricing, PricingConfig};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// The contents of one shopping session's cart.
///
/// Lines are keyed by product id and kept in insertion order. A line's
/// quantity is always between 1 and [`MAX_QUANTITY_PER_ITEM`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLedger {
    lines: Vec<LineItem>,
}

impl CartLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line for `product.id`, or appends a new line
    /// with quantity 1. Quantity saturates at [`MAX_QUANTITY_PER_ITEM`].
    pub fn add_item(&mut self, product: &Product) -> &LineItem {
        let index = match self.position(product.id) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = line.quantity.saturating_add(1).min(MAX_QUANTITY_PER_ITEM);
                index
            }
            None => {
                self.lines.push(LineItem::from_product(product));
                self.lines.len() - 1
            }
        };
        let line = &self.lines[index];
        debug!(product_id = %line.product_id, quantity = line.quantity, "cart line added");
        line
    }

    /// Replace a line's quantity.
    ///
    /// Quantities below 1 floor at 1 and quantities above the per-line
    /// maximum are capped. Returns false if no line has `id`.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) -> bool {
        let Some(line) = self.lines.iter_mut().find(|l| l.product_id == id) else {
            return false;
        };
        line.quantity = quantity.clamp(1, MAX_QUANTITY_PER_ITEM);
        debug!(product_id = %id, quantity = line.quantity, "cart line quantity set");
        true
    }

    /// Remove a line, returning it if it existed.
    pub fn remove_item(&mut self, id: ProductId) -> Option<LineItem> {
        let index = self.position(id)?;
        debug!(product_id = %id, "cart line removed");
        Some(self.lines.remove(index))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Derive subtotal, tax, shipping and total.
    pub fn compute_totals(&self, config: &PricingConfig) -> Result<CartPricing, CommerceError> {
        CartPricing::compute(&self.lines, config)
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.product_id == id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id == id)
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    /// Product being purchased; unique within the ledger.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price at the time the product was added.
    pub unit_price: Money,
    /// Quantity, at least 1.
    pub quantity: u32,
    /// Product image URL.
    pub image: String,
}

impl LineItem {
    fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
            image: product.image.clone(),
        }
    }

    /// unit_price * quantity, or None on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.try_multiply(i64::from(self.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::money::Currency;

    fn catalog() -> Catalog {
        Catalog::iot_components()
    }

    fn product(catalog: &Catalog, id: u32) -> &Product {
        catalog.get(ProductId::new(id)).unwrap()
    }

    #[test]
    fn test_ledger_starts_empty() {
        let ledger = CartLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.item_count(), 0);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let catalog = catalog();
        let mut ledger = CartLedger::new();
        ledger.add_item(product(&catalog, 1));
        let line = ledger.add_item(product(&catalog, 1));

        assert_eq!(line.quantity, 2);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.item_count(), 2);
    }

    #[test]
    fn test_distinct_adds_count_per_id() {
        let catalog = catalog();
        let mut ledger = CartLedger::new();
        for id in [3, 1, 3, 9, 3, 1] {
            ledger.add_item(product(&catalog, id));
        }

        assert_eq!(ledger.len(), 3);
        let order: Vec<u32> = ledger.lines().iter().map(|l| l.product_id.get()).collect();
        assert_eq!(order, vec![3, 1, 9]);
        assert_eq!(ledger.get(ProductId::new(3)).unwrap().quantity, 3);
        assert_eq!(ledger.get(ProductId::new(1)).unwrap().quantity, 2);
        assert_eq!(ledger.get(ProductId::new(9)).unwrap().quantity, 1);
    }

    #[test]
    fn test_set_quantity() {
        let catalog = catalog();
        let mut ledger = CartLedger::new();
        ledger.add_item(product(&catalog, 2));

        assert!(ledger.set_quantity(ProductId::new(2), 5));
        assert_eq!(ledger.item_count(), 5);
    }

    #[test]
    fn test_set_quantity_zero_floors_at_one() {
        let catalog = catalog();
        let mut ledger = CartLedger::new();
        ledger.add_item(product(&catalog, 2));

        assert!(ledger.set_quantity(ProductId::new(2), 0));
        assert_eq!(ledger.get(ProductId::new(2)).unwrap().quantity, 1);
        assert!(ledger.lines().iter().all(|l| l.quantity >= 1));
    }

    #[test]
    fn test_set_quantity_caps_at_max() {
        let catalog = catalog();
        let mut ledger = CartLedger::new();
        ledger.add_item(product(&catalog, 2));

        ledger.set_quantity(ProductId::new(2), u32::MAX);
        assert_eq!(ledger.get(ProductId::new(2)).unwrap().quantity, MAX_QUANTITY_PER_ITEM);

        ledger.add_item(product(&catalog, 2));
        assert_eq!(ledger.get(ProductId::new(2)).unwrap().quantity, MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_set_quantity_absent_is_noop() {
        let mut ledger = CartLedger::new();
        assert!(!ledger.set_quantity(ProductId::new(4), 3));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_remove_item() {
        let catalog = catalog();
        let mut ledger = CartLedger::new();
        ledger.add_item(product(&catalog, 1));
        ledger.add_item(product(&catalog, 5));

        let removed = ledger.remove_item(ProductId::new(1)).unwrap();
        assert_eq!(removed.name, "Arduino Uno R3 Microcontroller");
        assert!(ledger.remove_item(ProductId::new(1)).is_none());

        let totals = ledger.compute_totals(&PricingConfig::default()).unwrap();
        assert_eq!(totals.subtotal, Money::from_major(399, Currency::INR));
        assert!(totals.lines.iter().all(|l| l.product_id != ProductId::new(1)));
    }

    #[test]
    fn test_subtotal_matches_contents() {
        let catalog = catalog();
        let mut ledger = CartLedger::new();
        ledger.add_item(product(&catalog, 1));
        ledger.add_item(product(&catalog, 5));
        ledger.add_item(product(&catalog, 5));

        let totals = ledger.compute_totals(&PricingConfig::default()).unwrap();
        assert_eq!(totals.subtotal, Money::from_major(1497, Currency::INR));
    }

    #[test]
    fn test_compute_totals_is_idempotent() {
        let catalog = catalog();
        let mut ledger = CartLedger::new();
        ledger.add_item(product(&catalog, 7));
        ledger.set_quantity(ProductId::new(7), 4);

        let config = PricingConfig::default();
        let first = ledger.compute_totals(&config).unwrap();
        let second = ledger.compute_totals(&config).unwrap();
        assert_eq!(first, second);
    }
}
