//! One shopper's session: cart, wishlist, and the notifications they cause.

use crate::cart::{CartLedger, CartPricing, LineItem, PricingConfig};
use crate::catalog::{Catalog, Product};
use crate::checkout::{Checkout, PaymentReceipt};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::notify::{Notification, Notifier};
use crate::wishlist::Wishlist;

/// Owns the ledger and wishlist for one viewing session.
///
/// Nothing here is global: the catalog, pricing and notifier are handed in,
/// and the session is dropped when the shopper leaves.
pub struct ShopSession<'a, N: Notifier> {
    catalog: &'a Catalog,
    pricing: &'a PricingConfig,
    notifier: N,
    ledger: CartLedger,
    wishlist: Wishlist,
}

impl<'a, N: Notifier> ShopSession<'a, N> {
    pub fn new(catalog: &'a Catalog, pricing: &'a PricingConfig, notifier: N) -> Self {
        Self {
            catalog,
            pricing,
            notifier,
            ledger: CartLedger::new(),
            wishlist: Wishlist::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    pub fn ledger(&self) -> &CartLedger {
        &self.ledger
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Add one unit of a catalog product.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<&LineItem, CommerceError> {
        let product = self.product(id)?;
        self.notifier.notify(Notification::success(
            "Added to cart!",
            format!("{} has been added to your cart.", product.name),
        ));
        Ok(self.ledger.add_item(product))
    }

    /// Set a line's quantity (floored at 1). Returns false if not in the cart.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) -> bool {
        self.ledger.set_quantity(id, quantity)
    }

    /// The "+" control.
    pub fn increment(&mut self, id: ProductId) -> Result<u32, CommerceError> {
        let current = self.quantity_of(id)?;
        self.ledger.set_quantity(id, current.saturating_add(1));
        self.quantity_of(id)
    }

    /// The "-" control; stops at 1.
    pub fn decrement(&mut self, id: ProductId) -> Result<u32, CommerceError> {
        let current = self.quantity_of(id)?;
        self.ledger.set_quantity(id, current.saturating_sub(1).max(1));
        self.quantity_of(id)
    }

    /// Remove a line from the cart.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Option<LineItem> {
        let removed = self.ledger.remove_item(id)?;
        self.notifier.notify(Notification::info(
            "Item removed",
            "The item has been removed from your cart.",
        ));
        Some(removed)
    }

    /// Toggle a product on the wishlist. Returns true when it is now wishlisted.
    pub fn toggle_wishlist(&mut self, id: ProductId) -> Result<bool, CommerceError> {
        self.product(id)?;
        let added = self.wishlist.toggle(id);
        let notification = if added {
            Notification::success("Added to wishlist", "Item has been added to your wishlist.")
        } else {
            Notification::info(
                "Removed from wishlist",
                "Item has been removed from your wishlist.",
            )
        };
        self.notifier.notify(notification);
        Ok(added)
    }

    /// Current totals.
    pub fn totals(&self) -> Result<CartPricing, CommerceError> {
        self.ledger.compute_totals(self.pricing)
    }

    /// Charge the cart. The cart is emptied only if the charge succeeds.
    pub async fn checkout(&mut self, checkout: &Checkout) -> Result<PaymentReceipt, CommerceError> {
        checkout
            .run(&mut self.ledger, self.pricing, &self.notifier)
            .await
    }

    fn product(&self, id: ProductId) -> Result<&'a Product, CommerceError> {
        self.catalog.get(id).ok_or(CommerceError::ProductNotFound(id))
    }

    fn quantity_of(&self, id: ProductId) -> Result<u32, CommerceError> {
        self.ledger
            .get(id)
            .map(|line| line.quantity)
            .ok_or(CommerceError::ItemNotInCart(id))
    }
}
