//! Shop domain types and logic for the TechKnot storefront.
//!
//! This crate provides:
//!
//! - **Catalog**: the IoT components on sale, categories, filtering
//! - **Cart**: an in-memory ledger of line items with derived totals
//! - **Checkout**: a payment request/response contract with timeout and retry
//! - **Session**: an owned shopping session that raises user notifications
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use techknot_shop::prelude::*;
//!
//! # async fn demo() -> Result<(), CommerceError> {
//! let catalog = Catalog::iot_components();
//! let pricing = PricingConfig::default();
//! let mut session = ShopSession::new(&catalog, &pricing, NotificationQueue::new());
//!
//! session.add_to_cart(ProductId::new(1))?;
//! session.add_to_cart(ProductId::new(5))?;
//! println!("Total: {}", session.totals()?.total);
//!
//! let gateway = Arc::new(SimulatedGateway::approving(Duration::from_millis(10)));
//! let checkout = Checkout::new(gateway, CheckoutPolicy::default());
//! let receipt = session.checkout(&checkout).await?;
//! println!("Order {}", receipt.order_id);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod notify;
pub mod search;
pub mod session;
pub mod wishlist;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, Category, Product};
    pub use crate::search::{Filter, ProductFilter};

    // Cart
    pub use crate::cart::{CartLedger, CartPricing, LineItem, LineItemPricing, PricingConfig};
    pub use crate::wishlist::Wishlist;

    // Checkout
    pub use crate::checkout::{
        Checkout, CheckoutPolicy, CheckoutRequest, HttpGateway, PaymentError, PaymentGateway,
        PaymentReceipt, SimulatedGateway,
    };

    // Session
    pub use crate::notify::{
        Notification, NotificationKind, NotificationQueue, Notifier, TracingNotifier,
    };
    pub use crate::session::ShopSession;
}
