//! Checkout behavior against scripted gateways.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use techknot_shop::prelude::*;

/// Answers each charge with the next scripted outcome, then approves.
#[derive(Default)]
struct ScriptedGateway {
    outcomes: Mutex<VecDeque<Result<(), PaymentError>>>,
    seen_keys: Mutex<Vec<IdempotencyKey>>,
}

impl ScriptedGateway {
    fn with_outcomes(outcomes: impl IntoIterator<Item = Result<(), PaymentError>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            seen_keys: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.seen_keys.lock().unwrap().len()
    }

    fn keys(&self) -> Vec<IdempotencyKey> {
        self.seen_keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn charge(&self, request: &CheckoutRequest) -> Result<PaymentReceipt, PaymentError> {
        self.seen_keys
            .lock()
            .unwrap()
            .push(request.idempotency_key.clone());
        let outcome = self.outcomes.lock().unwrap().pop_front().unwrap_or(Ok(()));
        outcome.map(|()| PaymentReceipt {
            order_id: OrderId::new("ord_test"),
            amount: request.amount(),
            idempotency_key: request.idempotency_key.clone(),
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Never answers.
struct HangingGateway;

#[async_trait]
impl PaymentGateway for HangingGateway {
    async fn charge(&self, _request: &CheckoutRequest) -> Result<PaymentReceipt, PaymentError> {
        std::future::pending().await
    }

    fn name(&self) -> &str {
        "hanging"
    }
}

fn policy(max_attempts: u32) -> CheckoutPolicy {
    CheckoutPolicy {
        timeout_ms: 1_000,
        max_attempts,
        retry_delay_ms: 10,
    }
}

fn filled_ledger(catalog: &Catalog) -> CartLedger {
    let mut ledger = CartLedger::new();
    ledger.add_item(catalog.get(ProductId::new(1)).unwrap());
    ledger.add_item(catalog.get(ProductId::new(5)).unwrap());
    ledger.add_item(catalog.get(ProductId::new(5)).unwrap());
    ledger
}

#[tokio::test]
async fn success_clears_ledger() {
    let catalog = Catalog::iot_components();
    let pricing = PricingConfig::default();
    let notes = NotificationQueue::new();
    let mut ledger = filled_ledger(&catalog);
    let expected_total = ledger.compute_totals(&pricing).unwrap().total;

    let gateway = Arc::new(ScriptedGateway::default());
    let checkout = Checkout::new(gateway.clone(), policy(3));
    let receipt = checkout.run(&mut ledger, &pricing, &notes).await.unwrap();

    assert!(ledger.is_empty());
    assert_eq!(receipt.amount, expected_total);
    assert_eq!(gateway.calls(), 1);

    let titles: Vec<String> = notes.drain().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["Checkout initiated", "Payment successful!"]);
}

#[tokio::test]
async fn decline_leaves_ledger_untouched() {
    let catalog = Catalog::iot_components();
    let pricing = PricingConfig::default();
    let notes = NotificationQueue::new();
    let mut ledger = filled_ledger(&catalog);
    let before = ledger.clone();

    let gateway = ScriptedGateway::with_outcomes([Err(PaymentError::Declined("insufficient funds".into()))]);
    let checkout = Checkout::new(gateway.clone(), policy(3));
    let err = checkout.run(&mut ledger, &pricing, &notes).await.unwrap_err();

    assert!(matches!(err, CommerceError::Checkout(PaymentError::Declined(_))));
    assert!(!err.is_retryable());
    assert_eq!(ledger, before);
    assert_eq!(gateway.calls(), 1, "declines are not retried");

    let last = notes.drain().pop().unwrap();
    assert_eq!(last.kind, NotificationKind::Error);
    assert_eq!(last.title, "Payment failed");
}

#[tokio::test]
async fn transient_failures_retry_with_same_key() {
    let catalog = Catalog::iot_components();
    let pricing = PricingConfig::default();
    let mut ledger = filled_ledger(&catalog);

    let gateway = ScriptedGateway::with_outcomes([
        Err(PaymentError::Network("connection reset".into())),
        Err(PaymentError::Gateway {
            status: 503,
            message: "unavailable".into(),
        }),
    ]);
    let checkout = Checkout::new(gateway.clone(), policy(3));
    let receipt = checkout
        .run(&mut ledger, &pricing, &TracingNotifier)
        .await
        .unwrap();

    assert!(ledger.is_empty());
    let keys = gateway.keys();
    assert_eq!(keys.len(), 3);
    assert!(keys.iter().all(|k| *k == receipt.idempotency_key));
}

#[tokio::test]
async fn retries_stop_at_max_attempts() {
    let catalog = Catalog::iot_components();
    let pricing = PricingConfig::default();
    let mut ledger = filled_ledger(&catalog);
    let before = ledger.clone();

    let gateway = ScriptedGateway::with_outcomes(
        std::iter::repeat_with(|| Err(PaymentError::Network("down".into()))).take(5),
    );
    let checkout = Checkout::new(gateway.clone(), policy(2));
    let err = checkout
        .run(&mut ledger, &pricing, &NotificationQueue::new())
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(gateway.calls(), 2);
    assert_eq!(ledger, before);
}

#[tokio::test(start_paused = true)]
async fn hanging_gateway_times_out() {
    let catalog = Catalog::iot_components();
    let pricing = PricingConfig::default();
    let mut ledger = filled_ledger(&catalog);
    let before = ledger.clone();

    let checkout = Checkout::new(Arc::new(HangingGateway), policy(2));
    let err = checkout
        .run(&mut ledger, &pricing, &NotificationQueue::new())
        .await
        .unwrap_err();

    assert!(matches!(err, CommerceError::Checkout(PaymentError::Timeout)));
    assert_eq!(ledger, before);
}

#[tokio::test]
async fn empty_cart_never_reaches_gateway() {
    let pricing = PricingConfig::default();
    let notes = NotificationQueue::new();
    let mut ledger = CartLedger::new();

    let gateway = Arc::new(ScriptedGateway::default());
    let checkout = Checkout::new(gateway.clone(), policy(3));
    let err = checkout.run(&mut ledger, &pricing, &notes).await.unwrap_err();

    assert!(matches!(err, CommerceError::EmptyCart));
    assert_eq!(gateway.calls(), 0);
    assert!(notes.is_empty());
}

#[tokio::test]
async fn session_checkout_with_simulated_gateway() {
    let catalog = Catalog::iot_components();
    let pricing = PricingConfig::default();
    let mut session = ShopSession::new(&catalog, &pricing, NotificationQueue::new());
    session.add_to_cart(ProductId::new(9)).unwrap();

    let declining = Checkout::new(Arc::new(SimulatedGateway::declining(Duration::ZERO)), policy(1));
    assert!(session.checkout(&declining).await.is_err());
    assert_eq!(session.ledger().len(), 1);

    let approving = Checkout::new(Arc::new(SimulatedGateway::approving(Duration::ZERO)), policy(1));
    let receipt = session.checkout(&approving).await.unwrap();
    assert!(session.ledger().is_empty());
    // 1499.00 + 270.00 tax + 100.00 shipping
    assert_eq!(receipt.amount.minor_units, 149_900 + 27_000 + 10_000);
}
