//! CLI configuration.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use techknot_shop::cart::PricingConfig;
use techknot_shop::catalog::Catalog;
use techknot_shop::checkout::{CheckoutPolicy, HttpGateway, PaymentGateway, SimulatedGateway};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Tax, shipping and currency.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Gateway timeout and retry policy.
    #[serde(default)]
    pub checkout: CheckoutPolicy,

    /// Which payment gateway to charge through.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Check values the types alone cannot rule out.
    pub fn validate(&self) -> Result<()> {
        let catalog_currency = Catalog::iot_components().currency();
        if self.pricing.currency != catalog_currency {
            bail!(
                "pricing.currency is {} but the catalog is priced in {}",
                self.pricing.currency,
                catalog_currency
            );
        }
        if self.pricing.shipping_fee < 0 {
            bail!("pricing.shipping_fee must not be negative");
        }
        if self.pricing.tax_rate_bps > 10_000 {
            bail!("pricing.tax_rate_bps must be at most 10000 (100%)");
        }
        if self.checkout.timeout_ms == 0 {
            bail!("checkout.timeout_ms must be positive");
        }
        if !(0.0..=1.0).contains(&self.gateway.success_rate) {
            bail!("gateway.success_rate must be between 0.0 and 1.0");
        }
        if self.gateway.kind == GatewayKind::Http && self.gateway.endpoint.is_none() {
            bail!("gateway.endpoint is required when gateway.kind = \"http\"");
        }
        Ok(())
    }
}

/// Gateway implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    #[default]
    Simulated,
    Http,
}

/// Payment gateway settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// `simulated` or `http`.
    #[serde(default)]
    pub kind: GatewayKind,

    /// Simulated gateway delay in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Simulated gateway approval probability.
    #[serde(default = "default_success_rate")]
    pub success_rate: f64,

    /// Charge endpoint for the HTTP gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Bearer token for the HTTP gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_latency_ms() -> u64 {
    2_000
}

fn default_success_rate() -> f64 {
    1.0
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            kind: GatewayKind::default(),
            latency_ms: default_latency_ms(),
            success_rate: default_success_rate(),
            endpoint: None,
            api_key: None,
        }
    }
}

impl GatewayConfig {
    /// Build the configured gateway.
    pub fn build(&self) -> Result<Arc<dyn PaymentGateway>> {
        match self.kind {
            GatewayKind::Simulated => Ok(Arc::new(SimulatedGateway::new(
                Duration::from_millis(self.latency_ms),
                self.success_rate,
            ))),
            GatewayKind::Http => {
                let endpoint = self
                    .endpoint
                    .as_deref()
                    .context("gateway.endpoint is required for the http gateway")?;
                let mut gateway = HttpGateway::new(endpoint);
                if let Some(ref key) = self.api_key {
                    gateway = gateway.with_api_key(key);
                }
                Ok(Arc::new(gateway))
            }
        }
    }
}

/// Generate a default techknot.toml config file.
pub fn generate_default_config() -> String {
    r#"# TechKnot shop configuration

[pricing]
currency = "INR"
# 18% GST, in basis points
tax_rate_bps = 1800
# Flat shipping in paise, charged only when the cart is not empty
shipping_fee = 10000

[checkout]
timeout_ms = 5000
max_attempts = 3
retry_delay_ms = 250

[gateway]
kind = "simulated"
latency_ms = 2000
success_rate = 1.0
# kind = "http"
# endpoint = "https://payments.example.com/charges"
# api_key = "sk_live_..."
"#
    .to_string()
}
